//! Load pipeline: ledger first, then the status tab resolved against it.

use crate::config::Config;
use crate::diagnostics::{LoadDiagnostic, RowDiagnostic};
use crate::normalizer;
use crate::source::SheetSource;
use crate::status::StatusParser;
use crate::types::{DailyStatusLog, Ledger};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything one load of the workbook produced.
///
/// Both tables may be empty; `diagnostics` says why.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub ledger: Ledger,
    pub status: DailyStatusLog,
    pub skipped_rows: Vec<RowDiagnostic>,
    pub diagnostics: Vec<LoadDiagnostic>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// A snapshot with no data, carrying a single diagnostic.
    pub fn empty(diagnostic: LoadDiagnostic) -> Self {
        Self {
            ledger: Ledger::default(),
            status: DailyStatusLog::default(),
            skipped_rows: Vec::new(),
            diagnostics: vec![diagnostic],
            loaded_at: Utc::now(),
        }
    }
}

/// Build a snapshot from `source`. Never fails.
pub fn load<S: SheetSource + ?Sized>(source: &mut S, config: &Config) -> Snapshot {
    let outcome = normalizer::normalize(source, &config.ledger, &config.status.missing_marker);
    let ledger = outcome.ledger;
    let mut diagnostics = outcome.diagnostics;

    let sheet = &config.source.status_sheet;
    let (status, skipped_rows) = match source.read_sheet(sheet) {
        Ok(Some(grid)) => {
            let report =
                StatusParser::new(&config.status, config.source.tracked_year, &ledger).parse(&grid);
            (report.log, report.skipped)
        }
        Ok(None) => {
            let diag = LoadDiagnostic::StatusTabMissing {
                sheet: sheet.clone(),
            };
            tracing::warn!(%diag, "daily status unavailable");
            diagnostics.push(diag);
            (DailyStatusLog::default(), Vec::new())
        }
        Err(err) => {
            let diag = LoadDiagnostic::StatusTabUnreadable {
                sheet: sheet.clone(),
                message: err.to_string(),
            };
            tracing::warn!(%diag, "daily status unavailable");
            diagnostics.push(diag);
            (DailyStatusLog::default(), Vec::new())
        }
    };

    tracing::info!(
        ledger_rows = ledger.len(),
        status_records = status.len(),
        skipped_rows = skipped_rows.len(),
        diagnostics = diagnostics.len(),
        "workbook loaded"
    );

    Snapshot {
        ledger,
        status,
        skipped_rows,
        diagnostics,
        loaded_at: Utc::now(),
    }
}
