//! Daily status parser. Turns the date-sectioned status tab into flat records.
//!
//! The tab has no header row. A row whose first cell starts with the
//! tracked year (`2026-...`) opens a section; member rows below it belong to
//! that date until the next such row. Column positions are fixed by
//! [`StatusColumns`](crate::config::StatusColumns).
//!
//! Every row is handled on its own. A row either opens a section, produces a
//! record, or is skipped with a [`SkipReason`]; one bad row never affects the
//! rows around it.

use crate::config::StatusConfig;
use crate::diagnostics::{RowDiagnostic, SkipReason};
use crate::source::{present, Grid};
use crate::types::{DailyStatusLog, DailyStatusRecord, Ledger};
use crate::xref::CrossReference;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading `Y-M-D` of a header cell. Month and day may be unpadded; whatever
/// follows (a time of day, a weekday) is ignored.
static DATE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:$|[^\d])").expect("date header pattern must compile")
});

/// Parsed status tab plus the rows that produced nothing.
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub log: DailyStatusLog,
    pub skipped: Vec<RowDiagnostic>,
}

/// What a single row turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Section(NaiveDate),
    Record(DailyStatusRecord),
    Skipped(SkipReason),
}

/// Date-header check for a status row's first cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateHeader {
    /// Doesn't start with the tracked year; treat as a data row.
    NotHeader,
    Valid(NaiveDate),
    /// Starts with the tracked year but holds no real calendar date.
    Invalid,
}

/// Classify `text` as a section header for `tracked_year`. Any cell starting
/// with `<tracked_year>-` is a header; it is `Valid` only when its leading
/// date parses.
pub fn date_header(text: &str, tracked_year: i32) -> DateHeader {
    let text = text.trim();
    if !text.starts_with(&format!("{tracked_year}-")) {
        return DateHeader::NotHeader;
    }
    let Some(caps) = DATE_HEADER.captures(text) else {
        return DateHeader::Invalid;
    };
    let field = |i: usize| caps[i].parse::<u32>().ok();
    match (field(2), field(3)) {
        (Some(m), Some(d)) => NaiveDate::from_ymd_opt(tracked_year, m, d)
            .map(DateHeader::Valid)
            .unwrap_or(DateHeader::Invalid),
        _ => DateHeader::Invalid,
    }
}

/// Single-pass parser over the status tab.
pub struct StatusParser<'a> {
    config: &'a StatusConfig,
    tracked_year: i32,
    xref: CrossReference<'a>,
}

impl<'a> StatusParser<'a> {
    pub fn new(config: &'a StatusConfig, tracked_year: i32, ledger: &'a Ledger) -> Self {
        Self {
            config,
            tracked_year,
            xref: CrossReference::new(ledger),
        }
    }

    /// Parse the whole tab. Rows are padded to the configured column width
    /// first, so short tabs never fault.
    pub fn parse(&self, grid: &Grid) -> StatusReport {
        let mut grid = grid.clone();
        grid.pad_to(self.config.columns.width());

        let mut report = StatusReport::default();
        let mut active: Option<NaiveDate> = None;

        for (i, row) in grid.rows.iter().enumerate() {
            let row_no = i + 1;
            match self.parse_row(row, active) {
                RowOutcome::Section(date) => active = Some(date),
                RowOutcome::Record(record) => report.log.records.push(record),
                RowOutcome::Skipped(reason) => {
                    tracing::trace!(row = row_no, %reason, "status row skipped");
                    // Rows after a bad header must not be credited to the
                    // previous section.
                    if matches!(reason, SkipReason::InvalidDateHeader(_)) {
                        active = None;
                    }
                    report.skipped.push(RowDiagnostic {
                        row: row_no,
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Classify one padded row given the date of the current section.
    pub fn parse_row(&self, row: &[Option<String>], active: Option<NaiveDate>) -> RowOutcome {
        let cols = &self.config.columns;
        let cell = |i: usize| present(row.get(i).and_then(Option::as_ref), &self.config.missing_marker);

        let marker = row.get(cols.marker).and_then(|c| c.as_deref()).unwrap_or("");
        match date_header(marker, self.tracked_year) {
            DateHeader::Valid(date) => return RowOutcome::Section(date),
            DateHeader::Invalid => {
                return RowOutcome::Skipped(SkipReason::InvalidDateHeader(marker.trim().to_string()))
            }
            DateHeader::NotHeader => {}
        }

        let Some(date) = active else {
            return RowOutcome::Skipped(SkipReason::BeforeFirstDate);
        };

        if marker.contains(self.config.note_marker.as_str()) {
            return RowOutcome::Skipped(SkipReason::NoteRow);
        }
        let Some(member) = cell(cols.member) else {
            return RowOutcome::Skipped(SkipReason::MissingMember);
        };
        if member == self.config.header_label {
            return RowOutcome::Skipped(SkipReason::HeaderRow);
        }

        let text = |i: usize| cell(i).unwrap_or("").to_string();
        let or_default = |i: usize, default: &str| cell(i).unwrap_or(default).to_string();

        let project_name = text(cols.project_name);
        let tracking_ref = self.xref.tracking_ref(&project_name);

        RowOutcome::Record(DailyStatusRecord {
            date,
            team_lead: text(cols.team_lead),
            member: member.to_string(),
            attendance: or_default(cols.attendance, &self.config.default_attendance),
            project_archive: text(cols.project_archive),
            project_name,
            tracking_ref,
            project_status: or_default(cols.project_status, &self.config.default_status),
            comments: text(cols.comments),
        })
    }
}

/// Parse `grid` against `ledger` with the given settings.
pub fn parse(grid: &Grid, ledger: &Ledger, config: &StatusConfig, tracked_year: i32) -> StatusReport {
    StatusParser::new(config, tracked_year, ledger).parse(grid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
