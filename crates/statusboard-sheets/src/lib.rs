//! statusboard-sheets — workbook-backed sheet sources for statusboard.
//!
//! [`WorkbookSource`] opens an `.xlsx`, `.xlsm`, `.xls` or `.ods` file with
//! `calamine` and serves its tabs as [`Grid`]s whose column positions match
//! the spreadsheet (a tab whose used range starts at `C3` still has its data
//! in column index 2). [`load_workbook`] runs the full pipeline over the
//! configured file and never fails.

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use statusboard_core::config::Config;
use statusboard_core::pipeline::{self, Snapshot};
use statusboard_core::source::{Grid, SheetSource, SourceError};
use statusboard_core::LoadDiagnostic;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A workbook file opened for reading.
pub struct WorkbookSource {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(SourceError::NotFound(path));
        }
        let sheets = open_workbook_auto(&path).map_err(|e| SourceError::Open {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { path, sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for WorkbookSource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Option<Grid>, SourceError> {
        if !self.sheets.sheet_names().iter().any(|n| n == name) {
            return Ok(None);
        }
        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| SourceError::Sheet {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        // Re-anchor the used range at A1 so fixed column positions hold.
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Option<String>>> = vec![Vec::new(); row_offset];
        rows.extend(range.rows().map(|cells| {
            std::iter::repeat(None)
                .take(col_offset)
                .chain(cells.iter().map(cell_text))
                .collect()
        }));

        tracing::debug!(
            path = %self.path.display(),
            sheet = name,
            rows = rows.len(),
            "sheet read"
        );
        Ok(Some(Grid::new(rows)))
    }
}

/// Text of one spreadsheet cell as the pipeline sees it.
///
/// Whole-number floats lose their fraction (`3.0` → `3`) and date cells are
/// rendered `YYYY-MM-DD HH:MM:SS` so date headers match regardless of how
/// the sheet stores them. Error cells count as empty.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(float_text(*f)),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Some(ndt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Some(float_text(dt.as_f64())),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        _ => None,
    }
}

fn float_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Modification time of `path`, used as the cache fingerprint for a loaded
/// snapshot. `None` when the file is absent.
pub fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Load the workbook named in `config`.
pub fn load_workbook(config: &Config) -> Snapshot {
    load_path(&config.source.workbook, config)
}

/// Load the workbook at `path` with `config`'s tab layout.
///
/// A missing file gives an empty snapshot tagged `SourceMissing`; a file
/// that cannot be opened gives one tagged `SourceUnreadable`.
pub fn load_path(path: &Path, config: &Config) -> Snapshot {
    match WorkbookSource::open(path) {
        Ok(mut source) => pipeline::load(&mut source, config),
        Err(SourceError::NotFound(path)) => {
            tracing::info!(path = %path.display(), "workbook not found, nothing to show");
            Snapshot::empty(LoadDiagnostic::SourceMissing { path })
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "workbook unreadable");
            Snapshot::empty(LoadDiagnostic::SourceUnreadable {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
        }
    }
}
