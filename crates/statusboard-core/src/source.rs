//! Read access to the named tabs of a workbook.
//!
//! A tab is handed to the pipeline as a [`Grid`]: rows of optional text
//! cells, column positions preserved from the spreadsheet. File-format
//! backends live in `statusboard-sheets`; [`MemorySource`] serves fixtures.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One tab's cells. `None` marks an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Build a grid from string literals; `""` becomes an empty cell.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let cell = cell.as_ref();
                        (!cell.is_empty()).then(|| cell.to_string())
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Extend every row with empty cells up to `width` columns.
    pub fn pad_to(&mut self, width: usize) {
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, None);
            }
        }
    }
}

/// Trimmed text of a cell, or `None` when it is empty, blank, or equal to
/// the workbook's missing-value marker.
pub fn present<'a>(cell: Option<&'a String>, missing_marker: &str) -> Option<&'a str> {
    cell.map(|c| c.trim())
        .filter(|c| !c.is_empty() && *c != missing_marker)
}

/// Errors raised by a [`SheetSource`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("workbook not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to open workbook {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },
    #[error("failed to read sheet {sheet:?}: {message}")]
    Sheet { sheet: String, message: String },
}

/// Read access to the tabs of one workbook.
pub trait SheetSource {
    /// Tab names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read a whole tab. `Ok(None)` when the workbook has no such tab.
    fn read_sheet(&mut self, name: &str) -> Result<Option<Grid>, SourceError>;
}

/// An in-memory workbook.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: BTreeMap<String, Grid>,
    order: Vec<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: Grid) -> Self {
        self.insert(name, grid);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, grid: Grid) {
        let name = name.into();
        if !self.sheets.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.sheets.insert(name, grid);
    }
}

impl SheetSource for MemorySource {
    fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Option<Grid>, SourceError> {
        Ok(self.sheets.get(name).cloned())
    }
}
