//! Diagnostics collected while loading a workbook.
//!
//! Nothing in the load path returns an error to the caller. Problems with a
//! whole tab become a [`LoadDiagnostic`]; problems with a single status row
//! become a [`RowDiagnostic`] and parsing carries on with the next row.

use serde::Serialize;
use std::path::PathBuf;

/// Why a status-tab row produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The row appeared before any date header.
    BeforeFirstDate,
    /// The first cell looked like a date header but is not a calendar date.
    InvalidDateHeader(String),
    /// Member cell empty or equal to the missing marker.
    MissingMember,
    /// Member cell equals the column header label.
    HeaderRow,
    /// First cell carries the note marker.
    NoteRow,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::BeforeFirstDate => write!(f, "row precedes the first date header"),
            SkipReason::InvalidDateHeader(text) => write!(f, "invalid date header {text:?}"),
            SkipReason::MissingMember => write!(f, "no member"),
            SkipReason::HeaderRow => write!(f, "column header row"),
            SkipReason::NoteRow => write!(f, "note row"),
        }
    }
}

/// A skipped status row. `row` is the 1-based spreadsheet row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDiagnostic {
    pub row: usize,
    pub reason: SkipReason,
}

/// A problem that emptied all or part of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadDiagnostic {
    /// The workbook file does not exist. Informational: both tables are empty.
    SourceMissing { path: PathBuf },
    /// The workbook exists but could not be opened.
    SourceUnreadable { path: PathBuf, message: String },
    StatusTabMissing { sheet: String },
    StatusTabUnreadable { sheet: String, message: String },
    LedgerTabUnreadable { sheet: String, message: String },
}

impl LoadDiagnostic {
    /// `SourceMissing` is expected on a fresh install and is not a fault.
    pub fn is_informational(&self) -> bool {
        matches!(self, LoadDiagnostic::SourceMissing { .. })
    }
}

impl std::fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadDiagnostic::SourceMissing { path } => {
                write!(f, "workbook {} not found", path.display())
            }
            LoadDiagnostic::SourceUnreadable { path, message } => {
                write!(f, "workbook {} could not be opened: {message}", path.display())
            }
            LoadDiagnostic::StatusTabMissing { sheet } => {
                write!(f, "no status tab named {sheet:?}")
            }
            LoadDiagnostic::StatusTabUnreadable { sheet, message } => {
                write!(f, "status tab {sheet:?} could not be read: {message}")
            }
            LoadDiagnostic::LedgerTabUnreadable { sheet, message } => {
                write!(f, "ledger tab {sheet:?} could not be read: {message}")
            }
        }
    }
}
