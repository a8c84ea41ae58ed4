//! Serializes status records or ledger rows for download.
//!
//! Export works on whatever slice the caller hands it, so a filtered or
//! user-edited copy of the status log exports exactly as displayed.
//!
//! Formats:
//! - `csv`: header row, then one row per record.
//! - `jsonl`: one JSON object per line.

use crate::types::{DailyStatusRecord, LedgerRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Column headers of a status CSV export, in field order.
pub const STATUS_HEADERS: [&str; 9] = [
    "Date",
    "Team Lead",
    "Member",
    "Attendance",
    "Project Archive",
    "Project Name",
    "Tracking Ref",
    "Project Status",
    "Comments",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Jsonl => "jsonl",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Jsonl => "application/x-ndjson",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            other => Err(format!("unknown export format: {other} (expected csv or jsonl)")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Write status records to `out`.
pub fn write_status<'a, W: Write>(
    records: impl IntoIterator<Item = &'a DailyStatusRecord>,
    format: ExportFormat,
    mut out: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(STATUS_HEADERS)?;
            for r in records {
                let date = r.date.format("%Y-%m-%d").to_string();
                wtr.write_record([
                    date.as_str(),
                    r.team_lead.as_str(),
                    r.member.as_str(),
                    r.attendance.as_str(),
                    r.project_archive.as_str(),
                    r.project_name.as_str(),
                    r.tracking_ref.as_str(),
                    r.project_status.as_str(),
                    r.comments.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        ExportFormat::Jsonl => {
            for r in records {
                serde_json::to_writer(&mut out, r)?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

/// Write ledger rows to `out`, one column per entry of `columns`.
///
/// Columns a row does not have are written as empty cells (CSV) or left out
/// of the object (JSONL).
pub fn write_ledger<'a, W: Write>(
    columns: &[String],
    rows: impl IntoIterator<Item = &'a LedgerRow>,
    format: ExportFormat,
    mut out: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(columns)?;
            for row in rows {
                wtr.write_record(columns.iter().map(|c| row.get(c).unwrap_or("")))?;
            }
            wtr.flush()?;
        }
        ExportFormat::Jsonl => {
            for row in rows {
                let obj: serde_json::Map<String, serde_json::Value> = columns
                    .iter()
                    .filter_map(|c| row.get(c).map(|v| (c.clone(), v.into())))
                    .collect();
                serde_json::to_writer(&mut out, &obj)?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

/// [`write_status`] into a `String`.
pub fn status_to_string<'a>(
    records: impl IntoIterator<Item = &'a DailyStatusRecord>,
    format: ExportFormat,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_status(records, format, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// [`write_ledger`] into a `String`.
pub fn ledger_to_string<'a>(
    columns: &[String],
    rows: impl IntoIterator<Item = &'a LedgerRow>,
    format: ExportFormat,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_ledger(columns, rows, format, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn record(member: &str, comments: &str) -> DailyStatusRecord {
        DailyStatusRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
            team_lead: "Rae".into(),
            member: member.into(),
            attendance: "Present".into(),
            project_archive: String::new(),
            project_name: "Dome".into(),
            tracking_ref: "3D-1".into(),
            project_status: "In Process".into(),
            comments: comments.into(),
        }
    }

    #[test]
    fn empty_csv_export_is_just_the_header() {
        let none: [DailyStatusRecord; 0] = [];
        let out = status_to_string(&none, ExportFormat::Csv).unwrap();
        assert_eq!(
            out,
            "Date,Team Lead,Member,Attendance,Project Archive,Project Name,Tracking Ref,Project Status,Comments\n"
        );
        assert_eq!(status_to_string(&none, ExportFormat::Jsonl).unwrap(), "");
    }

    #[test]
    fn csv_quotes_cells_with_delimiters() {
        let records = [record("Ana", "textures, then UVs")];
        let out = status_to_string(&records, ExportFormat::Csv).unwrap();
        let line = out.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "2026-02-09,Rae,Ana,Present,,Dome,3D-1,In Process,\"textures, then UVs\""
        );
    }

    #[test]
    fn jsonl_writes_one_object_per_record() {
        let records = [record("Ana", ""), record("Ben", "")];
        let out = status_to_string(&records, ExportFormat::Jsonl).unwrap();
        let parsed: Vec<DailyStatusRecord> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed, records.to_vec());
    }

    #[test]
    fn ledger_csv_fills_absent_columns_with_blanks() {
        let row = LedgerRow {
            name: "Dome".into(),
            category: Category::Pda,
            tracking_ref: None,
            fields: BTreeMap::from([("Name of project".to_string(), "Dome".to_string())]),
        };
        let columns: Vec<String> = ["Name of project", "JIRA", "Type"].map(String::from).to_vec();
        let out = ledger_to_string(&columns, [&row], ExportFormat::Csv).unwrap();
        assert_eq!(out, "Name of project,JIRA,Type\nDome,,PDA\n");
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("ndjson".parse::<ExportFormat>(), Ok(ExportFormat::Jsonl));
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
