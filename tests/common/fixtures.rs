//! Workbook fixtures written to disk with `rust_xlsxwriter`.
//!
//! Cells whose text is a plain `YYYY-MM-DD` date are written as real Excel
//! dates, the way the team's workbook stores its section headers; everything
//! else is written as a string.

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use statusboard_core::config::Config;
use statusboard_core::source::Grid;
use std::path::{Path, PathBuf};

pub const LEDGER_3D: &str = "3D Project Ledger";
pub const LEDGER_WEB_SHELL: &str = "WEB-Shell--Project Ledger";
pub const LEDGER_LNOO: &str = "LNOO Venues";
pub const LEDGER_PDA: &str = "PDA Venues";
pub const LEDGER_CONNECTED_CAM: &str = "Connected Camera Venuer";
pub const STATUS_TAB: &str = "2026";

/// Write `sheets` into `dir/name` and return the file path.
pub fn write_workbook(dir: &Path, name: &str, sheets: &[(&str, Grid)]) -> PathBuf {
    let path = dir.join(name);
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();

    for (sheet, grid) in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(*sheet).unwrap();
        for (r, row) in grid.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let Some(text) = cell else { continue };
                let (r, c) = (r as u32, c as u16);
                match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                    Ok(d) => {
                        let dt = ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)
                            .unwrap();
                        ws.write_datetime_with_format(r, c, &dt, &date_format).unwrap();
                    }
                    Err(_) => {
                        ws.write_string(r, c, text).unwrap();
                    }
                }
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}

/// Default configuration pointed at `workbook`.
pub fn config_for(workbook: impl Into<PathBuf>) -> Config {
    Config::defaults().with_workbook(workbook)
}
