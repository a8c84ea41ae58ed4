//! Test builders — status tabs, ledger tabs and records.
//!
//! These are for readability in tests, not production use. They panic on
//! invalid input rather than returning `Result`.

use chrono::NaiveDate;
use statusboard_core::config::StatusColumns;
use statusboard_core::source::Grid;
use statusboard_core::DailyStatusRecord;

// ---------------------------------------------------------------------------
// StatusTabBuilder
// ---------------------------------------------------------------------------

/// Builds a status tab laid out in the default column positions.
///
/// ```rust
/// let grid = StatusTabBuilder::new()
///     .date("2026-02-09")
///     .header()
///     .member("Rae", "Ana", "Present", "Stadium Alpha")
///     .note("Note: Ben on leave")
///     .build();
/// ```
pub struct StatusTabBuilder {
    columns: StatusColumns,
    rows: Vec<Vec<Option<String>>>,
}

impl Default for StatusTabBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTabBuilder {
    pub fn new() -> Self {
        Self {
            columns: statusboard_core::config::Config::defaults().status.columns,
            rows: Vec::new(),
        }
    }

    fn blank(&self) -> Vec<Option<String>> {
        vec![None; self.columns.width()]
    }

    /// Section header row with `text` in the first cell.
    pub fn date(mut self, text: &str) -> Self {
        let mut row = self.blank();
        row[self.columns.marker] = Some(text.to_string());
        self.rows.push(row);
        self
    }

    /// The repeated column-header row (`Member` in the member column).
    pub fn header(mut self) -> Self {
        let mut row = self.blank();
        row[self.columns.team_lead] = Some("Team Lead".into());
        row[self.columns.member] = Some("Member".into());
        row[self.columns.attendance] = Some("Attendance".into());
        row[self.columns.project_name] = Some("Project Name".into());
        self.rows.push(row);
        self
    }

    pub fn member(mut self, lead: &str, member: &str, attendance: &str, project: &str) -> Self {
        let mut row = self.blank();
        let cols = self.columns;
        for (i, v) in [
            (cols.team_lead, lead),
            (cols.member, member),
            (cols.attendance, attendance),
            (cols.project_name, project),
        ] {
            if !v.is_empty() {
                row[i] = Some(v.to_string());
            }
        }
        self.rows.push(row);
        self
    }

    /// Set status and comments on the last row.
    pub fn with_status(mut self, status: &str, comments: &str) -> Self {
        let cols = self.columns;
        let row = self.rows.last_mut().expect("with_status after a row");
        row[cols.project_status] = Some(status.to_string());
        row[cols.comments] = Some(comments.to_string());
        self
    }

    pub fn note(mut self, text: &str) -> Self {
        let mut row = self.blank();
        row[self.columns.marker] = Some(text.to_string());
        self.rows.push(row);
        self
    }

    pub fn blank_row(mut self) -> Self {
        let row = self.blank();
        self.rows.push(row);
        self
    }

    pub fn build(self) -> Grid {
        Grid::new(self.rows)
    }
}

// ---------------------------------------------------------------------------
// Ledger tabs
// ---------------------------------------------------------------------------

/// A ledger tab: header row followed by data rows. Empty strings are blank
/// cells.
pub fn ledger_tab(headers: &[&str], rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        std::iter::once(headers.to_vec()).chain(rows.iter().map(|r| r.to_vec())),
    )
}

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`DailyStatusRecord`] fixtures.
pub struct RecordBuilder {
    record: DailyStatusRecord,
}

impl RecordBuilder {
    pub fn new(member: &str) -> Self {
        Self {
            record: DailyStatusRecord {
                date: date(2026, 2, 9),
                team_lead: String::new(),
                member: member.to_string(),
                attendance: "Present".to_string(),
                project_archive: String::new(),
                project_name: String::new(),
                tracking_ref: String::new(),
                project_status: "In Process".to_string(),
                comments: String::new(),
            },
        }
    }

    pub fn on(mut self, y: i32, m: u32, d: u32) -> Self {
        self.record.date = date(y, m, d);
        self
    }

    pub fn lead(mut self, lead: &str) -> Self {
        self.record.team_lead = lead.to_string();
        self
    }

    pub fn attendance(mut self, attendance: &str) -> Self {
        self.record.attendance = attendance.to_string();
        self
    }

    /// Project name; the tracking ref follows it unless set separately.
    pub fn project(mut self, name: &str) -> Self {
        self.record.project_name = name.to_string();
        if self.record.tracking_ref.is_empty() {
            self.record.tracking_ref = name.to_string();
        }
        self
    }

    pub fn tracking(mut self, tracking_ref: &str) -> Self {
        self.record.tracking_ref = tracking_ref.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.record.project_status = status.to_string();
        self
    }

    pub fn comments(mut self, comments: &str) -> Self {
        self.record.comments = comments.to_string();
        self
    }

    pub fn build(self) -> DailyStatusRecord {
        self.record
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
