//! Search layer — free-text ledger search and status-log filters.
//!
//! These are the queries the board's two grids need: a case-insensitive
//! match across every ledger column, and date/member selection over the
//! status log. Results borrow from the snapshot; nothing is copied.

use crate::types::{DailyStatusLog, DailyStatusRecord, Ledger, LedgerRow};
use chrono::NaiveDate;
use std::collections::BTreeSet;

impl Ledger {
    /// Rows where any column (category label included) contains `term`,
    /// ignoring case. A blank term matches every row.
    pub fn search(&self, term: &str) -> Vec<&LedgerRow> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows
            .iter()
            .filter(|row| row_matches(row, &needle))
            .collect()
    }
}

fn row_matches(row: &LedgerRow, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);
    hit(&row.name)
        || hit(row.category.label())
        || row.tracking_ref.as_deref().is_some_and(hit)
        || row.fields.values().any(|v| hit(v))
}

/// Date and member selection over the status log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    /// Only records on this date.
    pub date: Option<NaiveDate>,
    /// Only records for these members; empty means everyone.
    pub members: Vec<String>,
}

impl StatusFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, member: impl Into<String>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn matches(&self, record: &DailyStatusRecord) -> bool {
        self.date.map_or(true, |d| record.date == d)
            && (self.members.is_empty() || self.members.iter().any(|m| *m == record.member))
    }
}

impl DailyStatusLog {
    /// Distinct section dates, newest first.
    pub fn dates_desc(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.into_iter().rev().collect()
    }

    /// Distinct member names, sorted.
    pub fn members(&self) -> Vec<String> {
        let members: BTreeSet<&str> = self.records.iter().map(|r| r.member.as_str()).collect();
        members.into_iter().map(str::to_string).collect()
    }

    /// Records accepted by `filter`, in log order.
    pub fn filter(&self, filter: &StatusFilter) -> Vec<&DailyStatusRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }
}
