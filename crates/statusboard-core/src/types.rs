//! Core types for statusboard-core.
//!
//! This module defines the two tables the pipeline produces: the [`Ledger`]
//! of tracked projects and the [`DailyStatusLog`] of per-member daily entries,
//! together with the [`Category`] provenance tag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the synthetic column that carries a ledger row's category label.
pub const CATEGORY_COLUMN: &str = "Type";

/// Which ledger tab a row was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "three_d")]
    ThreeD,
    #[serde(rename = "web_shell")]
    WebShell,
    #[serde(rename = "lnoo")]
    Lnoo,
    #[serde(rename = "pda")]
    Pda,
    #[serde(rename = "connected_cam")]
    ConnectedCam,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::ThreeD,
        Category::WebShell,
        Category::Lnoo,
        Category::Pda,
        Category::ConnectedCam,
    ];

    /// Human-readable label, as shown in the `Type` column.
    pub fn label(self) -> &'static str {
        match self {
            Category::ThreeD => "3D Project",
            Category::WebShell => "Web Shell",
            Category::Lnoo => "LNOO",
            Category::Pda => "PDA",
            Category::ConnectedCam => "Connected Cam",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// One project or venue from a ledger tab.
///
/// `name` and `tracking_ref` are lifted out of the canonical name and
/// tracking columns after synonym renaming. `fields` keeps every non-missing
/// cell of the source row keyed by its (renamed) header, canonical columns
/// included, so the row can be displayed with its original column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub name: String,
    pub category: Category,
    pub tracking_ref: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl LedgerRow {
    /// Value of `column` for this row. The `Type` column resolves to the
    /// category label; columns the source tab did not have resolve to `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        if column == CATEGORY_COLUMN {
            return Some(self.category.label());
        }
        self.fields.get(column).map(String::as_str)
    }
}

/// All ledger rows across categories, in configured tab order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Union of column names in first-seen order, with `Type` last.
    pub columns: Vec<String>,
    pub rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerRow> {
        self.rows.iter()
    }

    /// Rows tagged with `category`, in ledger order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &LedgerRow> {
        self.rows.iter().filter(move |r| r.category == category)
    }
}

// ---------------------------------------------------------------------------
// Daily status
// ---------------------------------------------------------------------------

/// One team member's entry under one date section of the status tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatusRecord {
    pub date: NaiveDate,
    pub team_lead: String,
    pub member: String,
    pub attendance: String,
    pub project_archive: String,
    pub project_name: String,
    /// Tracking reference of the matching ledger project, or `project_name`
    /// when nothing matched.
    pub tracking_ref: String,
    pub project_status: String,
    pub comments: String,
}

/// Status records in source row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyStatusLog {
    pub records: Vec<DailyStatusRecord>,
}

impl DailyStatusLog {
    pub fn new(records: Vec<DailyStatusRecord>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyStatusRecord> {
        self.records.iter()
    }
}
