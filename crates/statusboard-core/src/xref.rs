//! Cross-reference from a status entry's project name to the ledger.
//!
//! Matching is a case-insensitive substring test: a ledger row matches when
//! its `name` contains the status entry's project name anywhere. The first
//! matching row in ledger order decides the result; later matches are never
//! consulted, even when the first one has no tracking reference.

use crate::types::{Ledger, LedgerRow};

/// Lowercased ledger names, built once per parse.
pub struct CrossReference<'a> {
    entries: Vec<(String, &'a LedgerRow)>,
}

impl<'a> CrossReference<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        let entries = ledger
            .iter()
            .map(|row| (row.name.to_lowercase(), row))
            .collect();
        Self { entries }
    }

    /// First ledger row whose name contains `project_name`, ignoring case.
    pub fn find(&self, project_name: &str) -> Option<&'a LedgerRow> {
        if project_name.is_empty() {
            return None;
        }
        let needle = project_name.to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| name.contains(&needle))
            .map(|(_, row)| *row)
    }

    /// Tracking reference for `project_name`.
    ///
    /// Falls back to `project_name` itself when nothing matches or the first
    /// match carries no tracking reference, so the result is only empty when
    /// `project_name` is.
    pub fn tracking_ref(&self, project_name: &str) -> String {
        self.find(project_name)
            .and_then(|row| row.tracking_ref.as_deref())
            .filter(|r| !r.is_empty())
            .unwrap_or(project_name)
            .to_string()
    }
}
