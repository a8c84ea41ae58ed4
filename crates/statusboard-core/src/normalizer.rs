//! Ledger normalizer — unions the per-category ledger tabs into one [`Ledger`].
//!
//! Each configured tab is read, its header row renamed through the synonym
//! table, and every data row tagged with the tab's [`Category`]. Tabs keep
//! their own column sets; a column one tab lacks is simply absent on its
//! rows. Absent tabs contribute nothing and are not reported.

use crate::config::{LedgerConfig, Synonym};
use crate::diagnostics::LoadDiagnostic;
use crate::source::{present, Grid, SheetSource};
use crate::types::{Category, Ledger, LedgerRow, CATEGORY_COLUMN};
use std::collections::{BTreeMap, HashSet};

/// Result of normalizing every configured ledger tab.
#[derive(Debug, Clone, Default)]
pub struct LedgerOutcome {
    pub ledger: Ledger,
    /// Tabs that existed but could not be read.
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Read every tab in `config.tabs`, in order, and concatenate their rows.
pub fn normalize<S: SheetSource + ?Sized>(
    source: &mut S,
    config: &LedgerConfig,
    missing_marker: &str,
) -> LedgerOutcome {
    let mut builder = LedgerBuilder::default();
    let mut diagnostics = Vec::new();

    for tab in &config.tabs {
        let grid = match source.read_sheet(&tab.sheet) {
            Ok(Some(grid)) => grid,
            Ok(None) => {
                tracing::debug!(sheet = %tab.sheet, "ledger tab absent, skipping");
                continue;
            }
            Err(err) => {
                tracing::warn!(sheet = %tab.sheet, error = %err, "ledger tab unreadable");
                diagnostics.push(LoadDiagnostic::LedgerTabUnreadable {
                    sheet: tab.sheet.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        let synonyms = config.synonyms.iter().chain(tab.synonyms.iter());
        let rows = builder.push_tab(&grid, tab.category, synonyms, config, missing_marker);
        tracing::debug!(sheet = %tab.sheet, category = %tab.category, rows, "ledger tab read");
    }

    LedgerOutcome {
        ledger: builder.finish(),
        diagnostics,
    }
}

/// Rename headers through `synonyms`, in order.
///
/// A header is renamed only when `from` is present and `to` is not, so a tab
/// that already uses the canonical name is left untouched and no column is
/// ever duplicated. Returns the number of renames applied.
pub fn apply_synonyms<'a>(
    headers: &mut [String],
    synonyms: impl IntoIterator<Item = &'a Synonym>,
) -> usize {
    let mut renamed = 0;
    for syn in synonyms {
        if headers.iter().any(|h| *h == syn.to) {
            continue;
        }
        if let Some(h) = headers.iter_mut().find(|h| **h == syn.from) {
            *h = syn.to.clone();
            renamed += 1;
        }
    }
    renamed
}

/// Header names for a tab's first non-blank row, `width` columns wide.
///
/// Blank headers become `Unnamed: <index>`; repeated headers get a `.1`,
/// `.2`, … suffix so every column name in a tab is unique.
fn header_names(cells: &[Option<String>], width: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    (0..width)
        .map(|i| {
            let base = cells
                .get(i)
                .and_then(|c| c.as_deref())
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unnamed: {i}"));
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{n}");
                n += 1;
            }
            name
        })
        .collect()
}

#[derive(Default)]
struct LedgerBuilder {
    columns: Vec<String>,
    known: HashSet<String>,
    rows: Vec<LedgerRow>,
}

impl LedgerBuilder {
    fn push_tab<'a>(
        &mut self,
        grid: &Grid,
        category: Category,
        synonyms: impl IntoIterator<Item = &'a Synonym>,
        config: &LedgerConfig,
        missing_marker: &str,
    ) -> usize {
        let is_blank = |row: &[Option<String>]| {
            row.iter().all(|c| present(c.as_ref(), missing_marker).is_none())
        };

        let mut rows = grid.rows.iter().skip_while(|r| is_blank(r.as_slice()));
        let Some(header_row) = rows.next() else {
            return 0;
        };

        let mut headers = header_names(header_row, grid.width());
        apply_synonyms(&mut headers, synonyms);

        let before = self.rows.len();
        for row in rows.filter(|r| !is_blank(r.as_slice())) {
            let fields: BTreeMap<String, String> = row
                .iter()
                .enumerate()
                .filter_map(|(i, cell)| {
                    present(cell.as_ref(), missing_marker)
                        .map(|v| (headers[i].clone(), v.to_string()))
                })
                .collect();

            let name = fields.get(&config.name_column).cloned().unwrap_or_default();
            let tracking_ref = fields.get(&config.tracking_column).cloned();
            self.rows.push(LedgerRow {
                name,
                category,
                tracking_ref,
                fields,
            });
        }

        // Named headers always become columns; unnamed ones only when some
        // row of this tab put a value under them.
        for header in &headers {
            let used = !header.starts_with("Unnamed: ")
                || self.rows[before..].iter().any(|r| r.fields.contains_key(header));
            if used && self.known.insert(header.clone()) {
                self.columns.push(header.clone());
            }
        }

        self.rows.len() - before
    }

    fn finish(mut self) -> Ledger {
        if !self.columns.is_empty() && !self.known.contains(CATEGORY_COLUMN) {
            self.columns.push(CATEGORY_COLUMN.to_string());
        }
        Ledger {
            columns: self.columns,
            rows: self.rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
