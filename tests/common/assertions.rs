//! Domain-specific assertion macros for statusboard harnesses.
//!
//! These wrap `pretty_assertions` and say which record or row broke, so a
//! failure in a 40-row fixture points straight at the culprit.

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert text fields of a `DailyStatusRecord`.
///
/// ```rust
/// assert_record!(log.records[0], member = "Ana", tracking_ref = "JIRA-42");
/// ```
#[macro_export]
macro_rules! assert_record {
    ($record:expr, $($field:ident = $value:expr),+ $(,)?) => {{
        let record: &statusboard_core::DailyStatusRecord = &$record;
        $(
            pretty_assertions::assert_eq!(
                record.$field.as_str(),
                $value,
                "record field `{}` mismatch in {:?}",
                stringify!($field),
                record
            );
        )+
    }};
}

/// Assert every record in a slice or log falls under `date`.
#[macro_export]
macro_rules! assert_all_dated {
    ($records:expr, $date:expr) => {{
        let date: chrono::NaiveDate = $date;
        for (i, record) in $records.iter().enumerate() {
            if record.date != date {
                panic!(
                    "assert_all_dated! failed: record {} ({:?}) dated {}, expected {}",
                    i, record.member, record.date, date
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Ledger assertions
// ---------------------------------------------------------------------------

/// Assert the category of every ledger row, in order.
#[macro_export]
macro_rules! assert_categories {
    ($ledger:expr, [$($category:expr),* $(,)?]) => {{
        let actual: Vec<statusboard_core::Category> =
            $ledger.iter().map(|row| row.category).collect();
        let expected: Vec<statusboard_core::Category> = vec![$($category),*];
        pretty_assertions::assert_eq!(actual, expected, "ledger categories in row order");
    }};
}

// ---------------------------------------------------------------------------
// Diagnostic assertions
// ---------------------------------------------------------------------------

/// Assert that status row `row` (1-based) was skipped for `reason`.
#[macro_export]
macro_rules! assert_skipped {
    ($skipped:expr, $row:expr, $reason:expr) => {{
        let row: usize = $row;
        let reason: statusboard_core::SkipReason = $reason;
        match $skipped.iter().find(|d| d.row == row) {
            Some(d) if d.reason == reason => {}
            Some(d) => panic!(
                "assert_skipped! failed: row {} skipped for {:?}, expected {:?}",
                row, d.reason, reason
            ),
            None => panic!(
                "assert_skipped! failed: row {} not skipped.\n  Skipped rows: {:?}",
                row, $skipped
            ),
        }
    }};
}
