//! statusboard — project ledger and daily status board.
//!
//! The heavy lifting lives in `statusboard-core` (normalization, parsing,
//! search, export) and `statusboard-sheets` (workbook reading). This crate
//! adds the two presentation-side layers so the binary and the integration
//! harnesses share them:
//!
//! ```text
//! workbook ──► SnapshotStore ──► serve (HTTP) / CLI
//! ```

pub mod serve;
pub mod store;
