//! statusboard-core — ledger normalization and daily status parsing.
//!
//! This crate turns the tabs of a team workbook into two read-only tables:
//! the project [`Ledger`] and the [`DailyStatusLog`]. It knows nothing about
//! file formats; workbooks are read through the [`source::SheetSource`] trait.
//!
//! # Pipeline
//!
//! ```text
//! SheetSource ──► normalizer ──► Ledger ─────────┐
//!      │                            │            ├──► Snapshot ──► search / export
//!      └────────► status ◄── xref ◄─┘            │
//!                   └──► DailyStatusLog ─────────┘
//! ```
//!
//! Everything here is synchronous. [`pipeline::load`] never fails: missing
//! tabs and malformed rows turn into diagnostics on the returned snapshot.

pub mod config;
pub mod diagnostics;
pub mod export;
pub mod normalizer;
pub mod pipeline;
pub mod search;
pub mod source;
pub mod status;
pub mod types;
pub mod xref;

pub use diagnostics::{LoadDiagnostic, RowDiagnostic, SkipReason};
pub use pipeline::Snapshot;
pub use types::{Category, DailyStatusLog, DailyStatusRecord, Ledger, LedgerRow};
