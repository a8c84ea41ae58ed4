#![allow(unused)]
//! Snapshot store harness: caching against a workbook on disk.
//!
//! # What this covers
//!
//! - **Cache hit**: an untouched workbook is loaded once, however many reads.
//! - **Change detection**: a new modification time reloads on the next read.
//! - **Refresh**: forces a reload even when nothing changed.
//! - **Late workbook**: a store that started with no file picks it up once it
//!   appears.
//!
//! # Running
//!
//! ```sh
//! cargo test --test store_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use statusboard::store::SnapshotStore;
use statusboard_core::LoadDiagnostic;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

fn one_member_workbook(dir: &Path, member: &str) -> std::path::PathBuf {
    let status = StatusTabBuilder::new()
        .date("2026-02-09")
        .member("Rae", member, "Present", "")
        .build();
    write_workbook(dir, "board.xlsx", &[(STATUS_TAB, status)])
}

fn set_mtime(path: &Path, secs_after_epoch: u64) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs_after_epoch))
        .unwrap();
}

#[test]
fn untouched_workbook_is_loaded_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = one_member_workbook(dir.path(), "Ana");
    let mut store = SnapshotStore::for_config(config_for(&path));

    let first = store.get();
    let second = store.get();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.loads(), 1);
    assert_record!(first.status.records[0], member = "Ana");
}

#[test]
fn rewritten_workbook_is_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = one_member_workbook(dir.path(), "Ana");
    set_mtime(&path, 1_000);
    let mut store = SnapshotStore::for_config(config_for(&path));
    let first = store.get();
    assert_record!(first.status.records[0], member = "Ana");

    one_member_workbook(dir.path(), "Ben");
    set_mtime(&path, 2_000);

    let second = store.get();
    assert_record!(second.status.records[0], member = "Ben");
    assert_eq!(store.loads(), 2);
}

#[test]
fn refresh_reloads_unchanged_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = one_member_workbook(dir.path(), "Ana");
    let mut store = SnapshotStore::for_config(config_for(&path));

    let before = store.get();
    let after = store.refresh();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.status, after.status);
    assert_eq!(store.loads(), 2);
    // Refresh leaves a fresh cache behind.
    store.get();
    assert_eq!(store.loads(), 2);
}

#[test]
fn workbook_created_after_start_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.xlsx");
    let mut store = SnapshotStore::for_config(config_for(&path));

    let empty = store.get();
    assert!(matches!(
        &empty.diagnostics[..],
        [LoadDiagnostic::SourceMissing { .. }]
    ));

    one_member_workbook(dir.path(), "Ana");
    let loaded = store.get();
    assert_eq!(loaded.status.len(), 1);
    assert!(loaded.diagnostics.iter().all(|d| !d.is_informational()));
}
