//! The cached snapshot the server and CLI read from.
//!
//! A [`SnapshotStore`] holds at most one [`Snapshot`] together with the
//! fingerprint (workbook modification time) it was loaded under. Reads reuse
//! the cached snapshot until the fingerprint changes or [`SnapshotStore::refresh`]
//! is called. Snapshots are handed out as `Arc`s and never mutated.

use statusboard_core::config::Config;
use statusboard_core::Snapshot;
use std::sync::Arc;
use std::time::SystemTime;

/// Something that can produce a snapshot and say whether it would differ from
/// the last one.
pub trait SnapshotLoader: Send {
    /// Identity of the underlying data. `None` when there is nothing to read.
    fn fingerprint(&self) -> Option<SystemTime>;

    fn load(&self) -> Snapshot;
}

/// Loads the workbook named in a [`Config`].
pub struct WorkbookLoader {
    config: Config,
}

impl WorkbookLoader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl SnapshotLoader for WorkbookLoader {
    fn fingerprint(&self) -> Option<SystemTime> {
        statusboard_sheets::modified(&self.config.source.workbook)
    }

    fn load(&self) -> Snapshot {
        statusboard_sheets::load_workbook(&self.config)
    }
}

struct Cached {
    fingerprint: Option<SystemTime>,
    snapshot: Arc<Snapshot>,
}

pub struct SnapshotStore {
    loader: Box<dyn SnapshotLoader>,
    cached: Option<Cached>,
    loads: u64,
}

impl SnapshotStore {
    pub fn new(loader: impl SnapshotLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cached: None,
            loads: 0,
        }
    }

    pub fn for_config(config: Config) -> Self {
        Self::new(WorkbookLoader::new(config))
    }

    /// Current snapshot, reloading first if the source changed since the last
    /// load (or nothing has been loaded yet).
    pub fn get(&mut self) -> Arc<Snapshot> {
        let fingerprint = self.loader.fingerprint();
        match &self.cached {
            Some(c) if c.fingerprint == fingerprint => Arc::clone(&c.snapshot),
            Some(_) => {
                tracing::debug!("workbook changed, reloading");
                self.reload(fingerprint)
            }
            None => self.reload(fingerprint),
        }
    }

    /// Drop the cached snapshot and load again unconditionally.
    pub fn refresh(&mut self) -> Arc<Snapshot> {
        self.invalidate();
        let fingerprint = self.loader.fingerprint();
        self.reload(fingerprint)
    }

    /// Forget the cached snapshot; the next [`get`](Self::get) reloads.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of loads performed so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    fn reload(&mut self, fingerprint: Option<SystemTime>) -> Arc<Snapshot> {
        let snapshot = Arc::new(self.loader.load());
        self.loads += 1;
        self.cached = Some(Cached {
            fingerprint,
            snapshot: Arc::clone(&snapshot),
        });
        snapshot
    }
}
