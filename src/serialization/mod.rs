//! Persisted game progress.
//!
//! A snapshot is one flat JSON array: a `{x, y, value}` record per cell
//! followed by a `{score}` record. [`SnapshotStore`] keeps a single snapshot
//! in a file; malformed data is never restored.

mod snapshot;
mod store;

pub use snapshot::{
    SavedCell,
    Snapshot,
    SnapshotEntry,
    SnapshotError,
};
pub use store::{SnapshotStore, DEFAULT_SNAPSHOT_FILE};
