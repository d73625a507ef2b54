//! Snapshot source trait

use std::sync::Arc;

use crate::store::Snapshot;

/// Anything that can hand out a consistent snapshot of the store
///
/// Permission providers hold one of these and call [`SnapshotSource::snapshot`]
/// when they are created and whenever they are refreshed.
pub trait SnapshotSource: Send + Sync {
    /// Returns the latest published snapshot
    fn snapshot(&self) -> Arc<Snapshot>;
}

/// A fixed snapshot acts as its own source
impl SnapshotSource for Arc<Snapshot> {
    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(self)
    }
}
