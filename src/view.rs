use crate::hash::Position;
use hashbrown::HashMap;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use tracing::trace;

struct Positions {
    sorted: Vec<Position>,
    valid: bool,
}

/// Lazily rebuilt, ascending view of every position on the ring.
///
/// Mutations only mark the view dirty. The first lookup afterwards sorts the
/// positions again, so a run of adds costs one sort instead of one per add.
pub(crate) struct SortedView {
    inner: RwLock<Positions>,
}

impl SortedView {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Positions {
                sorted: Vec::new(),
                valid: false,
            }),
        }
    }

    /// Mark the view stale. Requires exclusive access, so no reader can be
    /// holding the old positions.
    pub fn invalidate(&mut self) {
        self.inner.get_mut().valid = false;
    }

    /// Whether the view matches the current position map.
    pub fn is_valid(&self) -> bool {
        self.inner.read_recursive().valid
    }

    /// Get the sorted positions, rebuilding them from `source` first if stale.
    pub fn current<'a>(
        &'a self,
        source: &HashMap<Position, Arc<str>>,
    ) -> MappedRwLockReadGuard<'a, [Position]> {
        // Recursive read: the caller may already hold a guard from an
        // outstanding `Successors`, and a queued writer must not block it.
        let guard = self.inner.read_recursive();
        if guard.valid {
            return RwLockReadGuard::map(guard, |p| p.sorted.as_slice());
        }
        drop(guard);

        let mut guard = self.inner.write();
        // Another reader may have rebuilt it between the two locks.
        if !guard.valid {
            guard.sorted.clear();
            guard.sorted.extend(source.keys().copied());
            guard.sorted.sort_unstable();
            guard.valid = true;
            trace!(positions = guard.sorted.len(), "rebuilt sorted view");
        }
        let guard = RwLockWriteGuard::downgrade(guard);
        RwLockReadGuard::map(guard, |p| p.sorted.as_slice())
    }
}

impl Default for SortedView {
    fn default() -> Self {
        Self::new()
    }
}
