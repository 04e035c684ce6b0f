use crate::hash::Position;
use hashbrown::{HashMap, HashSet};
use parking_lot::MappedRwLockReadGuard;
use std::sync::Arc;

/// Iterator over the distinct targets that follow a resource on the ring.
///
/// Starts at the first position strictly greater than the resource's
/// position (wrapping to the lowest position when there is none) and walks
/// the ring once, yielding each owning target the first time it is seen.
/// The order is precedence order: primary owner first, then fallbacks.
///
/// The iterator holds a read lock on the ring's sorted view. The ring cannot
/// be mutated while it is alive, since mutation needs `&mut HashRing`.
pub struct Successors<'a> {
    owners: &'a HashMap<Position, Arc<str>>,
    positions: MappedRwLockReadGuard<'a, [Position]>,
    next: usize,
    steps_left: usize,
    seen: HashSet<&'a str>,
    live_targets: usize,
}

impl<'a> Successors<'a> {
    pub(crate) fn new(
        owners: &'a HashMap<Position, Arc<str>>,
        positions: MappedRwLockReadGuard<'a, [Position]>,
        resource_position: Position,
        live_targets: usize,
    ) -> Self {
        // Upper bound: first position strictly greater than the resource.
        let mut start = positions.partition_point(|&p| p <= resource_position);
        if start == positions.len() {
            start = 0;
        }
        let steps_left = positions.len();

        Self {
            owners,
            positions,
            next: start,
            steps_left,
            seen: HashSet::with_capacity(live_targets),
            live_targets,
        }
    }
}

impl<'a> Iterator for Successors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let owners = self.owners;

        while self.steps_left > 0 && self.seen.len() < self.live_targets {
            let position = self.positions[self.next];
            self.next += 1;
            if self.next == self.positions.len() {
                self.next = 0;
            }
            self.steps_left -= 1;

            if let Some(owner) = owners.get(&position) {
                let owner: &'a str = owner;
                if self.seen.insert(owner) {
                    return Some(owner);
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.live_targets.saturating_sub(self.seen.len());
        (0, Some(remaining.min(self.steps_left)))
    }
}
