//! Statistics and diagnostics types.

/// Per-target position counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLoad {
    /// Target name.
    pub name: String,
    /// Positions generated for this target when it was added.
    pub positions: usize,
    /// Positions this target currently owns. Lower than `positions` when
    /// a later target took over a colliding position.
    pub owned: usize,
}

/// Structured snapshot of a HashRing, for distribution introspection.
#[derive(Debug, Clone)]
pub struct RingStats {
    /// Number of registered targets.
    pub target_count: usize,
    /// Number of distinct positions on the ring.
    pub position_count: usize,
    /// Total positions generated across all targets, collisions included.
    pub replica_positions: usize,
    /// Per-target counts, in insertion order.
    pub targets: Vec<TargetLoad>,
}

impl RingStats {
    /// Number of generated positions lost to a collision.
    pub fn collisions(&self) -> usize {
        self.replica_positions.saturating_sub(self.position_count)
    }

    /// Average owned positions per target.
    pub fn avg_positions_per_target(&self) -> f64 {
        if self.target_count == 0 {
            return 0.0;
        }
        self.position_count as f64 / self.target_count as f64
    }

    /// Ratio of the largest owned position count to the average.
    ///
    /// A value of 1.0 means every target owns the same share of the ring.
    /// Callers pick their own imbalance threshold, such as 2.0.
    pub fn max_share_ratio(&self) -> f64 {
        let avg = self.avg_positions_per_target();
        if avg == 0.0 {
            return 0.0;
        }
        let max = self.targets.iter().map(|t| t.owned).max().unwrap_or(0);
        max as f64 / avg
    }
}
