use crate::config::{create_hasher, Config, MAX_REPLICAS};
use crate::error::Error;
use crate::hash::{Position, RingHasher};
use crate::iter::Successors;
use crate::stats::{RingStats, TargetLoad};
use crate::view::SortedView;
use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Consistent hashing ring mapping resource keys to named targets.
///
/// Each target is hashed onto the ring at several positions (its replicas).
/// A resource belongs to the owner of the first position after its own hash,
/// wrapping around at the end of the ring. Adding or removing a target only
/// moves the resources that fall next to that target's positions.
///
/// Lookups take `&self`. The ring does no locking of its own for mutation;
/// to share it across threads, put it behind a read-write lock and use
/// lookups as readers and add/remove as writers.
///
/// # Example
///
/// ```rust
/// use hashspace::HashRing;
///
/// let mut ring = HashRing::new();
/// ring.add_targets(["cache-a", "cache-b", "cache-c"])?;
///
/// let primary = ring.lookup("user:42")?;
/// let replicas = ring.lookup_list("user:42", 2)?;
/// assert_eq!(replicas[0], primary);
/// # Ok::<(), hashspace::Error>(())
/// ```
pub struct HashRing {
    replicas: usize,
    hasher: Box<dyn RingHasher>,
    position_to_target: HashMap<Position, Arc<str>>,
    target_to_positions: HashMap<Arc<str>, Vec<Position>>,
    order: Vec<Arc<str>>,
    sorted: SortedView,
}

impl HashRing {
    /// Create a new ring with defaults (64 replicas, CRC-32).
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new ring with custom config.
    pub fn with_config(config: Config) -> Self {
        Self {
            replicas: config.replicas,
            hasher: create_hasher(config.hasher),
            position_to_target: HashMap::new(),
            target_to_positions: HashMap::new(),
            order: Vec::new(),
            sorted: SortedView::new(),
        }
    }

    /// Create a new ring with the given hasher and base replica count.
    pub fn with_hasher<H: RingHasher + 'static>(hasher: H, replicas: usize) -> Result<Self, Error> {
        Ok(Self::with_config(Config::new().replicas(replicas)?.hasher(hasher)))
    }

    /// Add a target with weight 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashspace::{Error, HashRing};
    ///
    /// let mut ring = HashRing::new();
    /// ring.add_target("t-a")?.add_target("t-b")?;
    /// assert_eq!(ring.all_targets(), vec!["t-a", "t-b"]);
    ///
    /// assert_eq!(
    ///     ring.add_target("t-a").unwrap_err(),
    ///     Error::DuplicateTarget("t-a".to_string())
    /// );
    /// # Ok::<(), hashspace::Error>(())
    /// ```
    pub fn add_target(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.add_target_with_weight(name, 1.0)
    }

    /// Add a target whose replica count is `round(replicas * weight)`.
    ///
    /// Replica `i` sits at `hash(name + i)`. A position already held by
    /// another target is taken over by this one. Weight 0 registers a target
    /// with no positions. Fails with [`Error::InvalidWeight`] when the
    /// replica count would exceed [`MAX_REPLICAS`].
    pub fn add_target_with_weight(&mut self, name: &str, weight: f64) -> Result<&mut Self, Error> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight(weight));
        }
        let replicas = (self.replicas as f64 * weight).round();
        if replicas > MAX_REPLICAS as f64 {
            return Err(Error::InvalidWeight(weight));
        }
        if self.target_to_positions.contains_key(name) {
            return Err(Error::DuplicateTarget(name.to_string()));
        }

        let target: Arc<str> = Arc::from(name);
        let count = replicas as usize;
        let mut positions = Vec::with_capacity(count);

        for i in 0..count {
            let position = self.hasher.hash(&format!("{}{}", name, i));
            self.position_to_target.insert(position, target.clone());
            positions.push(position);
        }

        self.target_to_positions.insert(target.clone(), positions);
        self.order.push(target);
        self.sorted.invalidate();

        debug!(target_name = name, weight, replicas = count, "added target to ring");
        Ok(self)
    }

    /// Add several targets with weight 1, in order.
    ///
    /// Not atomic: if a later name fails, the targets added before it stay
    /// on the ring.
    pub fn add_targets<I, S>(&mut self, names: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_targets_with_weight(names, 1.0)
    }

    /// Add several targets with the same weight, in order. Not atomic.
    pub fn add_targets_with_weight<I, S>(
        &mut self,
        names: I,
        weight: f64,
    ) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_target_with_weight(name.as_ref(), weight)?;
        }
        Ok(self)
    }

    /// Remove a target and every position it still owns.
    ///
    /// Positions the target lost to a later target on insert stay with
    /// that later target.
    pub fn remove_target(&mut self, name: &str) -> Result<&mut Self, Error> {
        let positions = self
            .target_to_positions
            .remove(name)
            .ok_or_else(|| Error::TargetNotFound(name.to_string()))?;

        for position in &positions {
            let owned = self
                .position_to_target
                .get(position)
                .is_some_and(|owner| owner.as_ref() == name);
            if owned {
                self.position_to_target.remove(position);
            }
        }

        self.order.retain(|target| target.as_ref() != name);
        self.sorted.invalidate();

        debug!(target_name = name, positions = positions.len(), "removed target from ring");
        Ok(self)
    }

    /// All registered targets, in the order they were added.
    pub fn all_targets(&self) -> Vec<&str> {
        self.order.iter().map(|target| target.as_ref()).collect()
    }

    /// Find the target that owns `resource`.
    ///
    /// Fails with [`Error::EmptyRing`] when the ring has no targets.
    pub fn lookup(&self, resource: &str) -> Result<&str, Error> {
        self.lookup_list(resource, 1)?
            .into_iter()
            .next()
            .ok_or(Error::EmptyRing)
    }

    /// Find up to `requested_count` distinct targets for `resource`, in order
    /// of precedence.
    ///
    /// Returns fewer when fewer targets exist, and an empty list when the
    /// ring is empty. Fails with [`Error::InvalidCount`] when
    /// `requested_count` is 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashspace::HashRing;
    ///
    /// let mut ring = HashRing::new();
    /// assert!(ring.lookup_list("resource", 2)?.is_empty());
    ///
    /// ring.add_targets(["target1", "target2"])?;
    /// let targets = ring.lookup_list("resource", 4)?;
    /// assert_eq!(targets.len(), 2);
    /// assert_ne!(targets[0], targets[1]);
    /// # Ok::<(), hashspace::Error>(())
    /// ```
    pub fn lookup_list(&self, resource: &str, requested_count: usize) -> Result<Vec<&str>, Error> {
        if requested_count == 0 {
            return Err(Error::InvalidCount);
        }
        if self.position_to_target.is_empty() {
            return Ok(Vec::new());
        }
        if self.order.len() == 1 {
            return Ok(vec![self.order[0].as_ref()]);
        }

        Ok(self.successors(resource).take(requested_count).collect())
    }

    /// Lazily walk the distinct targets for `resource` in precedence order.
    pub fn successors(&self, resource: &str) -> Successors<'_> {
        let positions = self.sorted.current(&self.position_to_target);
        let resource_position = self.hasher.hash(resource);
        Successors::new(
            &self.position_to_target,
            positions,
            resource_position,
            self.order.len(),
        )
    }

    /// Replace the hasher.
    ///
    /// Only allowed while the ring has no targets, since positions computed
    /// by different hashers are not comparable.
    pub fn set_hasher<H: RingHasher + 'static>(&mut self, hasher: H) -> Result<(), Error> {
        if !self.order.is_empty() {
            return Err(Error::RingNotEmpty);
        }
        self.hasher = Box::new(hasher);
        self.sorted.invalidate();
        Ok(())
    }

    /// Number of registered targets.
    pub fn target_count(&self) -> usize {
        self.order.len()
    }

    /// Number of distinct positions on the ring.
    pub fn position_count(&self) -> usize {
        self.position_to_target.len()
    }

    /// Check if the ring has no targets.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check if a target is registered.
    pub fn contains_target(&self, name: &str) -> bool {
        self.target_to_positions.contains_key(name)
    }

    /// Positions generated for a target when it was added.
    pub fn positions_of(&self, name: &str) -> Option<&[Position]> {
        self.target_to_positions.get(name).map(Vec::as_slice)
    }

    /// Base number of replicas for a target of weight 1.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Whether the sorted view is current. Any add or remove clears it; the
    /// next lookup rebuilds it.
    pub fn is_sorted(&self) -> bool {
        self.sorted.is_valid()
    }

    /// Get per-target statistics about the ring.
    pub fn stats(&self) -> RingStats {
        let mut owned: HashMap<&str, usize> = HashMap::with_capacity(self.order.len());
        for owner in self.position_to_target.values() {
            *owned.entry(owner.as_ref()).or_insert(0) += 1;
        }

        let targets: Vec<TargetLoad> = self
            .order
            .iter()
            .map(|name| TargetLoad {
                name: name.to_string(),
                positions: self.target_to_positions.get(name).map_or(0, Vec::len),
                owned: owned.get(name.as_ref()).copied().unwrap_or(0),
            })
            .collect();

        RingStats {
            target_count: self.order.len(),
            position_count: self.position_to_target.len(),
            replica_positions: targets.iter().map(|t| t.positions).sum(),
            targets,
        }
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashRing{{targets:[")?;
        for (i, target) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", target)?;
        }
        write!(f, "]}}")
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("targets", &self.order)
            .field("positions", &self.position_to_target.len())
            .field("sorted", &self.sorted.is_valid())
            .finish()
    }
}
