//! # HashSpace
//!
//! A consistent hashing ring for low-churn key-to-node assignment.
//!
//! Each target (a server, shard, cache node...) is hashed onto a ring at
//! several positions. A resource key maps to the owner of the first position
//! after the key's own hash. Adding or removing a target only remaps the keys
//! that fall next to that target's positions, and two processes that add the
//! same targets in the same order agree on every lookup without talking to
//! each other.
//!
//! ## Features
//!
//! - **Weighted Targets**: Replica count scales with a per-target weight
//! - **Ordered Fallbacks**: `lookup_list` returns distinct targets in ring order
//! - **Pluggable Hashing**: CRC-32 (default), MD5, or any `RingHasher`
//! - **Deterministic**: Same targets, same order, same answers, in every process
//! - **Statistics**: Per-target position counts and collision tracking
//!
//! ## Example
//!
//! ```rust
//! use hashspace::HashRing;
//!
//! let mut ring = HashRing::new();
//! ring.add_targets(["cache-1", "cache-2", "cache-3"])?;
//! ring.add_target_with_weight("cache-big", 2.0)?;
//!
//! // Primary owner
//! let owner = ring.lookup("object-17")?;
//!
//! // Primary plus one fallback
//! let owners = ring.lookup_list("object-17", 2)?;
//! assert_eq!(owners[0], owner);
//!
//! ring.remove_target("cache-2")?;
//! println!("{}", ring);
//! # Ok::<(), hashspace::Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use hashspace::{HashFunction, HashRingBuilder};
//!
//! let ring = HashRingBuilder::new()
//!     .replicas(128)?
//!     .hash_function(HashFunction::Md5)
//!     .build();
//! assert_eq!(ring.replicas(), 128);
//! # Ok::<(), hashspace::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Hasher contract and built-in hash functions.
pub mod hash;
/// Iterator implementations.
pub mod iter;
/// Main HashRing implementation.
pub mod ring;
/// Statistics and diagnostics.
pub mod stats;
mod view;

// Re-export main types
pub use config::{
    Config, HashFunction, HashRingBuilder, HasherConfig, DEFAULT_REPLICAS, MAX_REPLICAS,
};
pub use error::Error;
#[cfg(feature = "fxhash")]
pub use hash::FxHasher;
pub use hash::{Crc32Hasher, Md5Hasher, Position, RingHasher};
pub use iter::Successors;
pub use ring::HashRing;
pub use stats::{RingStats, TargetLoad};
