use md5::{Digest, Md5};
use std::sync::Arc;

/// A point on the ring. Positions are ordered by plain numeric comparison.
pub type Position = u32;

/// Maps a string onto the ring's position space.
///
/// Implementations must be deterministic: the same input yields the same
/// position in every process using the same algorithm. Collisions between
/// different inputs are allowed.
pub trait RingHasher: Send + Sync {
    /// Hash a value to its position on the ring.
    fn hash(&self, value: &str) -> Position;
}

impl<H: RingHasher + ?Sized> RingHasher for Arc<H> {
    #[inline]
    fn hash(&self, value: &str) -> Position {
        (**self).hash(value)
    }
}

impl<H: RingHasher + ?Sized> RingHasher for Box<H> {
    #[inline]
    fn hash(&self, value: &str) -> Position {
        (**self).hash(value)
    }
}

/// CRC-32 (IEEE) checksum of the value's bytes. Fast, and the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32Hasher;

impl RingHasher for Crc32Hasher {
    #[inline]
    fn hash(&self, value: &str) -> Position {
        crc32fast::hash(value.as_bytes())
    }
}

/// First 32 bits of the MD5 digest, read big-endian.
///
/// Big-endian keeps the numeric order equal to the order of the digest's
/// leading eight hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hasher;

impl RingHasher for Md5Hasher {
    fn hash(&self, value: &str) -> Position {
        let digest = Md5::digest(value.as_bytes());
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }
}

/// 32-bit FxHash of the value.
#[cfg(feature = "fxhash")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FxHasher;

#[cfg(feature = "fxhash")]
impl RingHasher for FxHasher {
    #[inline]
    fn hash(&self, value: &str) -> Position {
        fxhash::hash32(value)
    }
}
