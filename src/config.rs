use crate::error::Error;
use crate::hash::{Crc32Hasher, Md5Hasher, RingHasher};

/// Default number of positions a target of weight 1 gets on the ring.
pub const DEFAULT_REPLICAS: usize = 64;

/// Most positions a single target may be given, the size of the position space.
pub const MAX_REPLICAS: usize = u32::MAX as usize;

/// Which built-in hash function places targets and resources on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// CRC-32 checksum (default, fast).
    #[default]
    Crc32,
    /// Leading 32 bits of an MD5 digest.
    Md5,
    /// 32-bit FxHash.
    #[cfg(feature = "fxhash")]
    Fx,
}

/// Hasher selection for a ring.
pub enum HasherConfig {
    /// One of the built-in hash functions.
    Builtin(HashFunction),
    /// User-provided hasher (e.g. a test double or another algorithm).
    Custom(Box<dyn RingHasher>),
}

impl Default for HasherConfig {
    fn default() -> Self {
        HasherConfig::Builtin(HashFunction::default())
    }
}

impl std::fmt::Debug for HasherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HasherConfig::Builtin(kind) => write!(f, "HasherConfig::Builtin({:?})", kind),
            HasherConfig::Custom(_) => write!(f, "HasherConfig::Custom(...)"),
        }
    }
}

/// Configuration for a HashRing instance.
#[derive(Debug)]
pub struct Config {
    pub(crate) replicas: usize,
    pub(crate) hasher: HasherConfig,
}

impl Config {
    /// Create a new config with defaults (64 replicas, CRC-32).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base number of replicas per target. Must be in `1..=MAX_REPLICAS`.
    pub fn replicas(mut self, count: usize) -> Result<Self, Error> {
        if count == 0 || count > MAX_REPLICAS {
            return Err(Error::InvalidReplicaCount);
        }
        self.replicas = count;
        Ok(self)
    }

    /// Use one of the built-in hash functions.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hasher = HasherConfig::Builtin(hash_fn);
        self
    }

    /// Use a custom hasher.
    pub fn hasher<H: RingHasher + 'static>(mut self, hasher: H) -> Self {
        self.hasher = HasherConfig::Custom(Box::new(hasher));
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hasher: HasherConfig::default(),
        }
    }
}

/// Builder for creating a HashRing with custom configuration.
pub struct HashRingBuilder {
    config: Config,
}

impl HashRingBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the base number of replicas per target. Must be in `1..=MAX_REPLICAS`.
    pub fn replicas(mut self, count: usize) -> Result<Self, Error> {
        self.config = self.config.replicas(count)?;
        Ok(self)
    }

    /// Use one of the built-in hash functions.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Use a custom hasher.
    pub fn hasher<H: RingHasher + 'static>(mut self, hasher: H) -> Self {
        self.config = self.config.hasher(hasher);
        self
    }

    /// Build a HashRing with the configured settings.
    pub fn build(self) -> crate::HashRing {
        crate::HashRing::with_config(self.config)
    }
}

impl Default for HashRingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a hasher instance based on the configuration.
pub(crate) fn create_hasher(hasher: HasherConfig) -> Box<dyn RingHasher> {
    match hasher {
        HasherConfig::Builtin(HashFunction::Crc32) => Box::new(Crc32Hasher),
        HasherConfig::Builtin(HashFunction::Md5) => Box::new(Md5Hasher),
        #[cfg(feature = "fxhash")]
        HasherConfig::Builtin(HashFunction::Fx) => Box::new(crate::hash::FxHasher),
        HasherConfig::Custom(hasher) => hasher,
    }
}
