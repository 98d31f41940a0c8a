//! Configuration for lock parsing and evaluation.

/// Limits and comparison options for the lock engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockConfig {
    /// Deepest grammar nesting a single parse may reach.
    pub max_parse_depth: usize,

    /// Indirection depth at which a lock is treated as broken.
    pub lock_nest_limit: usize,

    /// Attribute names are truncated to this many characters before lookup.
    pub max_attr_name_len: usize,

    /// Compare softcode output ignoring runs of whitespace.
    pub space_compress: bool,

    /// Include the actor's location in broken-lock diagnostics.
    pub log_location: bool,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_parse_depth: 1000,
            lock_nest_limit: 20,
            max_attr_name_len: 64,
            space_compress: true,
            log_location: true,
        }
    }
}

impl LockConfig {
    /// Creates a configuration with tight limits for untrusted builders.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_parse_depth: 100,
            lock_nest_limit: 5,
            max_attr_name_len: 32,
            space_compress: false,
            log_location: true,
        }
    }

    /// Builder method to set the parse depth limit.
    #[must_use]
    pub fn with_max_parse_depth(mut self, depth: usize) -> Self {
        self.max_parse_depth = depth;
        self
    }

    /// Builder method to set the indirection limit.
    #[must_use]
    pub fn with_lock_nest_limit(mut self, limit: usize) -> Self {
        self.lock_nest_limit = limit;
        self
    }

    /// Builder method to set the attribute name length bound.
    #[must_use]
    pub fn with_max_attr_name_len(mut self, len: usize) -> Self {
        self.max_attr_name_len = len;
        self
    }

    /// Builder method to enable/disable whitespace compression.
    #[must_use]
    pub fn with_space_compress(mut self, compress: bool) -> Self {
        self.space_compress = compress;
        self
    }

    /// Builder method to enable/disable location logging.
    #[must_use]
    pub fn with_log_location(mut self, log: bool) -> Self {
        self.log_location = log;
        self
    }
}
