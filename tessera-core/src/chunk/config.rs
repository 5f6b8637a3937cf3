//! Chunk sizing configuration

use crate::error::{ConfigError, Result};
use serde::Serialize;

/// Default chunk sizing constants (characters)
pub mod defaults {
    /// Maximum chunk length
    pub const MAX_SIZE: usize = 500;

    /// Characters carried from the end of one chunk into the next
    pub const OVERLAP: usize = 50;

    /// Chunks shorter than this are dropped
    pub const MIN_SIZE: usize = 20;
}

/// Validated chunk sizing: `0 <= overlap < max_size`, `min_size <= max_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkConfig {
    max_size: usize,
    overlap: usize,
    min_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_size: defaults::MAX_SIZE,
            overlap: defaults::OVERLAP,
            min_size: defaults::MIN_SIZE,
        }
    }
}

impl ChunkConfig {
    /// Create a validated configuration
    pub fn new(max_size: usize, overlap: usize, min_size: usize) -> Result<Self> {
        let config = Self {
            max_size,
            overlap,
            min_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder
    pub fn builder() -> ChunkConfigBuilder {
        ChunkConfigBuilder::default()
    }

    /// Maximum chunk length in characters
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Minimum chunk length in characters
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Same configuration cut against a different maximum
    ///
    /// Overlap is clamped to half the new maximum and the minimum to the
    /// maximum, so the result stays valid.
    pub fn resized(&self, max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            max_size,
            overlap: self.overlap.min(max_size / 2),
            min_size: self.min_size.min(max_size),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(ConfigError::ZeroMaxSize);
        }
        if self.overlap >= self.max_size {
            return Err(ConfigError::OverlapTooLarge {
                overlap: self.overlap,
                max_size: self.max_size,
            });
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::MinAboveMax {
                min_size: self.min_size,
                max_size: self.max_size,
            });
        }
        Ok(())
    }
}

/// Fluent builder for [`ChunkConfig`]
#[derive(Debug, Default)]
pub struct ChunkConfigBuilder {
    max_size: Option<usize>,
    overlap: Option<usize>,
    min_size: Option<usize>,
}

impl ChunkConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum chunk length
    pub fn max_size(mut self, chars: usize) -> Self {
        self.max_size = Some(chars);
        self
    }

    /// Set the overlap
    pub fn overlap(mut self, chars: usize) -> Self {
        self.overlap = Some(chars);
        self
    }

    /// Set the minimum chunk length
    pub fn min_size(mut self, chars: usize) -> Self {
        self.min_size = Some(chars);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ChunkConfig> {
        ChunkConfig::new(
            self.max_size.unwrap_or(defaults::MAX_SIZE),
            self.overlap.unwrap_or(defaults::OVERLAP),
            self.min_size.unwrap_or(defaults::MIN_SIZE),
        )
    }
}
