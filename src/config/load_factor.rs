// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Load factor thresholds that trigger table growth and compaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFactorPolicy {
    grow: f64,
    shrink: f64,
}

impl Default for LoadFactorPolicy {
    fn default() -> Self {
        Self {
            grow: 0.5,
            shrink: 0.25,
        }
    }
}

impl LoadFactorPolicy {
    /// Constructs a custom load factor policy.
    ///
    /// The table grows once its load factor exceeds `grow` and shrinks once
    /// it falls below `shrink`. Both are validated when the table is built.
    #[must_use]
    pub fn new(grow: f64, shrink: f64) -> Self {
        Self { grow, shrink }
    }

    /// Upper load factor threshold.
    #[must_use]
    pub fn grow(&self) -> f64 {
        self.grow
    }

    /// Lower load factor threshold.
    #[must_use]
    pub fn shrink(&self) -> f64 {
        self.shrink
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if !(self.grow > 0.0 && self.grow <= 1.0) {
            return Err(crate::Error::InvalidConfig(
                "grow threshold needs to be in (0, 1]",
            ));
        }

        if !(self.shrink >= 0.0 && self.shrink < self.grow) {
            return Err(crate::Error::InvalidConfig(
                "shrink threshold needs to be in [0, grow)",
            ));
        }

        Ok(())
    }
}
