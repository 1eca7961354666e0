// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod load_factor;

pub use load_factor::LoadFactorPolicy;

use crate::{
    prime::{is_prime, next_prime},
    strategy::{CustomProbing, Strategy},
    Error, HashFunction, HashTable,
};

/// Smallest table size, and the size of a fresh table
pub const DEFAULT_TABLE_SIZE: u64 = 13;

/// Table configuration builder
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Collision resolution strategy
    pub strategy: Strategy,

    /// Hash function used for the home slot
    ///
    /// The other function derives the probe step.
    pub hash_function: HashFunction,

    /// Requested size of a fresh table
    ///
    /// Rounded up to the next prime that is at least `min_size`.
    pub initial_size: u64,

    /// Compaction never shrinks the table below this size (needs to be prime)
    pub min_size: u64,

    /// Grow and shrink thresholds
    pub load_factor_policy: LoadFactorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            hash_function: HashFunction::default(),
            initial_size: DEFAULT_TABLE_SIZE,
            min_size: DEFAULT_TABLE_SIZE,
            load_factor_policy: LoadFactorPolicy::default(),
        }
    }
}

impl Config {
    /// Initializes a new config using the given collision strategy.
    pub fn new<S: Into<Strategy>>(strategy: S) -> Self {
        Self {
            strategy: strategy.into(),
            ..Default::default()
        }
    }

    /// Sets the collision resolution strategy.
    ///
    /// Defaults to [`DoubleHashing`](crate::strategy::DoubleHashing).
    #[must_use]
    pub fn strategy<S: Into<Strategy>>(mut self, strategy: S) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Sets the primary hash function.
    ///
    /// Defaults to [`HashFunction::Polynomial`].
    #[must_use]
    pub fn hash_function(mut self, hash_function: HashFunction) -> Self {
        self.hash_function = hash_function;
        self
    }

    /// Sets the size of a fresh table.
    ///
    /// Default = 13
    #[must_use]
    pub fn initial_size(mut self, size: u64) -> Self {
        self.initial_size = size;
        self
    }

    /// Sets the minimum table size.
    ///
    /// Needs to be a prime of at least 3.
    ///
    /// Default = 13
    #[must_use]
    pub fn min_size(mut self, size: u64) -> Self {
        self.min_size = size;
        self
    }

    /// Sets the grow and shrink thresholds.
    ///
    /// Default = grow above 0.5, shrink below 0.25
    #[must_use]
    pub fn load_factor_policy(mut self, policy: LoadFactorPolicy) -> Self {
        self.load_factor_policy = policy;
        self
    }

    /// Returns the size a freshly built table will have.
    #[must_use]
    pub fn effective_initial_size(&self) -> u64 {
        next_prime(self.initial_size.max(self.min_size))
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.min_size < 3 || !is_prime(self.min_size) {
            return Err(Error::InvalidConfig("minimum size needs to be a prime >= 3"));
        }

        if let Strategy::CustomProbing(CustomProbing { c1, c2 }) = self.strategy {
            if c1 == 0 || c2 == 0 {
                return Err(Error::InvalidConfig(
                    "custom probing constants need to be positive",
                ));
            }
        }

        self.load_factor_policy.validate()
    }

    /// Builds an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration is rejected.
    pub fn build<V>(self) -> crate::Result<HashTable<V>> {
        self.validate()?;
        Ok(HashTable::from_config(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Chaining, DoubleHashing};
    use test_log::test;

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(Strategy::from(DoubleHashing), config.strategy);
        assert_eq!(HashFunction::Polynomial, config.hash_function);
        assert_eq!(13, config.effective_initial_size());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rounds_initial_size() {
        let config = Config::new(Chaining).initial_size(100);
        assert_eq!(101, config.effective_initial_size());

        let config = Config::new(Chaining).initial_size(2);
        assert_eq!(13, config.effective_initial_size());
    }

    #[test]
    fn config_rejects_custom_zero() {
        for (c1, c2) in [(0, 3), (1, 0)] {
            let result = Config::new(CustomProbing::new(c1, c2)).build::<()>();
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn config_rejects_bad_floor() {
        for floor in [0, 1, 2, 4, 15] {
            let result = Config::default().min_size(floor).build::<()>();
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn config_rejects_bad_load_factor() {
        let result = Config::default()
            .load_factor_policy(LoadFactorPolicy::new(0.3, 0.4))
            .build::<()>();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
