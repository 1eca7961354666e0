// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{narrow, CollisionStrategy};
use crate::hash::KeyHashes;

#[doc(hidden)]
pub const NAME: &str = "CustomProbing";

/// Linear-plus-quadratic probing
///
/// `index(i) = (home + c1 * i * step + c2 * i²) mod size`
///
/// ###### Caution
///
/// Unlike [`DoubleHashing`](super::DoubleHashing), the sequence is not
/// guaranteed to reach every slot for arbitrary `c1`, `c2`; probe loops are
/// capped at `size` attempts, so a crowded table may report
/// [`Error::TableFull`](crate::Error::TableFull) before it is actually full.
/// Use [`HashTable::probe_coverage`](crate::HashTable::probe_coverage) to
/// inspect how many slots a key can reach.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Strategy {
    /// Linear coefficient (multiplies the step hash)
    pub c1: u64,

    /// Quadratic coefficient
    pub c2: u64,
}

impl Strategy {
    /// Configures a new custom probing strategy.
    ///
    /// Both constants need to be positive, which is checked when the table
    /// is built.
    #[must_use]
    pub fn new(c1: u64, c2: u64) -> Self {
        Self { c1, c2 }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self { c1: 1, c2: 3 }
    }
}

impl CollisionStrategy for Strategy {
    fn get_name(&self) -> &'static str {
        NAME
    }

    fn is_open_addressing(&self) -> bool {
        true
    }

    fn probe(&self, hashes: KeyHashes, attempt: u64, size: u64) -> u64 {
        let size = u128::from(size);

        // NOTE: Reduce every factor first, so the products fit into u128
        let i = u128::from(attempt) % size;
        let c1 = u128::from(self.c1) % size;
        let c2 = u128::from(self.c2) % size;
        let step = u128::from(hashes.step) % size;

        let linear = (c1 * i % size) * step % size;
        let quadratic = (c2 * (i * i % size)) % size;

        let idx = (u128::from(hashes.home) + linear + quadratic) % size;

        narrow(idx)
    }
}
