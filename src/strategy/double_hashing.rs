// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{narrow, CollisionStrategy};
use crate::hash::KeyHashes;

#[doc(hidden)]
pub const NAME: &str = "DoubleHashing";

/// Double hashing
///
/// `index(i) = (home + i * step) mod size`
///
/// With a prime table size and a step in `[1, size - 1]`, the first `size`
/// indices are a permutation of all slots.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Strategy;

impl CollisionStrategy for Strategy {
    fn get_name(&self) -> &'static str {
        NAME
    }

    fn is_open_addressing(&self) -> bool {
        true
    }

    fn probe(&self, hashes: KeyHashes, attempt: u64, size: u64) -> u64 {
        let size = u128::from(size);
        let idx = (u128::from(hashes.home) + u128::from(attempt) * u128::from(hashes.step)) % size;

        narrow(idx)
    }
}
