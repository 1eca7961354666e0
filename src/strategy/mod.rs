// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Contains collision resolution strategies

pub(crate) mod chaining;
pub(crate) mod custom;
pub(crate) mod double_hashing;

pub use chaining::Strategy as Chaining;
pub use custom::Strategy as CustomProbing;
pub use double_hashing::Strategy as DoubleHashing;

use crate::hash::KeyHashes;
use enum_dispatch::enum_dispatch;

/// Trait for a collision resolution strategy
///
/// The strategy maps a key's hashes and an attempt number to a candidate
/// slot. Attempt 0 is always the key's home slot.
#[allow(clippy::module_name_repetitions)]
#[enum_dispatch]
pub trait CollisionStrategy {
    /// Gets the collision strategy name.
    fn get_name(&self) -> &'static str;

    /// Returns `true` if entries are stored in a flat slot array
    /// (as opposed to per-bucket chains).
    fn is_open_addressing(&self) -> bool;

    /// Returns the slot index in `[0, size)` to examine at `attempt`.
    fn probe(&self, hashes: KeyHashes, attempt: u64, size: u64) -> u64;
}

/// Narrows an index that was already reduced modulo a `u64` table size.
#[expect(clippy::cast_possible_truncation, reason = "idx < size <= u64::MAX")]
pub(crate) fn narrow(idx: u128) -> u64 {
    idx as u64
}

/// May be [`Chaining`], [`DoubleHashing`] or [`CustomProbing`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[enum_dispatch(CollisionStrategy)]
pub enum Strategy {
    /// Separate chaining, see [`Chaining`]
    Chaining(Chaining),

    /// Double hashing, see [`DoubleHashing`]
    DoubleHashing(DoubleHashing),

    /// Linear-plus-quadratic probing, see [`CustomProbing`]
    CustomProbing(CustomProbing),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::DoubleHashing(DoubleHashing)
    }
}

/// Iterator over the first `size` probe indices of a key
pub struct ProbeSequence<'a> {
    strategy: &'a Strategy,
    hashes: KeyHashes,
    size: u64,
    attempt: u64,
}

impl<'a> ProbeSequence<'a> {
    /// Creates a probe sequence for the given key hashes.
    #[must_use]
    pub fn new(strategy: &'a Strategy, hashes: KeyHashes, size: u64) -> Self {
        Self {
            strategy,
            hashes,
            size,
            attempt: 0,
        }
    }
}

impl Iterator for ProbeSequence<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= self.size {
            return None;
        }

        let idx = self.strategy.probe(self.hashes, self.attempt, self.size);
        self.attempt += 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.size - self.attempt).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence<'_> {}
