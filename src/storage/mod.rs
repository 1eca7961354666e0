// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod chained;
mod open;

pub use chained::Chained;
pub use open::Open;

use crate::{
    hash::HashFunctionSet,
    key::UserKey,
    strategy::{CollisionStrategy, Strategy},
    Error, HashMap,
};

/// Converts a slot index or table size into a `usize`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "table sizes are bounded by addressable memory"
)]
pub(crate) fn to_index(n: u64) -> usize {
    n as usize
}

/// Result of a key lookup, with the number of slots (or chain entries)
/// that were examined
#[derive(Debug)]
pub struct Lookup<T> {
    pub item: Option<T>,
    pub probes: u64,
}

/// Backing storage of a table
///
/// Buckets for separate chaining, slots for open addressing.
pub enum Storage<V> {
    /// Separate chaining
    Chained(Chained<V>),

    /// Double hashing or custom probing
    Open(Open<V>),
}

impl<V> Storage<V> {
    pub fn new(strategy: &Strategy, size: u64) -> Self {
        if strategy.is_open_addressing() {
            Self::Open(Open::with_size(size))
        } else {
            Self::Chained(Chained::with_size(size))
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Self::Chained(s) => s.size(),
            Self::Open(s) => s.size(),
        }
    }

    pub fn tombstones(&self) -> usize {
        match self {
            Self::Chained(_) => 0,
            Self::Open(s) => s.tombstones(),
        }
    }

    /// Stores a new entry, returning the number of collisions it caused.
    pub fn insert(
        &mut self,
        strategy: &Strategy,
        hash_set: &HashFunctionSet,
        key: UserKey,
        value: V,
    ) -> crate::Result<u64> {
        match self {
            Self::Chained(s) => {
                let home = hash_set.primary(&key, s.size());
                s.insert(home, key, value)
            }
            Self::Open(s) => {
                let hashes = hash_set.hashes(&key, s.size());
                s.insert(strategy, hashes, key, value)
            }
        }
    }

    pub fn get(&self, strategy: &Strategy, hash_set: &HashFunctionSet, key: &str) -> Lookup<&V> {
        match self {
            Self::Chained(s) => s.get(hash_set.primary(key, s.size()), key),
            Self::Open(s) => s.get(strategy, hash_set.hashes(key, s.size()), key),
        }
    }

    pub fn remove(
        &mut self,
        strategy: &Strategy,
        hash_set: &HashFunctionSet,
        key: &str,
    ) -> Option<V> {
        match self {
            Self::Chained(s) => {
                let home = hash_set.primary(key, s.size());
                s.remove(home, key)
            }
            Self::Open(s) => {
                let hashes = hash_set.hashes(key, s.size());
                s.remove(strategy, hashes, key)
            }
        }
    }

    pub fn trace(
        &self,
        strategy: &Strategy,
        hash_set: &HashFunctionSet,
        key: &str,
    ) -> crate::Result<Vec<u64>> {
        match self {
            Self::Chained(_) => Err(Error::UnsupportedOperation),
            Self::Open(s) => Ok(s.trace(strategy, hash_set.hashes(key, s.size()), key)),
        }
    }

    /// Replays every entry into storage of `size` slots, returning the
    /// collisions caused by the replay.
    pub fn rehash(
        &mut self,
        strategy: &Strategy,
        hash_set: &HashFunctionSet,
        size: u64,
    ) -> crate::Result<u64> {
        match self {
            Self::Chained(s) => Ok(s.rehash(hash_set, size)),
            Self::Open(s) => s.rehash(strategy, hash_set, size),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_> {
        match self {
            Self::Chained(s) => Box::new(s.iter()),
            Self::Open(s) => Box::new(s.iter()),
        }
    }

    pub fn chain_length_histogram(&self) -> HashMap<usize, usize> {
        match self {
            Self::Chained(s) => s.chain_length_histogram(),
            Self::Open(_) => HashMap::default(),
        }
    }
}
