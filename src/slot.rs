// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::key::UserKey;

/// Slot of an open-addressing table
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<V> {
    /// Never used, terminates every probe scan
    Empty,

    /// Live entry
    Occupied {
        /// Key of the entry
        key: UserKey,

        /// Value of the entry
        value: V,
    },

    /// Deleted entry
    ///
    /// Keeps probe sequences that pass through it intact, and can be
    /// reused by a later insert.
    Tombstone,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<V> Slot<V> {
    /// Returns `true` if the slot was never used.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if the slot holds a live entry.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    /// Returns `true` if the slot held an entry that was removed.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }

    /// Returns `true` if the slot holds a live entry with the given key.
    #[must_use]
    pub fn holds(&self, needle: &str) -> bool {
        match self {
            Self::Occupied { key, .. } => key == needle,
            _ => false,
        }
    }

    /// Returns the live entry, if any.
    #[must_use]
    pub fn entry(&self) -> Option<(&str, &V)> {
        match self {
            Self::Occupied { key, value } => Some((key.as_str(), value)),
            _ => None,
        }
    }

    /// Marks the slot as deleted, returning the live entry it held.
    pub fn bury(&mut self) -> Option<(UserKey, V)> {
        if !self.is_occupied() {
            return None;
        }

        match std::mem::replace(self, Self::Tombstone) {
            Self::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    /// Takes the live entry out of the slot, leaving it empty.
    pub fn take(&mut self) -> Option<(UserKey, V)> {
        match std::mem::take(self) {
            Self::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}
