// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    config::LoadFactorPolicy,
    prime::{next_prime, prev_prime},
};

/// Describes what to do after a mutation (resize or not)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Choice {
    /// Just do nothing.
    DoNothing,

    /// Rehashes into a larger table of the given (prime) size.
    Grow(u64),

    /// Rehashes into a smaller table of the given (prime) size.
    Shrink(u64),
}

/// Load-factor driven resize policy with hysteresis
///
/// A resize is only considered once enough mutations happened since the last
/// one (half the element count at that time), so a table hovering around a
/// threshold does not rehash back and forth.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResizePolicy {
    insertions_since_expansion: usize,
    deletions_since_compaction: usize,
    elements_at_last_resize: usize,
}

impl ResizePolicy {
    pub fn record_insert(&mut self) {
        self.insertions_since_expansion += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletions_since_compaction += 1;
    }

    /// Starts a new hysteresis window after a rehash.
    pub fn reset(&mut self, len: usize) {
        self.insertions_since_expansion = 0;
        self.deletions_since_compaction = 0;
        self.elements_at_last_resize = len;
    }

    #[must_use]
    pub fn insertions_since_expansion(&self) -> usize {
        self.insertions_since_expansion
    }

    #[must_use]
    pub fn deletions_since_compaction(&self) -> usize {
        self.deletions_since_compaction
    }

    #[must_use]
    pub fn elements_at_last_resize(&self) -> usize {
        self.elements_at_last_resize
    }

    /// Decides whether the table should grow or shrink.
    ///
    /// Growth is checked first.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn choose(&self, len: usize, size: u64, floor: u64, thresholds: &LoadFactorPolicy) -> Choice {
        let load_factor = len as f64 / size as f64;
        let min_mutations = self.elements_at_last_resize / 2;

        if load_factor > thresholds.grow() && self.insertions_since_expansion >= min_mutations {
            return Choice::Grow(next_prime(size.saturating_mul(2)));
        }

        if load_factor < thresholds.shrink()
            && size > floor
            && self.deletions_since_compaction >= min_mutations
        {
            return Choice::Shrink(prev_prime(size / 2, floor));
        }

        Choice::DoNothing
    }
}
