// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::CollisionStrategy;
use crate::hash::KeyHashes;

#[doc(hidden)]
pub const NAME: &str = "Chaining";

/// Separate chaining
///
/// Every slot holds a bucket of entries; colliding keys are prepended to the
/// bucket of their home slot, so there is no probe sequence beyond the home
/// slot itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Strategy;

impl CollisionStrategy for Strategy {
    fn get_name(&self) -> &'static str {
        NAME
    }

    fn is_open_addressing(&self) -> bool {
        false
    }

    fn probe(&self, hashes: KeyHashes, _attempt: u64, _size: u64) -> u64 {
        hashes.home
    }
}
