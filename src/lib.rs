// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A string-keyed hash table with pluggable collision resolution.
//!
//! ##### About
//!
//! This crate exports a [`HashTable`] that maps string keys (or integers, which are
//! normalized to their decimal string) to arbitrary values.
//!
//! Collisions are resolved by one of three strategies:
//!
//! - [`Chaining`](strategy::Chaining): every slot holds a bucket of entries
//! - [`DoubleHashing`](strategy::DoubleHashing): `index = (home + i * step) mod size`
//! - [`CustomProbing`](strategy::CustomProbing): `index = (home + c1 * i + c2 * i²) mod size`
//!
//! Open-addressing strategies leave tombstones behind when entries are removed,
//! so probe chains stay intact until the next rehash.
//!
//! Table sizes are always prime. The table grows once its load factor exceeds a
//! threshold and shrinks once it falls below another one; a hysteresis window
//! prevents rehashing back and forth around a threshold.
//!
//! The table keeps track of collisions and probe counts, and can report the exact
//! sequence of slots a lookup visits, which is useful to compare strategies and
//! hash functions against each other.
//!
//! ```
//! use probe_table::{strategy::CustomProbing, Config, HashFunction};
//!
//! let mut table = Config::new(CustomProbing::new(1, 3))
//!     .hash_function(HashFunction::Djb2)
//!     .build()?;
//!
//! for (idx, animal) in ["cat", "dog", "cow", "pig"].into_iter().enumerate() {
//!     table.insert(animal, idx)?;
//! }
//!
//! assert_eq!(Ok(&2), table.search("cow"));
//! assert_eq!(13, table.size());
//! println!("{}", table.statistics());
//! #
//! # Ok::<(), probe_table::Error>(())
//! ```

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[doc(hidden)]
pub type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

/// Configuration
pub mod config;

mod error;

pub mod hash;

mod key;

pub mod prime;

mod resize;
mod slot;
mod statistics;
mod storage;

pub mod strategy;

mod table;

pub use {
    config::{Config, LoadFactorPolicy},
    error::{Error, Result},
    hash::{HashFunction, HashFunctionSet, KeyHashes},
    key::{AsKey, UserKey},
    statistics::Statistics,
    strategy::{CollisionStrategy, ProbeSequence, Strategy},
    table::HashTable,
};
