// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! String hash functions
//!
//! Two independent functions are available, one of them is used as the
//! primary hash (home slot), the other one derives the probe step.

const POLY_BASE: u64 = 31;
const DJB2_SEED: u64 = 5_381;

/// `b'a' - 1`, so that `'a'` maps to 1
const CHAR_OFFSET: i64 = 96;

/// Reads a key byte as a signed character.
fn signed(byte: u8) -> i64 {
    i64::from(i8::from_ne_bytes([byte]))
}

/// Hash function used to pick a key's home slot
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HashFunction {
    /// Base-31 polynomial rolling hash, reduced by the table size at every step
    #[default]
    Polynomial,

    /// `hash = hash * 33 + byte`, seeded with 5381
    Djb2,
}

impl HashFunction {
    /// Returns the other function of the pair.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Polynomial => Self::Djb2,
            Self::Djb2 => Self::Polynomial,
        }
    }

    /// Gets the hash function name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Polynomial => "poly",
            Self::Djb2 => "djb2",
        }
    }

    /// Computes the unreduced output of the function.
    ///
    /// The polynomial hash reduces by `size` internally, so its raw output is
    /// already `< size`; djb2 returns the full 64-bit state.
    #[must_use]
    pub fn raw(self, key: &str, size: u64) -> u64 {
        match self {
            Self::Polynomial => polynomial(key, size),
            Self::Djb2 => djb2(key),
        }
    }

    /// Maps the key into `[0, size)`.
    #[must_use]
    pub fn hash(self, key: &str, size: u64) -> u64 {
        self.raw(key, size) % size
    }
}

/// Polynomial hash over 1-based character indices (`'a' = 1`).
///
/// Bytes are read as signed characters, so anything below `'a'` (digits,
/// uppercase, punctuation) and every non-ASCII byte yields a negative index,
/// which wraps around in 64 bits before the reduction modulo `m`.
#[must_use]
pub fn polynomial(key: &str, m: u64) -> u64 {
    debug_assert!(m > 0, "modulus may not be zero");

    let mut hash = 0u64;
    let mut power = 1u64;

    for &byte in key.as_bytes() {
        let index = (signed(byte) - CHAR_OFFSET).cast_unsigned();

        hash = hash.wrapping_add(index.wrapping_mul(power)) % m;
        power = power.wrapping_mul(POLY_BASE) % m;
    }

    hash
}

/// djb2 multiply-and-add hash with wrapping 64-bit state.
///
/// Bytes are added as signed characters.
#[must_use]
pub fn djb2(key: &str) -> u64 {
    key.as_bytes().iter().fold(DJB2_SEED, |hash, &byte| {
        hash.wrapping_mul(33).wrapping_add_signed(signed(byte))
    })
}

/// Home slot and probe step of a key for a given table size
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyHashes {
    /// Primary hash in `[0, size)`
    pub home: u64,

    /// Auxiliary hash in `[1, size - 1]`
    pub step: u64,
}

/// Primary hash function plus the auxiliary (step) hash derived from the
/// other function
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HashFunctionSet {
    primary: HashFunction,
}

impl HashFunctionSet {
    /// Creates a set using `primary` for the home slot.
    #[must_use]
    pub fn new(primary: HashFunction) -> Self {
        Self { primary }
    }

    /// Returns the primary hash function.
    #[must_use]
    pub fn primary_function(&self) -> HashFunction {
        self.primary
    }

    /// Computes the home slot in `[0, size)`.
    #[must_use]
    pub fn primary(&self, key: &str, size: u64) -> u64 {
        self.primary.hash(key, size)
    }

    /// Computes the probe step in `[1, size - 1]`.
    ///
    /// Derived from the raw output of the function that is *not* the primary,
    /// so home slot and step stay independent.
    #[must_use]
    pub fn auxiliary(&self, key: &str, size: u64) -> u64 {
        debug_assert!(size >= 2, "step needs at least two slots");
        1 + self.primary.other().raw(key, size) % (size - 1)
    }

    /// Computes both hashes of a key.
    #[must_use]
    pub fn hashes(&self, key: &str, size: u64) -> KeyHashes {
        KeyHashes {
            home: self.primary(key, size),
            step: self.auxiliary(key, size),
        }
    }
}
