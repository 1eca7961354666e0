// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur in the hash table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key is already present, nothing was changed
    DuplicateKey,

    /// The key is not present
    NotFound,

    /// Every probe attempt hit an occupied slot
    ///
    /// Should not happen as long as the resize policy keeps the load factor
    /// below 1, but custom probing constants are not guaranteed to reach
    /// every slot.
    TableFull,

    /// The operation is not supported by the configured collision strategy
    /// (e.g. tracing probes of a chained table)
    UnsupportedOperation,

    /// The table configuration was rejected
    InvalidConfig(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProbeTableError: {self:?}")
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
