// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::cell::Cell;

/// Collision and probe counters of a table
///
/// Uses [`Cell`]s so lookups through a shared reference can still be
/// accounted for; this makes the table `!Sync`.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    /// Number of slots (or non-empty buckets) that inserts ran into
    collisions: Cell<u64>,

    /// Number of slots or chain entries examined by searches
    probes: Cell<u64>,

    /// Number of search operations, hits and misses alike
    searches: Cell<u64>,
}

impl Counters {
    pub fn record_collisions(&self, n: u64) {
        self.collisions.set(self.collisions.get() + n);
    }

    pub fn record_search(&self, probes: u64) {
        self.searches.set(self.searches.get() + 1);
        self.probes.set(self.probes.get() + probes);
    }

    pub fn reset(&self) {
        self.collisions.set(0);
        self.probes.set(0);
        self.searches.set(0);
    }

    pub fn snapshot(&self) -> Statistics {
        Statistics {
            collisions: self.collisions.get(),
            probes: self.probes.get(),
            searches: self.searches.get(),
        }
    }
}

/// Point-in-time copy of a table's diagnostic counters
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Cumulative collision count of all inserts
    pub collisions: u64,

    /// Cumulative number of probes of all searches
    pub probes: u64,

    /// Number of searches performed
    pub searches: u64,
}

impl Statistics {
    /// Average probes per search (0.0 if nothing was searched yet).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_probes(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.probes as f64 / self.searches as f64
        }
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "collisions={} searches={} avg_probes={:.3}",
            self.collisions,
            self.searches,
            self.average_probes(),
        )
    }
}
