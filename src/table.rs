// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    config::{Config, LoadFactorPolicy},
    hash::HashFunctionSet,
    key::AsKey,
    resize::{Choice, ResizePolicy},
    statistics::{Counters, Statistics},
    storage::Storage,
    strategy::{CollisionStrategy, ProbeSequence, Strategy},
    Error, HashFunction, HashMap,
};
use std::time::Instant;

/// A string-keyed hash table with a pluggable collision strategy
///
/// The table size is always prime. The table grows and shrinks based on its
/// load factor, rehashing every live entry into storage of the new size.
///
/// Inserting a key that already exists is rejected, values are never
/// overwritten.
///
/// # Examples
///
/// ```
/// use probe_table::{strategy::DoubleHashing, Config, Error};
///
/// let mut table = Config::new(DoubleHashing).build()?;
///
/// table.insert("cat", 1)?;
/// table.insert("dog", 2)?;
/// assert_eq!(Err(Error::DuplicateKey), table.insert("cat", 3));
///
/// assert_eq!(Ok(&1), table.search("cat"));
/// assert_eq!(Err(Error::NotFound), table.search("cow"));
///
/// assert_eq!(Ok(2), table.remove("dog"));
/// assert_eq!(1, table.len());
/// #
/// # Ok::<(), Error>(())
/// ```
pub struct HashTable<V> {
    strategy: Strategy,
    hash_set: HashFunctionSet,
    min_size: u64,
    thresholds: LoadFactorPolicy,

    storage: Storage<V>,
    len: usize,

    resize_policy: ResizePolicy,
    counters: Counters,
}

impl<V> HashTable<V> {
    pub(crate) fn from_config(config: Config) -> Self {
        let size = config.effective_initial_size();

        Self {
            storage: Storage::new(&config.strategy, size),
            strategy: config.strategy,
            hash_set: HashFunctionSet::new(config.hash_function),
            min_size: config.min_size,
            thresholds: config.load_factor_policy,
            len: 0,
            resize_policy: ResizePolicy::default(),
            counters: Counters::default(),
        }
    }

    /// Inserts a key-value pair.
    ///
    /// May rehash the table afterwards if the load factor crossed the grow
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if the key is already present, or
    /// [`Error::TableFull`] if no probe attempt found a free slot. In both
    /// cases the table is unchanged.
    pub fn insert<K: AsKey>(&mut self, key: K, value: V) -> crate::Result<()> {
        let key = key.as_key().into_owned();

        let collisions = match self
            .storage
            .insert(&self.strategy, &self.hash_set, key, value)
        {
            Ok(collisions) => collisions,
            Err(Error::TableFull) => {
                log::warn!(
                    "{} table of size {} is full, {} live entries, {} tombstones",
                    self.strategy.get_name(),
                    self.size(),
                    self.len,
                    self.storage.tombstones(),
                );
                return Err(Error::TableFull);
            }
            Err(e) => return Err(e),
        };

        self.counters.record_collisions(collisions);
        self.len += 1;
        self.resize_policy.record_insert();
        self.maybe_resize();

        Ok(())
    }

    /// Returns the value of a key.
    ///
    /// Counts as a search operation in the table's [`Statistics`], whether
    /// the key is found or not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is not present.
    pub fn search<K: AsKey + ?Sized>(&self, key: &K) -> crate::Result<&V> {
        let key = key.as_key();
        let lookup = self.storage.get(&self.strategy, &self.hash_set, &key);

        self.counters.record_search(lookup.probes);

        lookup.item.ok_or(Error::NotFound)
    }

    /// Returns `true` if the table contains the key.
    ///
    /// Counts as a search operation.
    pub fn contains_key<K: AsKey + ?Sized>(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// Removes a key, returning its value.
    ///
    /// Open-addressing tables leave a tombstone in the vacated slot.
    /// May rehash the table afterwards if the load factor fell below the
    /// shrink threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is not present.
    pub fn remove<K: AsKey + ?Sized>(&mut self, key: &K) -> crate::Result<V> {
        let key = key.as_key();

        let value = self
            .storage
            .remove(&self.strategy, &self.hash_set, &key)
            .ok_or(Error::NotFound)?;

        self.len -= 1;
        self.resize_policy.record_delete();
        self.maybe_resize();

        Ok(value)
    }

    /// Returns the slot indices a search for `key` visits, in order.
    ///
    /// The trace ends at the slot holding the key or at the first empty slot,
    /// and is at most [`HashTable::size`] entries long.
    ///
    /// # Examples
    ///
    /// ```
    /// use probe_table::{strategy::{Chaining, DoubleHashing}, Config, Error};
    ///
    /// let mut table = Config::new(DoubleHashing).build()?;
    /// table.insert("cat", ())?;
    ///
    /// let trace = table.probe_trace("cat")?;
    /// assert_eq!(1, trace.len());
    ///
    /// let chained = Config::new(Chaining).build::<()>()?;
    /// assert_eq!(Err(Error::UnsupportedOperation), chained.probe_trace("cat"));
    /// #
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for chained tables.
    pub fn probe_trace<K: AsKey + ?Sized>(&self, key: &K) -> crate::Result<Vec<u64>> {
        let key = key.as_key();
        let trace = self.storage.trace(&self.strategy, &self.hash_set, &key)?;

        log::trace!(
            "probe trace of {key:?}: {}",
            trace
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> "),
        );

        Ok(trace)
    }

    /// Returns how many distinct slots the first [`HashTable::size`] probe
    /// attempts of `key` reach.
    ///
    /// Always equals the table size for double hashing; custom probing
    /// constants may reach fewer slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for chained tables.
    pub fn probe_coverage<K: AsKey + ?Sized>(&self, key: &K) -> crate::Result<usize> {
        if !self.strategy.is_open_addressing() {
            return Err(Error::UnsupportedOperation);
        }

        let key = key.as_key();
        let size = self.size();
        let hashes = self.hash_set.hashes(&key, size);

        let mut seen = vec![false; crate::storage::to_index(size)];
        let mut distinct = 0;

        for idx in ProbeSequence::new(&self.strategy, hashes, size) {
            if let Some(flag) = seen.get_mut(crate::storage::to_index(idx)) {
                if !*flag {
                    *flag = true;
                    distinct += 1;
                }
            }
        }

        Ok(distinct)
    }

    /// Resets the collision and probe counters, keeping the table contents.
    pub fn reset_statistics(&self) {
        self.counters.reset();
    }

    /// Returns a snapshot of the diagnostic counters.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.counters.snapshot()
    }

    /// Returns the cumulative collision count.
    #[must_use]
    pub fn collisions(&self) -> u64 {
        self.statistics().collisions
    }

    /// Returns the average number of probes per search (0.0 if nothing was
    /// searched yet).
    #[must_use]
    pub fn average_probes(&self) -> f64 {
        self.statistics().average_probes()
    }

    /// Maps chain length to the number of buckets with that length.
    ///
    /// Empty for open-addressing tables.
    #[must_use]
    pub fn chain_length_histogram(&self) -> HashMap<usize, usize> {
        self.storage.chain_length_histogram()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots (or buckets), always a prime.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.storage.size()
    }

    /// Returns the number of tombstoned slots (always 0 for chaining).
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.storage.tombstones()
    }

    /// Returns the ratio of live entries to table size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.size() as f64
    }

    /// Returns the collision strategy.
    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Returns the primary hash function.
    #[must_use]
    pub fn hash_function(&self) -> HashFunction {
        self.hash_set.primary_function()
    }

    /// Iterates over all live entries, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.storage.iter()
    }

    fn maybe_resize(&mut self) {
        let choice =
            self.resize_policy
                .choose(self.len, self.size(), self.min_size, &self.thresholds);

        log::trace!(
            "resize check: {choice:?} (len={}, size={}, inserts={}, deletes={}, baseline={})",
            self.len,
            self.size(),
            self.resize_policy.insertions_since_expansion(),
            self.resize_policy.deletions_since_compaction(),
            self.resize_policy.elements_at_last_resize(),
        );

        match choice {
            Choice::DoNothing => {}
            Choice::Grow(size) | Choice::Shrink(size) => self.rehash(size),
        }
    }

    /// Rebuilds the storage with `size` slots, replaying every live entry.
    ///
    /// Collisions caused by the replay are counted once it succeeded. Replay
    /// cannot trigger another resize. The hysteresis window restarts
    /// afterwards, even if the replay failed and the old storage was kept.
    fn rehash(&mut self, size: u64) {
        let old_size = self.size();
        let start = Instant::now();

        log::debug!(
            "Rehashing {} entries: {old_size} -> {size} slots",
            self.len
        );

        match self.storage.rehash(&self.strategy, &self.hash_set, size) {
            Ok(collisions) => {
                self.counters.record_collisions(collisions);

                log::debug!(
                    "Rehashed {} entries into {size} slots in {:?} ({collisions} collisions)",
                    self.len,
                    start.elapsed(),
                );
            }
            Err(e) => {
                log::warn!(
                    "Could not rehash {} entries into {size} slots ({e:?}), keeping {old_size} slots",
                    self.len,
                );
            }
        }

        self.resize_policy.reset(self.len);
    }
}
