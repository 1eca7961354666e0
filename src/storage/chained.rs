// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{to_index, Lookup};
use crate::{hash::HashFunctionSet, key::UserKey, Error, HashMap};

type Bucket<V> = Vec<(UserKey, V)>;

/// Bucket storage for separate chaining
///
/// Each bucket keeps its entries oldest-first, so scanning it in reverse
/// visits the most recently inserted entry first.
pub struct Chained<V> {
    buckets: Vec<Bucket<V>>,
}

impl<V> Chained<V> {
    pub fn with_size(size: u64) -> Self {
        Self {
            buckets: std::iter::repeat_with(Vec::new).take(to_index(size)).collect(),
        }
    }

    pub fn size(&self) -> u64 {
        self.buckets.len() as u64
    }

    #[expect(clippy::expect_used, reason = "home slot is reduced modulo size")]
    fn bucket(&self, home: u64) -> &Bucket<V> {
        self.buckets
            .get(to_index(home))
            .expect("home slot should be in range")
    }

    #[expect(clippy::expect_used, reason = "home slot is reduced modulo size")]
    fn bucket_mut(&mut self, home: u64) -> &mut Bucket<V> {
        self.buckets
            .get_mut(to_index(home))
            .expect("home slot should be in range")
    }

    /// Puts the entry at the front of its chain.
    ///
    /// Returns the number of collisions caused (1 if the bucket was not
    /// empty, 0 otherwise).
    pub fn insert(&mut self, home: u64, key: UserKey, value: V) -> crate::Result<u64> {
        let bucket = self.bucket_mut(home);

        if bucket.iter().any(|(k, _)| *k == key) {
            return Err(Error::DuplicateKey);
        }

        let collisions = u64::from(!bucket.is_empty());
        bucket.push((key, value));

        Ok(collisions)
    }

    /// Scans the key's bucket, newest entry first.
    ///
    /// Counts one probe for the bucket access, plus one per entry that did
    /// not match.
    pub fn get(&self, home: u64, key: &str) -> Lookup<&V> {
        let mut probes = 1;

        for (k, v) in self.bucket(home).iter().rev() {
            if k == key {
                return Lookup {
                    item: Some(v),
                    probes,
                };
            }
            probes += 1;
        }

        Lookup {
            item: None,
            probes,
        }
    }

    pub fn remove(&mut self, home: u64, key: &str) -> Option<V> {
        let bucket = self.bucket_mut(home);
        let pos = bucket.iter().rposition(|(k, _)| k == key)?;
        Some(bucket.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().rev().map(|(k, v)| (k.as_str(), v)))
    }

    /// Moves every entry into a fresh set of `size` buckets.
    ///
    /// Each chain is replayed head-first through the regular insert path, so
    /// entries that share a bucket again end up in reverse order. Returns
    /// the collisions caused by the replay.
    pub fn rehash(&mut self, hash_set: &HashFunctionSet, size: u64) -> u64 {
        let mut next = Self::with_size(size);
        let mut collisions = 0;

        for bucket in std::mem::take(&mut self.buckets) {
            for (key, value) in bucket.into_iter().rev() {
                let home = hash_set.primary(&key, size);
                let target = next.bucket_mut(home);

                collisions += u64::from(!target.is_empty());
                target.push((key, value));
            }
        }

        *self = next;

        collisions
    }

    /// Maps chain length to the number of buckets with that length.
    pub fn chain_length_histogram(&self) -> HashMap<usize, usize> {
        let mut histogram = HashMap::default();

        for bucket in &self.buckets {
            *histogram.entry(bucket.len()).or_default() += 1;
        }

        histogram
    }
}
