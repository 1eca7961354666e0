// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::{to_index, Lookup};
use crate::{
    hash::{HashFunctionSet, KeyHashes},
    key::UserKey,
    slot::Slot,
    strategy::{ProbeSequence, Strategy},
    Error,
};

/// What an insert scan sees at a slot
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Seen {
    Empty,
    Tombstone,
    Occupied,
    SameKey,
}

impl<V> From<&Slot<V>> for Seen {
    fn from(slot: &Slot<V>) -> Self {
        match slot {
            Slot::Empty => Self::Empty,
            Slot::Tombstone => Self::Tombstone,
            Slot::Occupied { .. } => Self::Occupied,
        }
    }
}

/// Slot chosen for an insert
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Target {
    /// Slot index
    idx: u64,

    /// Attempt number that produced the slot, which equals the number of
    /// slots passed over before it
    attempt: u64,
}

/// Walks the probe sequence until an insert position is found.
///
/// The first tombstone on the sequence is remembered and preferred over the
/// empty slot that ends the scan; scanning continues past it so that a live
/// duplicate further along the sequence is still detected.
fn find_vacancy(
    strategy: &Strategy,
    hashes: KeyHashes,
    size: u64,
    mut seen_at: impl FnMut(u64) -> Seen,
) -> crate::Result<Target> {
    let mut first_tombstone = None;

    for (attempt, idx) in (0u64..).zip(ProbeSequence::new(strategy, hashes, size)) {
        match seen_at(idx) {
            Seen::SameKey => return Err(Error::DuplicateKey),
            Seen::Empty => return Ok(first_tombstone.unwrap_or(Target { idx, attempt })),
            Seen::Tombstone => {
                if first_tombstone.is_none() {
                    first_tombstone = Some(Target { idx, attempt });
                }
            }
            Seen::Occupied => {}
        }
    }

    first_tombstone.ok_or(Error::TableFull)
}

/// Slot array for open addressing
pub struct Open<V> {
    slots: Vec<Slot<V>>,
    tombstones: usize,
}

impl<V> Open<V> {
    pub fn with_size(size: u64) -> Self {
        Self {
            slots: std::iter::repeat_with(Slot::default)
                .take(to_index(size))
                .collect(),
            tombstones: 0,
        }
    }

    pub fn size(&self) -> u64 {
        self.slots.len() as u64
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[expect(clippy::expect_used, reason = "probe indices are reduced modulo size")]
    fn slot(&self, idx: u64) -> &Slot<V> {
        self.slots
            .get(to_index(idx))
            .expect("probe index should be in range")
    }

    #[expect(clippy::expect_used, reason = "probe indices are reduced modulo size")]
    fn slot_mut(&mut self, idx: u64) -> &mut Slot<V> {
        self.slots
            .get_mut(to_index(idx))
            .expect("probe index should be in range")
    }

    /// Places the entry on its probe sequence.
    ///
    /// Returns the number of collisions, i.e. the number of slots passed over
    /// before the entry could be placed.
    pub fn insert(
        &mut self,
        strategy: &Strategy,
        hashes: KeyHashes,
        key: UserKey,
        value: V,
    ) -> crate::Result<u64> {
        let target = find_vacancy(strategy, hashes, self.size(), |idx| {
            let slot = self.slot(idx);

            if slot.holds(&key) {
                Seen::SameKey
            } else {
                Seen::from(slot)
            }
        })?;

        if self.slot(target.idx).is_tombstone() {
            self.tombstones -= 1;
        }
        *self.slot_mut(target.idx) = Slot::Occupied { key, value };

        Ok(target.attempt)
    }

    /// Walks the key's probe sequence, reporting every visited index.
    ///
    /// Stops at the matching slot or at the first empty slot. Tombstones
    /// never end the walk.
    fn walk(
        &self,
        strategy: &Strategy,
        hashes: KeyHashes,
        key: &str,
        mut visit: impl FnMut(u64),
    ) -> Option<u64> {
        for idx in ProbeSequence::new(strategy, hashes, self.size()) {
            visit(idx);

            let slot = self.slot(idx);

            if slot.holds(key) {
                return Some(idx);
            }
            if slot.is_empty() {
                return None;
            }
        }

        None
    }

    pub fn get(&self, strategy: &Strategy, hashes: KeyHashes, key: &str) -> Lookup<&V> {
        let mut probes = 0;
        let found = self.walk(strategy, hashes, key, |_| probes += 1);

        Lookup {
            item: found
                .and_then(|idx| self.slot(idx).entry())
                .map(|(_, value)| value),
            probes,
        }
    }

    pub fn trace(&self, strategy: &Strategy, hashes: KeyHashes, key: &str) -> Vec<u64> {
        let mut path = vec![];
        self.walk(strategy, hashes, key, |idx| path.push(idx));
        path
    }

    pub fn remove(&mut self, strategy: &Strategy, hashes: KeyHashes, key: &str) -> Option<V> {
        let idx = self.walk(strategy, hashes, key, |_| {})?;
        let (_, value) = self.slot_mut(idx).bury()?;
        self.tombstones += 1;
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.slots.iter().filter_map(Slot::entry)
    }

    /// Replays every live entry into a fresh slot array of `size` slots.
    ///
    /// Placement is planned on an occupancy map first, using the same scan
    /// as [`Open::insert`], and entries are only moved once every one of
    /// them has a slot. If planning fails, the table is left untouched.
    ///
    /// Returns the collisions caused by the replay, counted like inserts.
    pub fn rehash(
        &mut self,
        strategy: &Strategy,
        hash_set: &HashFunctionSet,
        size: u64,
    ) -> crate::Result<u64> {
        let mut taken = vec![false; to_index(size)];
        let mut plan = Vec::with_capacity(self.slots.len() - self.tombstones);
        let mut collisions = 0;

        for (from, slot) in self.slots.iter().enumerate() {
            let Some((key, _)) = slot.entry() else {
                continue;
            };

            let hashes = hash_set.hashes(key, size);
            let target = find_vacancy(strategy, hashes, size, |idx| {
                if taken.get(to_index(idx)).copied().unwrap_or(true) {
                    Seen::Occupied
                } else {
                    Seen::Empty
                }
            })?;

            if let Some(flag) = taken.get_mut(to_index(target.idx)) {
                *flag = true;
            }
            collisions += target.attempt;
            plan.push((from, to_index(target.idx)));
        }

        let mut next = Self::with_size(size);

        for (from, to) in plan {
            if let (Some((key, value)), Some(dst)) = (
                self.slots.get_mut(from).and_then(Slot::take),
                next.slots.get_mut(to),
            ) {
                *dst = Slot::Occupied { key, value };
            }
        }

        *self = next;

        Ok(collisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{CustomProbing, DoubleHashing};
    use test_log::test;

    fn fixed(home: u64, step: u64) -> KeyHashes {
        KeyHashes { home, step }
    }

    #[test]
    fn open_insert_probes_forward() {
        let strategy = Strategy::from(DoubleHashing);
        let mut storage = Open::with_size(13);

        // All three keys share home 5 and step 4: 5 -> 9 -> 0
        assert_eq!(Ok(0), storage.insert(&strategy, fixed(5, 4), "a".into(), 1));
        assert_eq!(Ok(1), storage.insert(&strategy, fixed(5, 4), "b".into(), 2));
        assert_eq!(Ok(2), storage.insert(&strategy, fixed(5, 4), "c".into(), 3));

        assert_eq!(vec![5, 9, 0], storage.trace(&strategy, fixed(5, 4), "c"));
        assert_eq!(vec![5, 9, 0, 4], storage.trace(&strategy, fixed(5, 4), "d"));

        let lookup = storage.get(&strategy, fixed(5, 4), "c");
        assert_eq!(Some(&3), lookup.item);
        assert_eq!(3, lookup.probes);

        let lookup = storage.get(&strategy, fixed(5, 4), "d");
        assert_eq!(None, lookup.item);
        assert_eq!(4, lookup.probes);
    }

    #[test]
    fn open_tombstone_does_not_end_search() {
        let strategy = Strategy::from(DoubleHashing);
        let mut storage = Open::with_size(13);

        storage.insert(&strategy, fixed(5, 4), "a".into(), 1).unwrap();
        storage.insert(&strategy, fixed(5, 4), "b".into(), 2).unwrap();

        assert_eq!(Some(1), storage.remove(&strategy, fixed(5, 4), "a"));
        assert_eq!(1, storage.tombstones());

        assert_eq!(Some(&2), storage.get(&strategy, fixed(5, 4), "b").item);
        assert_eq!(vec![5, 9], storage.trace(&strategy, fixed(5, 4), "b"));
    }

    #[test]
    fn open_reuses_first_tombstone() {
        let strategy = Strategy::from(DoubleHashing);
        let mut storage = Open::with_size(13);

        for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
            storage.insert(&strategy, fixed(5, 4), key.into(), i).unwrap();
        }

        storage.remove(&strategy, fixed(5, 4), "a").unwrap();
        storage.remove(&strategy, fixed(5, 4), "b").unwrap();
        assert_eq!(2, storage.tombstones());

        // Lands on slot 5 (first tombstone), not slot 4 (first empty)
        assert_eq!(Ok(0), storage.insert(&strategy, fixed(5, 4), "d".into(), 9));
        assert_eq!(1, storage.tombstones());
        assert_eq!(vec![5], storage.trace(&strategy, fixed(5, 4), "d"));
    }

    #[test]
    fn open_duplicate_behind_tombstone() {
        let strategy = Strategy::from(DoubleHashing);
        let mut storage = Open::with_size(13);

        storage.insert(&strategy, fixed(5, 4), "a".into(), 1).unwrap();
        storage.insert(&strategy, fixed(5, 4), "b".into(), 2).unwrap();
        storage.remove(&strategy, fixed(5, 4), "a").unwrap();

        assert_eq!(
            Err(Error::DuplicateKey),
            storage.insert(&strategy, fixed(5, 4), "b".into(), 3)
        );
        assert_eq!(Some(&2), storage.get(&strategy, fixed(5, 4), "b").item);
        assert_eq!(1, storage.tombstones());
    }

    #[test]
    fn open_table_full() {
        // c1 = 13 cancels the linear term, quadratic residues only reach 7 slots
        let strategy = Strategy::from(CustomProbing::new(13, 1));
        let mut storage = Open::with_size(13);

        for i in 0..7 {
            storage
                .insert(&strategy, fixed(0, 1), format!("k{i}"), i)
                .unwrap();
        }

        assert_eq!(
            Err(Error::TableFull),
            storage.insert(&strategy, fixed(0, 1), "k7".into(), 7)
        );
        assert_eq!(7, storage.iter().count());
    }

    #[test]
    fn open_table_full_reuses_tombstone() {
        let strategy = Strategy::from(CustomProbing::new(13, 1));
        let mut storage = Open::with_size(13);

        for i in 0..7 {
            storage
                .insert(&strategy, fixed(0, 1), format!("k{i}"), i)
                .unwrap();
        }
        storage.remove(&strategy, fixed(0, 1), "k3").unwrap();

        assert!(storage
            .insert(&strategy, fixed(0, 1), "k7".into(), 7)
            .is_ok());
        assert_eq!(0, storage.tombstones());
    }

    #[test]
    fn open_rehash_drops_tombstones() {
        let strategy = Strategy::from(DoubleHashing);
        let hash_set = HashFunctionSet::default();
        let mut storage = Open::with_size(13);

        for i in 0..6 {
            let key = format!("key{i}");
            let hashes = hash_set.hashes(&key, 13);
            storage.insert(&strategy, hashes, key, i).unwrap();
        }
        storage
            .remove(&strategy, hash_set.hashes("key2", 13), "key2")
            .unwrap();

        let collisions = storage.rehash(&strategy, &hash_set, 29).unwrap();
        assert_eq!(29, storage.size());
        assert_eq!(0, storage.tombstones());
        assert_eq!(5, storage.iter().count());

        // Without tombstones, a hit passes exactly the slots its insert collided with
        let mut passed = 0;

        for i in [0, 1, 3, 4, 5] {
            let key = format!("key{i}");
            let hashes = hash_set.hashes(&key, 29);
            let lookup = storage.get(&strategy, hashes, &key);

            assert_eq!(Some(&i), lookup.item);
            passed += lookup.probes - 1;
        }
        assert_eq!(passed, collisions);
    }

    #[test]
    fn open_rehash_failure_keeps_storage() {
        let strategy = Strategy::from(CustomProbing::new(13, 1));
        let hash_set = HashFunctionSet::default();
        let mut storage = Open::with_size(29);

        // Each key reaches 15 of 29 slots, so 14 entries always fit
        for i in 0..14 {
            let key = format!("key{i}");
            let hashes = hash_set.hashes(&key, 29);
            storage.insert(&strategy, hashes, key, i).unwrap();
        }
        let before = storage
            .iter()
            .map(|(k, v)| (k.to_owned(), *v))
            .collect::<Vec<_>>();

        // 14 entries cannot fit into 13 slots
        assert_eq!(Err(Error::TableFull), storage.rehash(&strategy, &hash_set, 13));

        assert_eq!(29, storage.size());
        assert_eq!(
            before,
            storage
                .iter()
                .map(|(k, v)| (k.to_owned(), *v))
                .collect::<Vec<_>>()
        );

        for i in 0..14 {
            let key = format!("key{i}");
            let hashes = hash_set.hashes(&key, 29);
            assert_eq!(Some(&i), storage.get(&strategy, hashes, &key).item);
        }
    }
}
