//! OpenAddressingMap: quadratic probing over a prime-sized slot array, with
//! tombstone deletion.
//!
//! Insertion probes `(h + j²) mod m` from the key's hash. Lookups and removal
//! do not follow the probe sequence: they scan every slot from index 0 and
//! stop at the first live entry with the key. A `put` that meets a tombstone
//! stores the new entry there immediately, without checking whether the key
//! is still live further along its probe chain; such a key can then appear
//! twice, and lookups see the copy in the lowest slot.

use crate::hash_fn::{AsciiSum, HashFunction};
use crate::prime::next_prime;
use crate::slot_array::SlotArray;
use core::fmt;

/// Resize is triggered before a `put` once `n / m` reaches this.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Entry<V> {
    key: String,
    value: V,
    is_tombstone: bool,
}

impl<V> Entry<V> {
    fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            is_tombstone: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn value(&self) -> &V {
        &self.value
    }
    pub fn is_tombstone(&self) -> bool {
        self.is_tombstone
    }

    fn is_live_with(&self, key: &str) -> bool {
        !self.is_tombstone && self.key == key
    }

    fn mark_tombstone(&mut self) {
        self.is_tombstone = true;
    }
}

impl<V: fmt::Debug> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "K: {} V: {:?} TS: {}",
            self.key, self.value, self.is_tombstone
        )
    }
}

pub struct OpenAddressingMap<V, H = AsciiSum> {
    slots: SlotArray<Option<Entry<V>>>,
    capacity: usize,
    size: usize,
    hash_fn: H,
}

impl<V> OpenAddressingMap<V> {
    /// Map with at least `capacity` slots, hashing with [`AsciiSum`].
    pub fn new(capacity: usize) -> Self {
        Self::with_hash_function(capacity, AsciiSum)
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: HashFunction,
{
    pub fn with_hash_function(capacity: usize, hash_fn: H) -> Self {
        let capacity = next_prime(capacity);
        Self {
            slots: SlotArray::filled(capacity, || None),
            capacity,
            size: 0,
            hash_fn,
        }
    }

    pub fn hash_function(&self) -> &H {
        &self.hash_fn
    }

    pub fn get_size(&self) -> usize {
        self.size
    }
    pub fn get_capacity(&self) -> usize {
        self.capacity
    }
    pub fn len(&self) -> usize {
        self.size
    }
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Slots that are never-used or tombstoned.
    pub fn empty_buckets(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.as_ref().map_or(true, Entry::is_tombstone))
            .count()
    }

    /// `j`-th slot of the quadratic probe sequence starting at `hash`.
    fn probe(&self, hash: u64, j: u64) -> usize {
        let m = self.capacity as u64;
        let step = (j % m) * (j % m) % m;
        ((hash % m + step) % m) as usize
    }

    /// Inserts or overwrites `key`.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.resize_table(self.capacity * 2);
        }
        let key = key.into();
        let hash = self.hash_fn.hash(&key);
        let mut j = 0u64;
        loop {
            let index = self.probe(hash, j);
            match &mut self.slots[index] {
                Some(entry) if entry.is_tombstone() => break,
                Some(entry) if entry.key == key => {
                    entry.value = value;
                    return;
                }
                Some(_) => j += 1,
                None => break,
            }
        }
        // `j` is where the probe stopped: empty or tombstoned.
        let index = self.probe(hash, j);
        self.slots[index] = Some(Entry::new(key, value));
        self.size += 1;
    }

    fn find_index(&self, key: &str) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .map_or(false, |entry| entry.is_live_with(key))
        })
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find_index(key)?;
        self.slots[index].as_ref().map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_index(key)?;
        self.slots[index].as_mut().map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Tombstones the first live entry for `key`; absent keys are a no-op.
    pub fn remove(&mut self, key: &str) {
        if let Some(index) = self.find_index(key) {
            if let Some(entry) = self.slots[index].as_mut() {
                entry.mark_tombstone();
                self.size -= 1;
            }
        }
    }

    /// Rebuilds the table with `next_prime(new_capacity)` slots, rehashing
    /// live entries and dropping tombstones. Ignored when `new_capacity` is
    /// smaller than the current size.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }
        let capacity = next_prime(new_capacity);
        let old = core::mem::replace(&mut self.slots, SlotArray::filled(capacity, || None));
        self.capacity = capacity;
        self.size = 0;
        for entry in old.into_iter().flatten() {
            if !entry.is_tombstone {
                self.put(entry.key, entry.value);
            }
        }
    }

    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Empties every slot. Capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.size = 0;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: &self.slots,
            cursor: 0,
        }
    }
}

/// Live entries in slot order. Each iterator carries its own cursor.
pub struct Iter<'a, V> {
    slots: &'a SlotArray<Option<Entry<V>>>,
    cursor: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Running off the end of the slot array ends the iteration.
            let slot = self.slots.get_at_index(self.cursor).ok()?;
            self.cursor += 1;
            match slot {
                Some(entry) if !entry.is_tombstone => {
                    return Some((entry.key.as_str(), &entry.value));
                }
                _ => continue,
            }
        }
    }
}

impl<'a, V, H> IntoIterator for &'a OpenAddressingMap<V, H>
where
    H: HashFunction,
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Some(entry) => writeln!(f, "{}: {}", i, entry)?,
                None => writeln!(f, "{}: None", i)?,
            }
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .field("slots", &self.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_fn::WeightedAsciiSum;
    use crate::prime::is_prime;
    use std::collections::BTreeSet;

    fn slot_of<V, H: HashFunction>(m: &OpenAddressingMap<V, H>, key: &str) -> Option<usize> {
        m.slots.iter().position(|s| {
            s.as_ref()
                .map_or(false, |e| !e.is_tombstone() && e.key() == key)
        })
    }

    #[test]
    fn fresh_map_is_all_empty_buckets() {
        let m: OpenAddressingMap<i32> = OpenAddressingMap::new(101);
        assert_eq!(m.get_capacity(), 101);
        assert_eq!(m.empty_buckets(), 101);
        assert_eq!(m.get_size(), 0);
        assert_eq!(m.table_load(), 0.0);
        assert!(m.is_empty());
    }

    #[test]
    fn construction_rounds_capacity_to_prime() {
        let m: OpenAddressingMap<i32> = OpenAddressingMap::new(20);
        assert_eq!(m.get_capacity(), 23);
        let m: OpenAddressingMap<i32> = OpenAddressingMap::new(75);
        assert_eq!(m.get_capacity(), 79);
    }

    #[test]
    fn put_get_overwrite() {
        let mut m = OpenAddressingMap::new(101);
        m.put("key1", 10);
        m.put("key2", 20);
        assert_eq!(m.get_size(), 2);
        m.put("key1", 30);
        assert_eq!(m.get_size(), 2);
        assert_eq!(m.get("key1"), Some(&30));
        assert_eq!(m.get("key2"), Some(&20));
        assert_eq!(m.get("key3"), None);
        assert!((m.table_load() - 2.0 / 101.0).abs() < 1e-12);
    }

    /// Invariant: colliding keys follow the quadratic sequence h, h+1, h+4, ...
    #[test]
    fn collisions_follow_quadratic_probe() {
        let mut m = OpenAddressingMap::new(11);
        // All permutations of "abc" share the AsciiSum hash 294, and 294 % 11 == 8.
        m.put("abc", 1);
        m.put("bca", 2);
        m.put("cab", 3);
        assert_eq!(slot_of(&m, "abc"), Some(8));
        assert_eq!(slot_of(&m, "bca"), Some(9));
        assert_eq!(slot_of(&m, "cab"), Some((8 + 4) % 11));
    }

    /// Invariant: a removed key's slot is reused by the next key that probes
    /// to it, and size counts only the new key.
    #[test]
    fn tombstone_slot_is_reused() {
        let mut m = OpenAddressingMap::new(11);
        m.put("ab", 1);
        let slot = slot_of(&m, "ab").unwrap();
        m.remove("ab");
        assert_eq!(m.get_size(), 0);
        assert_eq!(m.empty_buckets(), 11);
        assert!(m.slots[slot].as_ref().unwrap().is_tombstone());

        m.put("ba", 2);
        assert_eq!(slot_of(&m, "ba"), Some(slot));
        assert_eq!(m.get("ba"), Some(&2));
        assert_eq!(m.get("ab"), None);
        assert_eq!(m.get_size(), 1);
    }

    /// Invariant (preserved behavior): a put that meets a tombstone stops
    /// there even if the key is live later in its probe chain, leaving two
    /// live entries; lookups return the lower slot.
    #[test]
    fn tombstone_reuse_can_duplicate_a_key() {
        let mut m = OpenAddressingMap::new(11);
        m.put("ab", 1); // slot 8
        m.put("ba", 2); // slot 9
        m.remove("ab");
        m.put("ba", 3); // reuses slot 8
        assert_eq!(m.get_size(), 2);
        assert_eq!(m.get("ba"), Some(&3));
        let live: Vec<_> = m.iter().collect();
        assert_eq!(live, vec![("ba", &3), ("ba", &2)]);

        m.remove("ba");
        assert_eq!(m.get("ba"), Some(&2));
        m.remove("ba");
        assert!(!m.contains_key("ba"));
        assert_eq!(m.get_size(), 0);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut m = OpenAddressingMap::new(11);
        m.put("a", 1);
        m.remove("b");
        m.remove("a");
        m.remove("a");
        assert_eq!(m.get_size(), 0);
        assert!(!m.contains_key("a"));
    }

    #[test]
    fn resize_rounds_to_prime_and_keeps_entries() {
        let mut m = OpenAddressingMap::new(20);
        m.put("key1", 10);
        assert_eq!((m.get_size(), m.get_capacity()), (1, 23));
        m.resize_table(30);
        assert_eq!((m.get_size(), m.get_capacity()), (1, 31));
        assert_eq!(m.get("key1"), Some(&10));
        assert!(m.contains_key("key1"));
    }

    #[test]
    fn resize_below_size_is_ignored() {
        let mut m = OpenAddressingMap::new(11);
        for i in 0..5 {
            m.put(format!("k{}", i), i);
        }
        m.resize_table(4);
        assert_eq!(m.get_capacity(), 11);
        assert_eq!(m.get_size(), 5);
    }

    #[test]
    fn resize_drops_tombstones() {
        let mut m = OpenAddressingMap::new(11);
        for i in 0..4 {
            m.put(format!("k{}", i), i);
        }
        m.remove("k0");
        m.remove("k1");
        assert_eq!(m.empty_buckets(), 9);
        m.resize_table(11);
        assert!(m.slots.iter().flatten().all(|e| !e.is_tombstone()));
        assert_eq!(m.slots.iter().flatten().count(), 2);
        assert_eq!(m.get("k3"), Some(&3));
    }

    /// Resize sweep over a spread of capacities: every requested capacity
    /// leaves a prime capacity, load <= 0.5 and all keys reachable.
    #[test]
    fn resize_sweep_keeps_keys_and_load() {
        let mut m = OpenAddressingMap::with_hash_function(75, WeightedAsciiSum);
        let keys: Vec<usize> = (25..1000).step_by(13).collect();
        for k in &keys {
            m.put(k.to_string(), k * 42);
        }
        assert_eq!(m.get_size(), keys.len());
        for capacity in (111..1000).step_by(117) {
            m.resize_table(capacity);
            assert!(m.table_load() <= 0.5);
            assert!(is_prime(m.get_capacity()));
            m.put("some key", 0);
            assert!(m.contains_key("some key"));
            m.remove("some key");
            for k in &keys {
                assert!(m.contains_key(&k.to_string()));
                assert!(!m.contains_key(&(k + 1).to_string()));
            }
            assert_eq!(m.get_size(), keys.len());
        }
    }

    #[test]
    fn growth_checks_load_before_insert() {
        let mut m = OpenAddressingMap::new(53);
        for i in 0..150 {
            m.put(format!("str{}", i), i * 100);
            let before_insert = (m.get_size() - 1) as f64 / m.get_capacity() as f64;
            assert!(before_insert < 0.5);
            assert!(is_prime(m.get_capacity()));
        }
        assert_eq!(m.get_size(), 150);
        for i in 0..150 {
            assert_eq!(m.get(&format!("str{}", i)), Some(&(i * 100)));
        }
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut m = OpenAddressingMap::new(53);
        for i in 0..40 {
            m.put(format!("k{}", i), i);
        }
        let cap = m.get_capacity();
        m.clear();
        assert_eq!(m.get_size(), 0);
        assert_eq!(m.get_capacity(), cap);
        assert_eq!(m.empty_buckets(), cap);
        assert!(m.iter().next().is_none());
    }

    /// Invariant: iteration yields exactly the live entries, skipping
    /// tombstones, and independent iterators keep independent cursors.
    #[test]
    fn iterators_are_independent_and_skip_tombstones() {
        let mut m = OpenAddressingMap::new(11);
        for k in ["a", "b", "c", "d"] {
            m.put(k, k.len());
        }
        m.remove("b");

        let mut first = m.iter();
        let mut second = m.iter();
        let a = first.next();
        let b = first.next();
        assert_eq!(second.next(), a);
        assert_eq!(second.next(), b);

        let seen: BTreeSet<&str> = (&m).into_iter().map(|(k, _)| k).collect();
        assert_eq!(seen, ["a", "c", "d"].into_iter().collect());
        let pairs = m.get_keys_and_values();
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn get_mut_and_display() {
        let mut m = OpenAddressingMap::new(3);
        m.put("a", 1);
        *m.get_mut("a").unwrap() = 5;
        assert_eq!(m.get("a"), Some(&5));
        assert!(m.get_mut("b").is_none());
        // "a" hashes to 97 % 3 == 1
        assert_eq!(m.to_string(), "0: None\n1: K: a V: 5 TS: false\n2: None\n");
    }
}
