//! ChainingMap: separate chaining over a prime-sized array of [`Chain`]s.
//!
//! All chain nodes of one map share a single slotmap arena. `get` and
//! `contains_key` only look in the hashed bucket; `remove` walks every bucket.

use crate::chain::{Arena, Chain};
use crate::hash_fn::{AsciiSum, HashFunction};
use crate::prime::next_prime;
use crate::slot_array::SlotArray;
use core::fmt;

/// Resize is triggered before a `put` once `n / m` reaches this.
pub const MAX_LOAD_FACTOR: f64 = 1.0;

pub const DEFAULT_CAPACITY: usize = 11;

pub struct ChainingMap<V, H = AsciiSum> {
    pub(crate) buckets: SlotArray<Chain>,
    pub(crate) nodes: Arena<V>,
    pub(crate) capacity: usize,
    pub(crate) size: usize,
    hash_fn: H,
}

impl<V> ChainingMap<V> {
    /// Map with at least `capacity` buckets, hashing with [`AsciiSum`].
    pub fn new(capacity: usize) -> Self {
        Self::with_hash_function(capacity, AsciiSum)
    }
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V, H> ChainingMap<V, H>
where
    H: HashFunction,
{
    pub fn with_hash_function(capacity: usize, hash_fn: H) -> Self {
        let capacity = next_prime(capacity);
        Self {
            buckets: SlotArray::filled(capacity, Chain::new),
            nodes: Arena::with_key(),
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

    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|c| c.is_empty()).count()
    }

    /// Home bucket of `key` under the current capacity.
    pub(crate) fn bucket_index(&self, key: &str) -> usize {
        (self.hash_fn.hash(key) % self.capacity as u64) as usize
    }

    pub fn put(&mut self, key: impl Into<String>, value: V) {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.resize_table(self.capacity * 2);
        }
        let key = key.into();
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];
        match chain.get_mut(&mut self.nodes, &key) {
            Some(slot) => *slot = value,
            None => {
                chain.insert(&mut self.nodes, key, value);
                self.size += 1;
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.bucket_index(key)].get(&self.nodes, key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let chain = self.buckets[self.bucket_index(key)];
        chain.get_mut(&mut self.nodes, key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets[self.bucket_index(key)]
            .find(&self.nodes, key)
            .is_some()
    }

    /// Removes `key` from every bucket that holds it. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) {
        for chain in self.buckets.iter_mut() {
            if chain.remove(&mut self.nodes, key).is_some() {
                self.size -= 1;
            }
        }
    }

    /// Rebuilds the table with `next_prime(new_capacity)` buckets and
    /// rehashes every pair. Only `new_capacity == 0` is ignored; a capacity
    /// below the current size is honoured, and the rehash then grows the
    /// table again as needed.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }
        let capacity = next_prime(new_capacity);
        let old_buckets = core::mem::replace(
            &mut self.buckets,
            SlotArray::filled(capacity, Chain::new),
        );
        let mut old_nodes = core::mem::replace(&mut self.nodes, Arena::with_key());
        self.capacity = capacity;
        self.size = 0;
        for chain in old_buckets {
            let mut cur = chain.head();
            while let Some(k) = cur {
                let Some(node) = old_nodes.remove(k) else {
                    break;
                };
                cur = node.next;
                self.put(node.key, node.value);
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

    /// Empties every bucket. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.buckets = SlotArray::filled(self.capacity, Chain::new);
        self.nodes.clear();
        self.size = 0;
    }

    /// Pairs in bucket order, each chain from its head.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        let nodes = &self.nodes;
        self.buckets.iter().flat_map(move |chain| chain.iter(nodes))
    }
}

impl<V: fmt::Debug, H> fmt::Display for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            write!(f, "{}:", i)?;
            for (k, v) in chain.iter(&self.nodes) {
                write!(f, " -> ({}: {:?})", k, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingMap")
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
