//! Hash functions: deterministic maps from a string key to a `u64`.
//!
//! The tables never look inside a hash function; anything implementing
//! [`HashFunction`] works, including plain closures `Fn(&str) -> u64`.

use core::hash::BuildHasher;
use hashbrown::hash_map::DefaultHashBuilder;

/// Deterministic `&str -> u64` mapping used to pick a home slot.
pub trait HashFunction {
    fn hash(&self, key: &str) -> u64;
}

impl<F> HashFunction for F
where
    F: Fn(&str) -> u64,
{
    #[inline]
    fn hash(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Sum of the key's byte values.
///
/// Anagrams collide, which makes this handy for forcing collisions in tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AsciiSum;

impl HashFunction for AsciiSum {
    #[inline]
    fn hash(&self, key: &str) -> u64 {
        hash_function_1(key)
    }
}

/// Position-weighted byte sum: `Σ (i + 1) * byte_i`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedAsciiSum;

impl HashFunction for WeightedAsciiSum {
    #[inline]
    fn hash(&self, key: &str) -> u64 {
        hash_function_2(key)
    }
}

/// Adapts a [`BuildHasher`] into a [`HashFunction`].
///
/// The builder is held for the table's lifetime, so every key hashes the same
/// way for as long as the table lives, even for randomly seeded builders.
#[derive(Clone, Debug, Default)]
pub struct BuildHasherFn<S = DefaultHashBuilder> {
    build: S,
}

impl<S: BuildHasher> BuildHasherFn<S> {
    pub fn new(build: S) -> Self {
        Self { build }
    }
}

impl<S: BuildHasher> HashFunction for BuildHasherFn<S> {
    #[inline]
    fn hash(&self, key: &str) -> u64 {
        self.build.hash_one(key)
    }
}

pub fn hash_function_1(key: &str) -> u64 {
    key.bytes()
        .fold(0u64, |acc, b| acc.wrapping_add(u64::from(b)))
}

pub fn hash_function_2(key: &str) -> u64 {
    key.bytes().enumerate().fold(0u64, |acc, (i, b)| {
        acc.wrapping_add((i as u64 + 1).wrapping_mul(u64::from(b)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_sum_collides_on_anagrams() {
        assert_eq!(AsciiSum.hash("ab"), 97 + 98);
        assert_eq!(AsciiSum.hash("ab"), AsciiSum.hash("ba"));
        assert_eq!(AsciiSum.hash(""), 0);
    }

    #[test]
    fn weighted_sum_separates_anagrams() {
        assert_eq!(WeightedAsciiSum.hash("ab"), 97 + 2 * 98);
        assert_eq!(WeightedAsciiSum.hash("ba"), 98 + 2 * 97);
        assert_ne!(WeightedAsciiSum.hash("ab"), WeightedAsciiSum.hash("ba"));
    }

    /// Invariant: a single builder instance hashes a key the same way every time.
    #[test]
    fn build_hasher_fn_is_stable_per_instance() {
        let h = BuildHasherFn::<DefaultHashBuilder>::default();
        for k in ["", "a", "key1", "some longer key"] {
            assert_eq!(h.hash(k), h.hash(k));
        }
    }

    #[test]
    fn closures_are_hash_functions() {
        let len_hash = |k: &str| k.len() as u64;
        assert_eq!(len_hash.hash("four"), 4);
        fn takes<H: HashFunction>(h: H) -> u64 {
            h.hash("abc")
        }
        assert_eq!(takes(|_: &str| 7u64), 7);
    }
}
