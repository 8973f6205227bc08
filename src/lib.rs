//! prime-hashmap: two string-keyed hash tables built from scratch, plus a
//! mode finder that runs on the internals of one of them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep each table's probing, deletion and growth rules small and
//!   explicit, with the capacity invariant shared between them.
//! - Layers:
//!   - `prime`: `is_prime` / `next_prime`. Every capacity a table holds is an
//!     odd prime at least as large as the one requested.
//!   - `slot_array`: fixed-length slot storage with checked access that
//!     reports out-of-range positions as `SlotError::OutOfBounds`.
//!   - `chain`: singly linked bucket lists whose nodes live in one
//!     `slotmap` arena per table and link by generational key.
//!   - `OpenAddressingMap<V, H>`: quadratic probing with tombstones.
//!   - `ChainingMap<V, H>`: separate chaining over `chain`.
//!   - `find_mode`: frequency counting on a private `ChainingMap<usize>`.
//!
//! Constraints
//! - Single-threaded; mutation goes through `&mut self`, nothing is shared.
//! - Keys are `String`s. Hash functions are any `HashFunction`, including
//!   `Fn(&str) -> u64` closures and `BuildHasher` adapters.
//! - Growth is checked before insertion: open addressing doubles once
//!   `n / m >= 0.5`, chaining once `n / m >= 1.0`; the doubled size is then
//!   rounded up to a prime.
//!
//! Open addressing
//! - `put` probes `(h + j²) mod m`. It overwrites a live entry with the same
//!   key, and otherwise stores into the first empty or tombstoned slot it
//!   meets. It does not look past a tombstone for a live copy of the key.
//! - `get`, `contains_key` and `remove` scan slots `0..m` in order and act on
//!   the first live match. `remove` only marks the entry as a tombstone.
//! - Tombstones are dropped by `resize_table`, which reinserts the live
//!   entries of the old array through `put`.
//! - Iterators hold their own cursor and borrow the map, so several can run
//!   at once.
//!
//! Separate chaining
//! - `put`, `get` and `contains_key` only touch the hashed bucket. `remove`
//!   walks every bucket.
//! - `resize_table` ignores only a zero capacity; shrinking below the size
//!   is allowed, and rehashing grows the table back as needed.
//!
//! Mode finding
//! - `find_mode` reads and writes the counter's chains and node arena
//!   directly (crate-internal fields), hashing each element once per pass.
//!
//! Non-goals
//! - Thread safety, persistence, non-string keys, compaction outside resize.

pub mod chain;
mod chaining;
pub mod hash_fn;
mod mode;
mod open_addressing;
mod prime;
mod slot_array;

mod map_proptest;

// Public surface
pub use chaining::ChainingMap;
pub use hash_fn::{
    hash_function_1, hash_function_2, AsciiSum, BuildHasherFn, HashFunction, WeightedAsciiSum,
};
pub use mode::find_mode;
pub use open_addressing::{Entry, Iter, OpenAddressingMap};
pub use prime::{is_prime, next_prime};
pub use slot_array::{SlotArray, SlotError};

/// Load-factor thresholds and defaults.
pub mod limits {
    pub use crate::chaining::{DEFAULT_CAPACITY, MAX_LOAD_FACTOR as CHAINING_MAX_LOAD};
    pub use crate::open_addressing::MAX_LOAD_FACTOR as OPEN_ADDRESSING_MAX_LOAD;
}
