//! find_mode: most frequent value(s) of a sequence of strings.
//!
//! Counting goes straight through the chains and node arena of a private
//! `ChainingMap<usize>` instead of its `put`/`get`, so each element costs one
//! hash and one chain walk.

use crate::chaining::{ChainingMap, MAX_LOAD_FACTOR};

/// Returns the mode value(s) of `values` and their frequency.
///
/// Ties are all returned, each once, in no particular order. An empty input
/// yields `(vec![], 0)`.
pub fn find_mode<S: AsRef<str>>(values: &[S]) -> (Vec<String>, usize) {
    let mut counter: ChainingMap<usize> = ChainingMap::default();

    for value in values {
        let value = value.as_ref();
        if counter.table_load() >= MAX_LOAD_FACTOR {
            counter.resize_table(counter.capacity * 2);
        }
        let index = counter.bucket_index(value);
        let chain = &mut counter.buckets[index];
        match chain.get_mut(&mut counter.nodes, value) {
            Some(count) => *count += 1,
            None => {
                chain.insert(&mut counter.nodes, value.to_owned(), 1);
                counter.size += 1;
            }
        }
    }

    // Walks every node of each element's bucket, so a key can be pushed
    // more than once; the dedup below removes the repeats.
    let mut max_freq: Option<usize> = None;
    let mut candidates: Vec<&str> = Vec::new();
    for value in values {
        let chain = &counter.buckets[counter.bucket_index(value.as_ref())];
        for (key, &count) in chain.iter(&counter.nodes) {
            match max_freq {
                Some(freq) if count < freq => {}
                Some(freq) if count == freq => candidates.push(key),
                _ => {
                    max_freq = Some(count);
                    candidates.clear();
                    candidates.push(key);
                }
            }
        }
    }

    let mut modes: Vec<String> = Vec::new();
    for candidate in candidates {
        if !modes.iter().any(|m| m == candidate) {
            modes.push(candidate.to_owned());
        }
    }
    (modes, max_freq.unwrap_or(0))
}
