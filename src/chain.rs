//! Chain: singly linked bucket list whose nodes live in a shared arena.
//!
//! Every bucket of a [`ChainingMap`](crate::ChainingMap) is a `Chain`: a head
//! link plus a length. The nodes themselves are stored in one
//! `SlotMap<NodeKey, Node<V>>` owned by the map, and link to each other by
//! generational key. A chain is therefore `Copy`, and every operation that
//! walks or edits it takes the arena explicitly.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of a chain node.
    pub struct NodeKey;
}

#[derive(Debug)]
pub struct Node<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: Option<NodeKey>,
}

impl<V> Node<V> {
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn value(&self) -> &V {
        &self.value
    }
    pub fn next(&self) -> Option<NodeKey> {
        self.next
    }
}

pub type Arena<V> = SlotMap<NodeKey, Node<V>>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Chain {
    head: Option<NodeKey>,
    len: usize,
}

impl Chain {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn head(&self) -> Option<NodeKey> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Prepends `(key, value)`. Does not check for an existing node with
    /// the same key.
    pub fn insert<V>(&mut self, nodes: &mut Arena<V>, key: String, value: V) -> NodeKey {
        let next = self.head;
        let k = nodes.insert(Node { key, value, next });
        self.head = Some(k);
        self.len += 1;
        k
    }

    /// Arena key of the first node holding `key`.
    pub fn find<V>(&self, nodes: &Arena<V>, key: &str) -> Option<NodeKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = nodes.get(k)?;
            if node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    pub fn get<'a, V>(&self, nodes: &'a Arena<V>, key: &str) -> Option<&'a V> {
        let k = self.find(nodes, key)?;
        nodes.get(k).map(|n| &n.value)
    }

    pub fn get_mut<'a, V>(&self, nodes: &'a mut Arena<V>, key: &str) -> Option<&'a mut V> {
        let k = self.find(nodes, key)?;
        nodes.get_mut(k).map(|n| &mut n.value)
    }

    /// Unlinks and frees the first node holding `key`.
    pub fn remove<V>(&mut self, nodes: &mut Arena<V>, key: &str) -> Option<V> {
        let mut prev: Option<NodeKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let (matches, next) = {
                let node = nodes.get(k)?;
                (node.key == key, node.next)
            };
            if matches {
                match prev {
                    None => self.head = next,
                    Some(p) => nodes.get_mut(p)?.next = next,
                }
                self.len -= 1;
                return nodes.remove(k).map(|n| n.value);
            }
            prev = cur;
            cur = next;
        }
        None
    }

    pub fn iter<'a, V>(&self, nodes: &'a Arena<V>) -> ChainIter<'a, V> {
        ChainIter {
            nodes,
            cur: self.head,
        }
    }
}

/// Walks a chain from its head, yielding `(key, value)` per node.
pub struct ChainIter<'a, V> {
    nodes: &'a Arena<V>,
    cur: Option<NodeKey>,
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        Some((node.key.as_str(), &node.value))
    }
}
