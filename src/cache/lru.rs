//! LRU Core Module
//!
//! Single-threaded LRU map built on an arena of nodes plus a key index.
//!
//! Nodes live in a `Vec` and link to each other through [`SlotId`] handles,
//! so move-to-front, removal and eviction are all O(1) without shared
//! ownership of list nodes. Released slots go on a free list and are reused.

use std::collections::HashMap;

use crate::cache::entry::{CacheEntry, Node, SlotId};
use crate::error::{KvError, Result};

// == LRU Core ==
/// Bounded recency-ordered map.
///
/// - Head = most recently used
/// - Tail = least recently used
#[derive(Debug)]
pub struct LruCore {
    /// Node storage addressed by slot handles
    slots: Vec<Node>,
    /// Released slots available for reuse
    free: Vec<SlotId>,
    /// Key to node handle
    index: HashMap<String, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    /// Number of linked nodes
    len: usize,
    capacity: usize,
}

impl LruCore {
    // == Constructor ==
    /// Creates an empty LRU with a fixed capacity.
    ///
    /// A capacity of zero is a configuration error.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(KvError::Config(
                "cache capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            len: 0,
            capacity,
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&String> {
        let id = *self.index.get(key)?;
        self.move_to_front(id);
        Some(&self.slots[id.0].entry.value)
    }

    // == Put ==
    /// Inserts or overwrites `key`, moving it to the front.
    ///
    /// When a new key pushes the size past capacity, the tail entry is
    /// evicted and returned. At most one entry is evicted per call.
    pub fn put(&mut self, key: String, value: String) -> Option<CacheEntry> {
        if let Some(&id) = self.index.get(&key) {
            self.slots[id.0].entry.value = value;
            self.move_to_front(id);
            return None;
        }

        let id = self.allocate(CacheEntry { key: key.clone(), value });
        self.attach_front(id);
        self.index.insert(key, id);
        self.len += 1;

        if self.len > self.capacity {
            self.pop_lru()
        } else {
            None
        }
    }

    // == Delete ==
    /// Removes `key` if present and returns its value.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        let id = self.index.remove(key)?;
        Some(self.release(id).value)
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<CacheEntry> {
        let id = self.tail?;
        let entry = self.release(id);
        self.index.remove(&entry.key);
        Some(entry)
    }

    // == Peek LRU ==
    /// Returns the least recently used key without changing order.
    pub fn peek_lru(&self) -> Option<&str> {
        self.tail.map(|id| self.slots[id.0].entry.key.as_str())
    }

    /// Returns true if `key` is resident. Does not change order.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys In Recency Order ==
    /// Returns resident keys from most to least recently used.
    pub fn keys_mru(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.slots[id.0];
            keys.push(node.entry.key.clone());
            cursor = node.next;
        }
        keys
    }

    // == Consistency Check ==
    /// Verifies the index/list bijection and the capacity bound.
    ///
    /// Walks the whole list, so this is O(n).
    pub fn is_consistent(&self) -> bool {
        if self.index.len() != self.len || self.len > self.capacity {
            return false;
        }

        let mut walked = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.slots[id.0];
            if node.prev != prev || self.index.get(&node.entry.key) != Some(&id) {
                return false;
            }
            walked += 1;
            if walked > self.len {
                return false;
            }
            prev = Some(id);
            cursor = node.next;
        }

        walked == self.len && self.tail == prev
    }

    // == Arena Internals ==
    fn allocate(&mut self, entry: CacheEntry) -> SlotId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Node::new(entry);
                id
            }
            None => {
                self.slots.push(Node::new(entry));
                SlotId(self.slots.len() - 1)
            }
        }
    }

    /// Unlinks the node, returns its entry and puts the slot on the free list.
    ///
    /// The caller is responsible for the index mapping.
    fn release(&mut self, id: SlotId) -> CacheEntry {
        self.detach(id);
        self.len -= 1;
        self.free.push(id);
        std::mem::take(&mut self.slots[id.0].entry)
    }

    fn detach(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = &mut self.slots[id.0];
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(p) => self.slots[p.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n.0].prev = prev,
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        {
            let node = &mut self.slots[id.0];
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(h) => self.slots[h.0].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }
}
