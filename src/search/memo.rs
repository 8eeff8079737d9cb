//! Bounded LRU-ish memo (C8): a hashmap side index over an array-based
//! doubly-linked recency list. `add` inserts at the front; once the
//! entry count crosses the cap, the oldest quarter is dropped in one
//! sweep. Reads do not reorder the list — a deliberate cheap
//! approximation of true LRU.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

pub struct Memo<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    index: HashMap<K, usize>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    cap: usize,
}

impl<K: Eq + Hash + Clone, V> Memo<K, V> {
    pub fn new(cap: usize) -> Self {
        Memo {
            slots: Vec::new(),
            index: HashMap::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            cap: cap.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Looks up `key`. Does not touch recency ordering.
    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.slots[idx].as_ref().map(|n| &n.value)
    }

    /// Inserts or overwrites `key`, placing it at the front of the
    /// recency list. Sweeps the oldest quarter if this crosses the cap.
    pub fn add(&mut self, key: K, value: V) {
        if let Some(&idx) = self.index.get(&key) {
            self.slots[idx].as_mut().unwrap().value = value;
            self.unlink(idx);
            self.push_front(idx);
            return;
        }

        let idx = if let Some(free_idx) = self.free.pop() {
            self.slots[free_idx] = Some(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            free_idx
        } else {
            self.slots.push(Some(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            }));
            self.slots.len() - 1
        };
        self.index.insert(key, idx);
        self.push_front(idx);

        if self.index.len() > self.cap {
            self.evict_oldest_quarter();
        }
    }

    fn push_front(&mut self, idx: usize) {
        {
            let node = self.slots[idx].as_mut().unwrap();
            node.prev = None;
            node.next = self.head;
        }
        if let Some(old_head) = self.head {
            self.slots[old_head].as_mut().unwrap().prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.slots[idx].as_ref().unwrap();
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.slots[p].as_mut().unwrap().next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].as_mut().unwrap().prev = prev,
            None => self.tail = prev,
        }
    }

    fn evict_oldest_quarter(&mut self) {
        let drop_count = self.index.len() / 4;
        for _ in 0..drop_count {
            let Some(tail_idx) = self.tail else { break };
            self.unlink(tail_idx);
            if let Some(node) = self.slots[tail_idx].take() {
                self.index.remove(&node.key);
            }
            self.free.push(tail_idx);
        }
        debug!(
            dropped = drop_count,
            remaining = self.index.len(),
            cap = self.cap,
            "memo: evicted oldest quarter past cap"
        );
    }
}
