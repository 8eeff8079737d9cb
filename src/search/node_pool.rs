//! Index-based arena for UCT nodes (C7b support). Unlike the teacher's
//! C++ ancestor, there is no pointer-invalidation hazard here: callers
//! hold `usize` indices, not references, so the backing `Vec` is free to
//! reallocate as it grows. Growth stops at `cap`; a full pool means no
//! further expansion, not an error — the search keeps working the tree
//! it already has.

use tracing::debug;

pub struct NodePool<T> {
    nodes: Vec<T>,
    cap: usize,
}

impl<T> NodePool<T> {
    pub fn new(cap: usize) -> Self {
        NodePool {
            nodes: Vec::new(),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.nodes.len() >= self.cap
    }

    /// Returns the new node's index, or `None` if the pool is at capacity.
    pub fn try_push(&mut self, node: T) -> Option<usize> {
        if self.is_full() {
            debug!(cap = self.cap, "node pool: at capacity, rejecting push");
            return None;
        }
        self.nodes.push(node);
        Some(self.nodes.len() - 1)
    }

    pub fn get(&self, idx: usize) -> &T {
        &self.nodes[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut T {
        &mut self.nodes[idx]
    }
}
