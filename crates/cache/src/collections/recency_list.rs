#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! Arena-backed doubly linked list ordering entries by recency.
//!
//! # Complexity
//! - `push_most_recent`, `move_to_most_recent`, `pop_least_recent`, `remove`,
//!   `get`, `get_mut`: `O(1)` (amortized for pushes that grow the arena).
//! - `clear`: `O(n)` due to drops.
//! - `iter`: `O(1)` per step.
//!
//! # Layout
//! Nodes live in a `Vec` of optional slots. Links are slot indices, so the list
//! needs neither `unsafe` nor reference counting. Vacated slots go on a free
//! list and are reused by later pushes. The `oldest` and `newest` markers
//! bound the sequence; a node with no `prev` is the oldest, a node with no
//! `next` is the newest.
//!
//! # Handles
//! A [`Handle`] pairs a slot index with the generation of the node pushed
//! into it. Every push draws a fresh generation, so a handle whose entry was
//! removed stays vacant even after its slot is reused. Operations given a
//! vacant handle are no-ops that return `None`.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{CacheError, CacheResult};

/// Opaque reference to a node inside a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    generation: u64,
}

impl Handle {
    /// Returns the arena slot this handle points at.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.slot
    }

    /// Returns the generation of the node this handle was minted for.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

type NodeSlot<T> = Option<Node<T>>;

#[derive(Debug)]
struct Node<T> {
    value: T,
    generation: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<T> Node<T> {
    const fn new(value: T, generation: u64) -> Self {
        Self { value, generation, prev: None, next: None }
    }
}

/// Sequence of values ordered from least to most recently used.
///
/// # Examples
///
/// ```
/// use recency_cache::collections::RecencyList;
///
/// let mut order = RecencyList::new();
/// let a = order.push_most_recent("a");
/// order.push_most_recent("b");
/// order.move_to_most_recent(a);
///
/// let items: Vec<_> = order.iter().copied().collect();
/// assert_eq!(items, vec!["b", "a"]);
/// assert_eq!(order.pop_least_recent(), Ok("b"));
/// ```
pub struct RecencyList<T> {
    nodes: Vec<NodeSlot<T>>,
    free_list: Vec<usize>,
    oldest: Option<usize>,
    newest: Option<usize>,
    len: usize,
    /// Never reset, not even by `clear`
    next_generation: u64,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            oldest: None,
            newest: None,
            len: 0,
            next_generation: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes before the arena
    /// reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            oldest: None,
            newest: None,
            len: 0,
            next_generation: 0,
        }
    }

    /// Returns the number of live entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the list holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` at the most recent end and returns its handle.
    pub fn push_most_recent(&mut self, value: T) -> Handle {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);

        let slot = self.allocate_slot(Node::new(value, generation));
        self.attach_newest(slot);
        self.len += 1;
        Handle { slot, generation }
    }

    /// Moves the entry behind `handle` to the most recent end.
    ///
    /// Does nothing when the entry is already the most recent or the handle is
    /// vacant.
    pub fn move_to_most_recent(&mut self, handle: Handle) {
        if self.newest == Some(handle.slot) || !self.is_live(handle) {
            return;
        }
        self.detach(handle.slot);
        self.attach_newest(handle.slot);
    }

    /// Removes and returns the least recently used value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Empty`] when the list has no entries.
    pub fn pop_least_recent(&mut self) -> CacheResult<T> {
        let index = self.oldest.ok_or(CacheError::Empty)?;
        self.take(index).ok_or(CacheError::Empty)
    }

    /// Removes the entry behind `handle`, returning its value.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.is_live(handle) {
            return None;
        }
        self.take(handle.slot)
    }

    /// Returns a reference to the value behind `handle`.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.node(handle.slot)
            .filter(|node| node.generation == handle.generation)
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to the value behind `handle`.
    ///
    /// Does not change the entry's position.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.nodes
            .get_mut(handle.slot)
            .and_then(Option::as_mut)
            .filter(|node| node.generation == handle.generation)
            .map(|node| &mut node.value)
    }

    /// Returns the least recently used value without removing it.
    #[must_use]
    pub fn peek_least_recent(&self) -> Option<&T> {
        self.oldest.and_then(|index| self.node(index)).map(|node| &node.value)
    }

    /// Returns the most recently used value.
    #[must_use]
    pub fn peek_most_recent(&self) -> Option<&T> {
        self.newest.and_then(|index| self.node(index)).map(|node| &node.value)
    }

    /// Removes every entry. Outstanding handles stay vacant for good.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.oldest = None;
        self.newest = None;
        self.len = 0;
    }

    /// Returns an iterator from the least to the most recently used value.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { list: self, front: self.oldest, back: self.newest, remaining: self.len }
    }

    /// Walks the links in both directions and checks they agree with `len`.
    #[must_use]
    pub fn links_consistent(&self) -> bool {
        let mut forward = 0;
        let mut prev = None;
        let mut cursor = self.oldest;
        while let Some(index) = cursor {
            let Some(node) = self.node(index) else {
                return false;
            };
            if node.prev != prev || forward > self.len {
                return false;
            }
            forward += 1;
            prev = Some(index);
            cursor = node.next;
        }
        if prev != self.newest || forward != self.len {
            return false;
        }

        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        occupied == self.len && self.nodes.len() - occupied == self.free_list.len()
    }

    fn node(&self, index: usize) -> Option<&Node<T>> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    fn is_live(&self, handle: Handle) -> bool {
        self.node(handle.slot).is_some_and(|node| node.generation == handle.generation)
    }

    fn allocate_slot(&mut self, node: Node<T>) -> usize {
        if let Some(index) = self.free_list.pop() {
            self.nodes[index] = Some(node);
            index
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    /// Unlinks and frees an occupied slot regardless of generation.
    fn take(&mut self, index: usize) -> Option<T> {
        self.node(index)?;
        self.detach(index);
        let node = self.nodes.get_mut(index).and_then(Option::take)?;
        self.free_list.push(index);
        self.len = self.len.saturating_sub(1);
        Some(node.value)
    }

    fn detach(&mut self, index: usize) {
        let (prev, next) = match self.node(index) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_index) => {
                if let Some(prev_node) = self.nodes.get_mut(prev_index).and_then(Option::as_mut) {
                    prev_node.next = next;
                }
            }
            None => self.oldest = next,
        }

        match next {
            Some(next_index) => {
                if let Some(next_node) = self.nodes.get_mut(next_index).and_then(Option::as_mut) {
                    next_node.prev = prev;
                }
            }
            None => self.newest = prev,
        }

        if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_newest(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index).and_then(Option::as_mut) {
            node.prev = self.newest;
            node.next = None;
        }

        if let Some(newest_index) = self.newest {
            if let Some(newest_node) = self.nodes.get_mut(newest_index).and_then(Option::as_mut) {
                newest_node.next = Some(index);
            }
        } else {
            self.oldest = Some(index);
        }

        self.newest = Some(index);
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RecencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("len", &self.len)
            .field("slots", &self.nodes.len())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a RecencyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`RecencyList`] from least to most recently used.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
