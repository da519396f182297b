use core::cmp::Ordering;

use slab::Slab;

use crate::error::{ListError, Result};
use crate::slot::Slot;

use super::node::{Node, NodeKey, NodeToken};
use super::traits::{Link, LinkWithPrev};

/// The unlocked list core.
///
/// Nodes live in a slab arena and link to each other by [`NodeKey`]. Every
/// method leaves the structural invariants intact: `head`, `tail` and `len`
/// agree, the forward chain from `head` has exactly `len` nodes and every
/// `prev` link mirrors the matching `next` link.
pub(crate) struct RawList {
    pub(super) nodes: Slab<Node>,
    pub(super) head: Option<NodeKey>,
    pub(super) tail: Option<NodeKey>,
    pub(super) len: usize,
    generation: u64,
}

impl RawList {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            tail: None,
            len: 0,
            generation: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> Option<NodeKey> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<NodeKey> {
        self.tail
    }

    pub(crate) fn node(&self, key: NodeKey) -> &Node {
        &self.nodes[key.to_raw()]
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> &mut Node {
        &mut self.nodes[key.to_raw()]
    }

    pub(crate) fn slot(&self, key: NodeKey) -> &Slot {
        self.node(key).slot()
    }

    pub(crate) fn token(&self, key: NodeKey) -> NodeToken {
        self.node(key).token(key)
    }

    /// Look up the node a token refers to, if it is still in the list.
    pub(crate) fn resolve(&self, token: NodeToken) -> Option<&Node> {
        self.nodes
            .get(token.key().to_raw())
            .filter(|node| node.generation() == token.generation())
    }

    fn alloc(&mut self, slot: Slot) -> NodeKey {
        self.generation = self.generation.wrapping_add(1);
        NodeKey::from_raw(self.nodes.insert(Node::new(slot, self.generation)))
    }

    /// Link a new node after the current tail.
    pub(crate) fn push_back(&mut self, slot: Slot) -> NodeKey {
        let key = self.alloc(slot);
        match self.tail {
            Some(tail) => {
                self.node_mut(tail).set_next(Some(key));
                self.node_mut(key).set_prev(Some(tail));
            }
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.len += 1;
        key
    }

    /// Link a new node before the current head.
    pub(crate) fn push_front(&mut self, slot: Slot) -> NodeKey {
        let key = self.alloc(slot);
        match self.head {
            Some(head) => {
                self.node_mut(head).set_prev(Some(key));
                self.node_mut(key).set_next(Some(head));
            }
            None => self.tail = Some(key),
        }
        self.head = Some(key);
        self.len += 1;
        key
    }

    pub(crate) fn pop_front(&mut self) -> Option<Slot> {
        let head = self.head?;
        Some(self.unlink(head))
    }

    pub(crate) fn pop_back(&mut self) -> Option<Slot> {
        let tail = self.tail?;
        Some(self.unlink(tail))
    }

    pub(crate) fn front(&self) -> Option<&Slot> {
        self.head.map(|key| self.slot(key))
    }

    pub(crate) fn back(&self) -> Option<&Slot> {
        self.tail.map(|key| self.slot(key))
    }

    /// Splice a new node immediately before `at`.
    pub(crate) fn link_before(&mut self, at: NodeKey, slot: Slot) -> NodeKey {
        let key = self.alloc(slot);
        let prev = self.node(at).prev();

        let node = self.node_mut(key);
        node.set_prev(prev);
        node.set_next(Some(at));
        self.node_mut(at).set_prev(Some(key));

        match prev {
            Some(prev) => self.node_mut(prev).set_next(Some(key)),
            None => self.head = Some(key),
        }

        self.len += 1;
        key
    }

    /// Detach `key` from the chain, free the node and return its slot.
    pub(crate) fn unlink(&mut self, key: NodeKey) -> Slot {
        let node = self.nodes.remove(key.to_raw());
        let prev = node.prev();
        let next = node.next();

        // fix head and tail if node is either of that
        match prev {
            Some(prev) => self.node_mut(prev).set_next(next),
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).set_prev(prev),
            None => self.tail = prev,
        }

        self.len -= 1;
        node.into_slot()
    }

    pub(crate) fn insert(&mut self, index: usize, slot: Slot) -> Result<NodeKey> {
        let len = self.len;
        if index > len {
            return Err(ListError::IndexOutOfRange { index, len });
        }

        if index == 0 {
            return Ok(self.push_front(slot));
        }
        if index == len {
            return Ok(self.push_back(slot));
        }

        let at = self
            .locate(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        Ok(self.link_before(at, slot))
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<Slot> {
        let len = self.len;
        let slot = if index >= len {
            None
        } else if index == 0 {
            self.pop_front()
        } else if index == len - 1 {
            self.pop_back()
        } else {
            self.locate(index).map(|key| self.unlink(key))
        };
        slot.ok_or(ListError::IndexOutOfRange { index, len })
    }

    /// Index of the first element `cmp` reports equal to `data`.
    pub(crate) fn position<F>(&self, data: &Slot, cmp: &F) -> Option<usize>
    where
        F: Fn(&Slot, &Slot) -> Ordering + ?Sized,
    {
        self.iter().position(|slot| cmp(data, slot) == Ordering::Equal)
    }

    /// Walk the chain from the head, yielding at most `len` slots.
    pub(crate) fn iter(&self) -> Walk<'_> {
        Walk {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Free every node, returning their slots in list order.
    ///
    /// If the chain ends before `len` nodes were walked, the walk stops
    /// there: the slots freed so far are still returned, together with
    /// [`ListError::Corrupted`], and the list keeps the unwalked count.
    ///
    /// If the chain runs past `len`, or nodes remain in the arena that the
    /// chain never reached, those slots are returned as well and the drain
    /// also reports [`ListError::Corrupted`]. The list is left empty.
    pub(crate) fn drain(&mut self) -> (Vec<Slot>, Result<()>) {
        let recorded = self.len;
        let mut slots = Vec::with_capacity(recorded);
        let mut current = self.head;

        for walked in 0..recorded {
            let Some(node) = current.and_then(|key| self.nodes.try_remove(key.to_raw())) else {
                self.head = None;
                self.tail = None;
                self.len = recorded - walked;
                return (slots, Err(ListError::Corrupted { walked, recorded }));
            };
            current = node.next();
            slots.push(node.into_slot());
        }

        // a cycle ends here too, once it comes back to a freed key
        let mut walked = recorded;
        while let Some(node) = current.and_then(|key| self.nodes.try_remove(key.to_raw())) {
            current = node.next();
            slots.push(node.into_slot());
            walked += 1;
        }
        slots.extend(self.nodes.drain().map(Node::into_slot));

        self.head = None;
        self.tail = None;
        self.len = 0;

        let status = if slots.len() == recorded {
            Ok(())
        } else {
            Err(ListError::Corrupted { walked, recorded })
        };
        (slots, status)
    }

    /// Check every structural invariant by walking the chain.
    pub(crate) fn validate(&self) -> Result<()> {
        let recorded = self.len;
        let corrupted = |walked| ListError::Corrupted { walked, recorded };

        if self.head.is_none() != self.tail.is_none() || self.head.is_none() != (recorded == 0) {
            return Err(corrupted(0));
        }

        let mut walked = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(key) = current {
            // Either longer than recorded or cyclic.
            if walked == recorded {
                return Err(corrupted(walked + 1));
            }
            let node = self.nodes.get(key.to_raw()).ok_or(corrupted(walked))?;
            if node.prev() != prev {
                return Err(corrupted(walked));
            }
            walked += 1;
            prev = current;
            current = node.next();
        }

        if walked != recorded || prev != self.tail || self.nodes.len() != recorded {
            return Err(corrupted(walked));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn force_len(&mut self, len: usize) {
        self.len = len;
    }
}

/// Forward walk over the slots of a [`RawList`].
pub(crate) struct Walk<'a> {
    list: &'a RawList,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Slot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.next?);
        self.next = node.next();
        self.remaining -= 1;
        Some(node.slot())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
