use core::cmp::Ordering;

use tracing::error;

use crate::slot::Slot;

use super::node::NodeKey;
use super::raw::RawList;
use super::traits::{Link, LinkWithPrev};

impl RawList {
    /// Stable merge sort over the node chain.
    ///
    /// Nodes are relinked in place and keep their arena keys, so tokens taken
    /// before the sort still resolve to the same elements afterwards.
    ///
    /// If `cmp` panics, every node is relinked in arena order before the
    /// panic leaves this call. The element order is lost but the list stays
    /// structurally valid.
    pub(crate) fn sort_by<F>(&mut self, cmp: &F)
    where
        F: Fn(&Slot, &Slot) -> Ordering + ?Sized,
    {
        if self.len < 2 {
            return;
        }

        let mut guard = RelinkOnUnwind { list: self };
        let list = &mut *guard.list;

        let head = list.merge_sort(list.head, cmp);
        if let Some(head) = head {
            list.node_mut(head).set_prev(None);
        }
        list.head = head;

        // merge does not track the tail
        let mut tail = head;
        while let Some(next) = tail.and_then(|key| list.node(key).next()) {
            tail = Some(next);
        }
        list.tail = tail;
    }

    /// Rebuild one valid chain out of every node in the arena, in arena
    /// order, and reset `head`, `tail` and `len` to match.
    pub(crate) fn relink_all(&mut self) {
        let keys: Vec<NodeKey> = self
            .nodes
            .iter()
            .map(|(raw, _)| NodeKey::from_raw(raw))
            .collect();

        let mut prev = None;
        for &key in &keys {
            let node = self.node_mut(key);
            node.set_prev(prev);
            node.set_next(None);
            if let Some(prev) = prev {
                self.node_mut(prev).set_next(Some(key));
            }
            prev = Some(key);
        }

        self.head = keys.first().copied();
        self.tail = keys.last().copied();
        self.len = keys.len();
    }

    fn merge_sort<F>(&mut self, head: Option<NodeKey>, cmp: &F) -> Option<NodeKey>
    where
        F: Fn(&Slot, &Slot) -> Ordering + ?Sized,
    {
        let first = head?;
        let Some(second) = self.split(first) else {
            return head;
        };

        let left = self.merge_sort(Some(first), cmp);
        let right = self.merge_sort(Some(second), cmp);
        self.merge(left, right, cmp)
    }

    /// Cut the chain starting at `head` in two and return the head of the
    /// second half, or `None` for a single node.
    ///
    /// `fast` starts one link ahead of `slow` and moves two links per step,
    /// so the first half keeps the middle node of an odd-length chain.
    fn split(&mut self, head: NodeKey) -> Option<NodeKey> {
        let mut slow = head;
        let mut fast = self.node(head).next();

        while let Some(ahead) = fast {
            let Some(after) = self.node(ahead).next() else {
                break;
            };
            let Some(next) = self.node(slow).next() else {
                break;
            };
            slow = next;
            fast = self.node(after).next();
        }

        let second = self.node(slow).next()?;
        self.node_mut(slow).set_next(None);
        self.node_mut(second).set_prev(None);
        Some(second)
    }

    /// Merge two sorted chains. Ties take the left node first.
    fn merge<F>(
        &mut self,
        mut left: Option<NodeKey>,
        mut right: Option<NodeKey>,
        cmp: &F,
    ) -> Option<NodeKey>
    where
        F: Fn(&Slot, &Slot) -> Ordering + ?Sized,
    {
        let mut head = None;
        let mut last: Option<NodeKey> = None;

        loop {
            let take = match (left, right) {
                (Some(l), Some(r)) => {
                    if cmp(self.slot(l), self.slot(r)) != Ordering::Greater {
                        left = self.node(l).next();
                        l
                    } else {
                        right = self.node(r).next();
                        r
                    }
                }
                // the remainder is already linked
                (Some(rest), None) | (None, Some(rest)) => {
                    self.attach(last, rest);
                    return head.or(Some(rest));
                }
                (None, None) => return head,
            };

            self.attach(last, take);
            head = head.or(Some(take));
            last = Some(take);
        }
    }

    fn attach(&mut self, last: Option<NodeKey>, key: NodeKey) {
        if let Some(last) = last {
            self.node_mut(last).set_next(Some(key));
        }
        self.node_mut(key).set_prev(last);
    }
}

/// Restores the list invariants when a comparator unwinds out of a sort.
struct RelinkOnUnwind<'a> {
    list: &'a mut RawList,
}

impl Drop for RelinkOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            error!(
                len = self.list.nodes.len(),
                "comparator panicked during sort, relinking nodes in arena order"
            );
            self.list.relink_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;

    fn keys_in_order(list: &RawList) -> Vec<NodeKey> {
        let mut keys = Vec::new();
        let mut current = list.head();
        while let Some(key) = current {
            keys.push(key);
            current = list.node(key).next();
        }
        keys
    }

    #[test]
    fn test_split_keeps_middle_on_the_left() {
        for (n, left) in [(2usize, 1usize), (3, 2), (4, 2), (5, 3), (8, 4)] {
            let mut list = RawList::with_capacity(n);
            for i in 0..n {
                list.push_back(Slot::from(i));
            }
            let head = list.head().unwrap();
            let second = list.split(head).unwrap();
            assert_eq!(list.slot(second), &Slot::from(left), "n = {}", n);
            assert!(list.node(second).prev().is_none());
        }
    }

    #[test]
    fn test_sort_relinks_prev() {
        let mut list = RawList::with_capacity(6);
        for v in [4i32, -1, 7, 0, 7, 3] {
            list.push_back(Slot::from(v));
        }
        list.sort_by(&compare::int32);

        list.validate().unwrap();
        let values: Vec<_> = list.iter().map(|s| s.decode::<i32>().unwrap()).collect();
        assert_eq!(values, vec![-1, 0, 3, 4, 7, 7]);

        let keys = keys_in_order(&list);
        assert_eq!(list.head(), keys.first().copied());
        assert_eq!(list.tail(), keys.last().copied());
    }

    #[test]
    fn test_sort_keeps_node_keys() {
        let mut list = RawList::with_capacity(3);
        let three = list.push_back(Slot::from(3u32));
        let one = list.push_back(Slot::from(1u32));
        let two = list.push_back(Slot::from(2u32));

        list.sort_by(&compare::uint32);
        assert_eq!(keys_in_order(&list), vec![one, two, three]);
    }

    #[test]
    fn test_relink_all_repairs_a_cut_chain() {
        let mut list = RawList::with_capacity(4);
        let keys: Vec<_> = (0..4u32).map(|i| list.push_back(Slot::from(i))).collect();

        // cut the chain the way a half-finished split does
        let second = list.split(keys[0]).unwrap();
        list.head = Some(second);
        assert!(list.validate().is_err());

        list.relink_all();
        list.validate().unwrap();
        assert_eq!(keys_in_order(&list), keys);
    }
}
