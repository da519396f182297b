use crate::slot::Slot;

use super::node::NodeKey;
use super::raw::RawList;
use super::traits::{Link, LinkWithPrev};

impl RawList {
    /// Find the node currently at `index`.
    ///
    /// Indices in the first half are reached by walking forward from the
    /// head, the rest by walking backward from the tail.
    pub(crate) fn locate(&self, index: usize) -> Option<NodeKey> {
        let len = self.len();
        if index >= len {
            return None;
        }

        if index <= len / 2 {
            let mut current = self.head();
            for _ in 0..index {
                current = self.node(current?).next();
            }
            current
        } else {
            let mut current = self.tail();
            for _ in index + 1..len {
                current = self.node(current?).prev();
            }
            current
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Slot> {
        self.locate(index).map(|key| self.slot(key))
    }
}
