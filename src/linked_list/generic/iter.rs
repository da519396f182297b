use spin::Mutex;
use tracing::debug;

use crate::error::{ListError, Result};
use crate::slot::Slot;

use super::list::GenericList;
use super::node::{Node, NodeToken};
use super::raw::RawList;
use super::traits::{Link, LinkWithPrev};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Before the head and after the tail at the same time.
    Unset,
    At(NodeToken),
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// A bidirectional cursor over a [`GenericList`].
///
/// The cursor starts *unset*: moving forward lands on the head, moving
/// backward lands on the tail. Running off either end reports `Ok(None)` and
/// leaves the cursor where it was.
///
/// A cursor can be shared between threads. It has its own lock, always taken
/// before the list lock. If another caller removes the element the cursor is
/// on, the next cursor call fails with [`ListError::StaleCursor`]; call
/// [`Cursor::reset`] to recover.
///
/// # Examples
///
/// ```
/// use gll_collections::{GenericList, Slot};
///
/// let list: GenericList = [1u16, 2, 3].into_iter().collect();
/// let cursor = list.cursor();
///
/// assert_eq!(cursor.forward().unwrap(), Some(Slot::from(1u16)));
/// assert_eq!(cursor.forward().unwrap(), Some(Slot::from(2u16)));
/// cursor.reset();
/// assert_eq!(cursor.backward().unwrap(), Some(Slot::from(3u16)));
/// ```
pub struct Cursor<'a> {
    list: &'a GenericList,
    position: Mutex<Position>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(list: &'a GenericList) -> Self {
        Self {
            list,
            position: Mutex::new(Position::Unset),
        }
    }

    /// The list this cursor walks.
    pub fn list(&self) -> &'a GenericList {
        self.list
    }

    /// Move to the next element and return it.
    pub fn forward(&self) -> Result<Option<Slot>> {
        self.step(Direction::Forward)
    }

    /// Move to the previous element and return it.
    pub fn backward(&self) -> Result<Option<Slot>> {
        self.step(Direction::Backward)
    }

    /// Read the element under the cursor without moving.
    pub fn current(&self) -> Result<Option<Slot>> {
        let position = self.position.lock();
        self.list.read(|raw| -> Result<Option<Slot>> {
            match *position {
                Position::Unset => Ok(None),
                Position::At(token) => Ok(Some(resolve(raw, token)?.slot().clone())),
            }
        })
    }

    /// Return to the unset position.
    pub fn reset(&self) {
        *self.position.lock() = Position::Unset;
    }

    pub fn is_unset(&self) -> bool {
        *self.position.lock() == Position::Unset
    }

    fn step(&self, direction: Direction) -> Result<Option<Slot>> {
        let mut position = self.position.lock();
        self.list.read(|raw| -> Result<Option<Slot>> {
            let target = match (*position, direction) {
                (Position::Unset, Direction::Forward) => raw.head(),
                (Position::Unset, Direction::Backward) => raw.tail(),
                (Position::At(token), Direction::Forward) => resolve(raw, token)?.next(),
                (Position::At(token), Direction::Backward) => resolve(raw, token)?.prev(),
            };

            let Some(key) = target else {
                return Ok(None);
            };
            *position = Position::At(raw.token(key));
            Ok(Some(raw.slot(key).clone()))
        })
    }
}

fn resolve(raw: &RawList, token: NodeToken) -> Result<&Node> {
    raw.resolve(token).ok_or_else(|| {
        debug!(?token, "cursor position was removed from its list");
        ListError::StaleCursor
    })
}

impl core::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &*self.position.lock())
            .finish_non_exhaustive()
    }
}
