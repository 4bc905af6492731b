//! Positions inside a [`Tree`].
//!
//! A [`Cursor`] points either at a node or past-the-end, and remembers which tree produced it. It
//! borrows that tree, so the tree can't be changed (or dropped) while the cursor is around. To
//! change a key or erase a node, get a [`CursorMut`] from [`Tree::find_mut`] or
//! [`Tree::begin_mut`] instead.
//!
//! # Examples
//!
//! ```
//! use cursor_bst::Tree;
//!
//! let tree: Tree = [5.0, 3.0, 8.0].into_iter().collect();
//!
//! let mut cursor = tree.begin();
//! assert_eq!(cursor.key(), Some(&3.0));
//!
//! cursor.move_next().unwrap();
//! assert_eq!(cursor.key(), Some(&5.0));
//!
//! // Post-increment hands back where we were.
//! let previous = cursor.post_increment().unwrap();
//! assert_eq!(previous.key(), Some(&5.0));
//! assert_eq!(cursor.key(), Some(&8.0));
//!
//! cursor.move_next().unwrap();
//! assert_eq!(cursor, tree.end());
//! assert!(cursor.move_next().is_err());
//! ```

use std::fmt;
use std::ptr;

use crate::error::Result;
use crate::node::Link;
use crate::Tree;

/// A read-only position in a [`Tree`].
///
/// Two cursors are equal when they point at the same node of the same tree. Past-the-end cursors
/// of one tree are all equal to each other, and never equal to any cursor of another tree.
pub struct Cursor<'a, K> {
    tree: &'a Tree<K>,
    node: Link<K>,
}

impl<'a, K> Clone for Cursor<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, K> Copy for Cursor<'a, K> {}

impl<'a, K> PartialEq for Cursor<'a, K> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}
impl<'a, K> Eq for Cursor<'a, K> {}

impl<'a, K> fmt::Debug for Cursor<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("key", &self.key()).finish()
    }
}

impl<'a, K> Cursor<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>, node: Link<K>) -> Self {
        Self { tree, node }
    }

    pub(crate) fn link(&self) -> Link<K> {
        self.node
    }

    /// The key under the cursor, or `None` past-the-end.
    pub fn key(&self) -> Option<&'a K> {
        // SAFETY: The node belongs to `self.tree`, which is borrowed for `'a` and so can't release
        // it (or hand out a mutable reference to it) for that long.
        self.node.0.map(|ptr| unsafe { &(*ptr.as_ptr()).key })
    }

    /// Whether the cursor is past-the-end.
    pub fn is_end(&self) -> bool {
        self.node.0.is_none()
    }

    /// Moves to the next key in order, becoming past-the-end after the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdvancePastEnd`] if the cursor is already past-the-end. The cursor is left
    /// where it was.
    pub fn move_next(&mut self) -> Result<()>
    where
        K: PartialOrd,
    {
        self.node.advance()
    }

    /// Moves to the next key in order but returns a copy of the cursor from before the move.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::move_next`].
    pub fn post_increment(&mut self) -> Result<Self>
    where
        K: PartialOrd,
    {
        let previous = *self;
        self.move_next()?;
        Ok(previous)
    }
}

/// A position in a [`Tree`] that can change the key under it or erase its node.
///
/// It holds the tree's unique borrow, so no other cursor can exist alongside it.
pub struct CursorMut<'a, K> {
    tree: &'a mut Tree<K>,
    node: Link<K>,
}

impl<'a, K> fmt::Debug for CursorMut<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("key", &self.key()).finish()
    }
}

impl<'a, K> CursorMut<'a, K> {
    pub(crate) fn new(tree: &'a mut Tree<K>, node: Link<K>) -> Self {
        Self { tree, node }
    }

    /// The key under the cursor, or `None` past-the-end.
    pub fn key(&self) -> Option<&K> {
        self.node.get().map(|node| &node.key)
    }

    /// Mutable access to the key under the cursor.
    ///
    /// Nothing re-checks the tree's ordering afterwards. Writing a key that no longer sits between
    /// its neighbours leaves the tree out of order. Stepping forward decides when to climb by
    /// comparing keys, so on such a tree it may skip nodes, or cycle back to nodes it already
    /// visited and never reach the end. Anything that steps (`find`, `iter`, `Clone`, `Debug`) can
    /// then fail to terminate.
    pub fn key_mut(&mut self) -> Option<&mut K> {
        self.node.get_mut().map(|node| &mut node.key)
    }

    /// Whether the cursor is past-the-end.
    pub fn is_end(&self) -> bool {
        self.node.0.is_none()
    }

    /// See [`Cursor::move_next`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdvancePastEnd`] if the cursor is already past-the-end.
    pub fn move_next(&mut self) -> Result<()>
    where
        K: PartialOrd,
    {
        self.node.advance()
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K> {
        Cursor::new(self.tree, self.node)
    }

    /// Removes the node under the cursor from the tree and returns its key. Past-the-end (which
    /// includes every cursor into an empty tree) nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Tree;
    ///
    /// let mut tree: Tree = [5.0, 3.0, 8.0].into_iter().collect();
    ///
    /// assert_eq!(tree.find_mut(&3.0).erase(), Some(3.0));
    /// assert_eq!(tree.find_mut(&3.0).erase(), None);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5.0, 8.0]);
    /// ```
    pub fn erase(self) -> Option<K> {
        let target = self.node.0?;
        Some(self.tree.erase_node(target))
    }
}

/// An iterator over the keys of a [`Tree`] in increasing order.
///
/// Created by [`Tree::iter`].
pub struct Iter<'a, K> {
    cursor: Cursor<'a, K>,
}

impl<'a, K> Clone for Iter<'a, K> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
        }
    }
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(cursor: Cursor<'a, K>) -> Self {
        Self { cursor }
    }
}

impl<'a, K> Iterator for Iter<'a, K>
where
    K: PartialOrd,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor.key()?;
        self.cursor
            .move_next()
            .expect("a cursor with a key is never past-the-end");
        Some(key)
    }
}

impl<'a, K> std::iter::FusedIterator for Iter<'a, K> where K: PartialOrd {}
