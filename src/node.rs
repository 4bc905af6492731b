//! Nodes and the raw links between them.
//!
//! Every [`Node`] is allocated with `Box::new` and leaked into a [`Link`]. The [`Tree`] that owns
//! the root owns every node reachable from it through `left` and `right`. The `parent` link is a
//! plain back-pointer and never owns anything.
//!
//! [`Tree`]: crate::Tree

use std::cmp::Ordering;
use std::fmt;
use std::ptr::NonNull;

use log::trace;

use crate::error::{Error, Result};

/// A possibly-empty pointer to a [`Node`].
pub(crate) struct Link<K>(pub(crate) Option<NonNull<Node<K>>>);

impl<K> Clone for Link<K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for Link<K> {}

// Compares pointer identity, so no bound on `K` is needed.
impl<K> PartialEq for Link<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<K> Eq for Link<K> {}

impl<K> fmt::Debug for Link<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Link").field(&self.0).finish()
    }
}

impl<K> Link<K> {
    pub(crate) const NONE: Self = Link(None);

    /// Leaks a freshly allocated node with no parent or children.
    pub(crate) fn new_leaf(key: K) -> Self {
        Link(Some(NonNull::from(Box::leak(Node::new_boxed(key)))))
    }

    pub(crate) fn get(&self) -> Option<&Node<K>> {
        // SAFETY: If the link is not `None` then it points at a live `Node` owned by the tree the
        // link was read from. Taking `&self` ties the returned reference to a borrow of that
        // tree, so the node can't be released while the reference exists.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut Node<K>> {
        // SAFETY: As in `get`. Links are only reachable through a `&mut Tree` here, so there is no
        // other live reference to the node.
        unsafe { self.0.as_mut().map(|ptr| ptr.as_mut()) }
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    /// Follows `left` links as far as they go. An empty link stays empty.
    pub(crate) fn leftmost(self) -> Self {
        let Some(mut current) = self.0 else {
            return self;
        };
        // SAFETY: Every `left` link of a live node is either empty or points at another live node
        // of the same tree.
        while let Some(left) = unsafe { current.as_ref() }.left.0 {
            current = left;
        }
        Link(Some(current))
    }

    /// Moves the link to the in-order successor of the node it points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdvancePastEnd`] on an empty link, which is left unchanged.
    pub(crate) fn advance(&mut self) -> Result<()>
    where
        K: PartialOrd,
    {
        let current = self.get().ok_or(Error::AdvancePastEnd)?;
        *self = current.successor();
        Ok(())
    }
}

/// A single key in the tree along with its structural links.
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Link<K>,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            parent: Link::NONE,
            left: Link::NONE,
            right: Link::NONE,
        })
    }

    #[cfg(test)]
    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.get()
    }

    #[cfg(test)]
    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.get()
    }

    /// Places `key` into the subtree rooted at `self`. Walks left while `key` is smaller and right
    /// while it is larger, then attaches a new leaf at the first empty slot.
    ///
    /// Returns `false` without allocating if an equal key is already present. Keys that don't
    /// compare with a node's key at all (e.g. `NaN`) are treated the same way.
    pub(crate) fn insert_node(&mut self, key: K) -> bool
    where
        K: PartialOrd,
    {
        let mut current = NonNull::from(&mut *self);
        let leaf = loop {
            // SAFETY: `current` starts at `self` and only ever moves to a child link of a live
            // node, so it always points at a live node of this subtree. We hold `&mut self` so
            // nothing else is reading the subtree.
            let node = unsafe { &mut *current.as_ptr() };
            let slot = match key.partial_cmp(&node.key) {
                Some(Ordering::Less) => &mut node.left,
                Some(Ordering::Greater) => &mut node.right,
                Some(Ordering::Equal) | None => return false,
            };
            match slot.0 {
                Some(child) => current = child,
                None => {
                    let mut leaf = Self::new_boxed(key);
                    leaf.parent = Link(Some(current));
                    let leaf = NonNull::from(Box::leak(leaf));
                    *slot = Link(Some(leaf));
                    trace!("attached new leaf");
                    break leaf;
                }
            }
        };

        if cfg!(debug_assertions) {
            // SAFETY: Both pointers were just linked together and point at live nodes.
            let (parent, leaf) = unsafe { (current.as_ref(), leaf.as_ref()) };
            assert!(leaf.parent == Link(Some(current)));
            if leaf.key < parent.key {
                assert!(parent.left.0 == Some(NonNull::from(leaf)));
            } else {
                assert!(parent.right.0 == Some(NonNull::from(leaf)));
            }
        }
        true
    }

    /// The node that follows `self` in an in-order walk.
    ///
    /// With a right subtree that is its leftmost node. Otherwise we climb until we reach an
    /// ancestor whose key is strictly greater than ours, or run out of ancestors.
    pub(crate) fn successor(&self) -> Link<K>
    where
        K: PartialOrd,
    {
        if self.right.0.is_some() {
            return self.right.leftmost();
        }

        let mut ancestor = self.parent;
        while let Some(ptr) = ancestor.0 {
            // SAFETY: Parent links of a live node point at live nodes of the same tree.
            let node = unsafe { ptr.as_ref() };
            if node.key > self.key {
                break;
            }
            ancestor = node.parent;
        }
        ancestor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Releases a detached subtree built directly out of nodes.
    fn release(link: Link<i32>) {
        let mut pending: Vec<_> = link.0.into_iter().collect();
        while let Some(ptr) = pending.pop() {
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            pending.extend(node.left.0);
            pending.extend(node.right.0);
        }
    }

    #[test]
    fn insert_node_links_both_directions() {
        let mut root = Link::new_leaf(5);
        let root_link = root;
        let node = root.get_mut().unwrap();

        assert!(node.insert_node(3));
        assert!(node.insert_node(8));
        assert!(node.insert_node(4));

        let three = node.left().unwrap();
        assert_eq!(three.key, 3);
        assert_eq!(three.parent, root_link);

        let four = three.right().unwrap();
        assert_eq!(four.key, 4);
        assert_eq!(four.parent, node.left);

        assert_eq!(node.right().unwrap().key, 8);
        release(root);
    }

    #[test]
    fn insert_node_rejects_duplicates() {
        let mut root = Link::new_leaf(5);
        let node = root.get_mut().unwrap();

        assert!(node.insert_node(3));
        assert!(!node.insert_node(3));
        assert!(!node.insert_node(5));

        assert!(node.left().unwrap().left().is_none());
        assert!(node.left().unwrap().right().is_none());
        assert!(node.right().is_none());
        release(root);
    }

    #[test]
    fn successor_climbs_to_greater_ancestor() {
        let mut root = Link::new_leaf(5);
        let root_link = root;
        let node = root.get_mut().unwrap();
        for key in [3, 8, 1, 4] {
            node.insert_node(key);
        }

        let four = node.left().unwrap().right().unwrap();
        assert_eq!(four.successor(), root_link);

        let one = node.left().unwrap().left().unwrap();
        assert_eq!(one.successor(), node.left);

        let eight = node.right().unwrap();
        assert_eq!(eight.successor(), Link::NONE);
        release(root);
    }

    #[test]
    fn advance_walks_in_order_then_fails() {
        let mut root = Link::new_leaf(5);
        let node = root.get_mut().unwrap();
        for key in [3, 8] {
            node.insert_node(key);
        }

        let mut link = root.leftmost();
        let mut seen = Vec::new();
        while let Some(node) = link.get() {
            seen.push(node.key);
            link.advance().unwrap();
        }

        assert_eq!(seen, [3, 5, 8]);
        assert_eq!(link.advance(), Err(Error::AdvancePastEnd));
        assert_eq!(link, Link::NONE);
        release(root);
    }

    #[test]
    fn leftmost_of_empty_is_empty() {
        assert_eq!(Link::<i32>::NONE.leftmost(), Link::NONE);
    }
}
