//! The owning container. See the [crate docs][crate] for an overview.

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::cursor::{Cursor, CursorMut, Iter};
use crate::node::{Link, Node};

/// An unbalanced Binary Search Tree of unique keys. `f64` keys are the common case, hence the
/// default type parameter, but any `PartialOrd` key works.
///
/// # Examples
///
/// ```
/// use cursor_bst::Tree;
///
/// let mut tree = Tree::new();
/// for key in [5.0, 3.0, 8.0, 1.0, 4.0, 7.0, 9.0] {
///     tree.insert(key);
/// }
///
/// // Duplicates are ignored.
/// assert!(!tree.insert(4.0));
/// assert_eq!(tree.len(), 7);
///
/// assert_eq!(tree.find(&4.0).key(), Some(&4.0));
/// assert_eq!(tree.find(&6.0), tree.end());
///
/// // Erasing a node with two children pulls its in-order successor up.
/// assert_eq!(tree.find_mut(&5.0).erase(), Some(5.0));
/// assert_eq!(
///     tree.iter().copied().collect::<Vec<_>>(),
///     [1.0, 3.0, 4.0, 7.0, 8.0, 9.0]
/// );
/// ```
pub struct Tree<K = f64> {
    // This is a `Link` instead of an `Option<Box<Node>>` so that cursors can point at the root the
    // same way they point at any other node. The root has no parent so moving the `Tree` itself
    // never invalidates a parent pointer.
    root: Link<K>,
    len: usize,
    _owns: PhantomData<Box<Node<K>>>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone + PartialOrd,
{
    /// Builds an independent tree by re-inserting every key in order. Because the keys arrive
    /// sorted, the copy is a chain of right children regardless of the original's shape.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Copies `source` into a temporary and swaps it in. The old contents are dropped with the
    /// temporary.
    fn clone_from(&mut self, source: &Self) {
        let mut replacement = source.clone();
        self.swap(&mut replacement);
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug + PartialOrd,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: PartialOrd,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K>
where
    K: PartialOrd,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link::NONE,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `key` unless an equal key is already present. Returns whether the tree changed.
    ///
    /// Keys that aren't comparable with themselves (`NaN`) are never inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1.5));
    /// assert!(!tree.insert(1.5));
    /// assert!(!tree.insert(f64::NAN));
    ///
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: PartialOrd,
    {
        let inserted = if let Some(root) = self.root.get_mut() {
            root.insert_node(key)
        } else if key.partial_cmp(&key).is_none() {
            false
        } else {
            self.root = Link::new_leaf(key);
            trace!("attached new root");
            true
        };

        if inserted {
            self.len += 1;
        } else {
            debug!("rejected a key that is already present or not comparable");
        }
        inserted
    }

    /// A cursor at the smallest key, or past-the-end if the tree is empty.
    pub fn begin(&self) -> Cursor<'_, K> {
        Cursor::new(self, self.root.leftmost())
    }

    /// The past-the-end cursor of this tree.
    pub fn end(&self) -> Cursor<'_, K> {
        Cursor::new(self, Link::NONE)
    }

    /// A mutable cursor at the smallest key, or past-the-end if the tree is empty.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K> {
        let node = self.root.leftmost();
        CursorMut::new(self, node)
    }

    /// Finds the node holding `key`, or returns [`Tree::end`].
    ///
    /// This steps through the keys in order rather than descending by comparison. If
    /// [`CursorMut::key_mut`] left the tree out of order, stepping may skip nodes or cycle
    /// forever, so the scan can miss keys or never return.
    pub fn find(&self, key: &K) -> Cursor<'_, K>
    where
        K: PartialOrd,
    {
        let mut cursor = self.begin();
        while let Some(current) = cursor.key() {
            if current == key {
                return cursor;
            }
            cursor
                .move_next()
                .expect("a cursor with a key is never past-the-end");
        }
        cursor
    }

    /// Like [`Tree::find`] but the cursor can edit or erase what it finds.
    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K>
    where
        K: PartialOrd,
    {
        let node = self.find(key).link();
        CursorMut::new(self, node)
    }

    /// Whether the tree holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: PartialOrd,
    {
        !self.find(key).is_end()
    }

    /// Erases the node holding `key` and returns the key, if there was one. Shorthand for
    /// `tree.find_mut(key).erase()`.
    pub fn erase(&mut self, key: &K) -> Option<K>
    where
        K: PartialOrd,
    {
        self.find_mut(key).erase()
    }

    /// An iterator over the keys in increasing order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.begin())
    }

    /// Exchanges the contents of two trees.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.root, &mut other.root);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Releases every node.
    pub fn clear(&mut self) {
        let mut pending: Vec<NonNull<Node<K>>> = self.root.take().0.into_iter().collect();
        let mut released = 0usize;
        while let Some(ptr) = pending.pop() {
            // SAFETY: Every pointer pushed here was the only owning link to its node, and that
            // link has been dropped (the root via `take`, children via the freed parent). The
            // nodes were allocated with `Box::new` in `Node::new_boxed`.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            pending.extend(node.left.0);
            pending.extend(node.right.0);
            released += 1;
        }
        if released > 0 {
            trace!("released {} nodes", released);
        }
        self.len = 0;
    }

    /// Removes `target` from the tree and returns its key.
    ///
    /// A node with two children takes its in-order successor's key (the leftmost node of its
    /// right subtree) and the successor's node is removed instead. The successor has no left
    /// child, so every removal ends up splicing out a node with at most one child.
    pub(crate) fn erase_node(&mut self, target: NonNull<Node<K>>) -> K {
        // SAFETY: `target` came from a `CursorMut` holding this tree's unique borrow, so it is a
        // live node of this tree and nothing else references it.
        let node = unsafe { &mut *target.as_ptr() };
        let doomed = match (node.left.0, node.right.0) {
            (Some(_), Some(_)) => {
                let successor = node
                    .right
                    .leftmost()
                    .0
                    .expect("Two children => right subtree");
                // SAFETY: The successor lives in `target`'s right subtree so it is a different
                // live node and the two references don't alias.
                unsafe { mem::swap(&mut node.key, &mut (*successor.as_ptr()).key) };
                trace!("moved in-order successor's key up");
                successor
            }
            _ => target,
        };
        self.splice_out(doomed)
    }

    /// Unlinks a node with at most one child, promoting that child into its place.
    fn splice_out(&mut self, doomed: NonNull<Node<K>>) -> K {
        // SAFETY: `doomed` is a live node of this tree. Once its links are copied out below, the
        // parent's (or root's) link to it is overwritten and its child's back-pointer moves on, so
        // nothing references it after this.
        let node = *unsafe { Box::from_raw(doomed.as_ptr()) };

        let mut child = match (node.left.0, node.right.0) {
            (Some(_), Some(_)) => panic!("Splicing out a node with two children"),
            (left, None) => Link(left),
            (None, right) => Link(right),
        };
        if let Some(child) = child.get_mut() {
            child.parent = node.parent;
        }

        let mut parent_link = node.parent;
        match parent_link.get_mut() {
            None => self.root = child,
            Some(parent) if parent.left.0 == Some(doomed) => parent.left = child,
            Some(parent) => parent.right = child,
        }
        self.len -= 1;
        trace!("spliced out node, len is now {}", self.len);

        if cfg!(debug_assertions) {
            if let Some(promoted) = child.get() {
                assert!(promoted.parent == node.parent);
            }
        }
        node.key
    }
}

#[cfg(test)]
impl<K> Tree<K>
where
    K: PartialOrd + fmt::Debug,
{
    /// Walks every node checking that child and parent links agree, that `len` matches the
    /// number of nodes, and that an in-order walk is strictly increasing.
    pub(crate) fn assert_invariants(&self) {
        if let Some(root) = self.root.get() {
            assert_eq!(root.parent, Link::NONE);
        }

        let mut count = 0;
        let mut pending: Vec<&Node<K>> = self.root.get().into_iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert_eq!(child.parent.0, Some(NonNull::from(node)));
                pending.push(child);
            }
        }
        assert_eq!(count, self.len);

        let keys: Vec<&K> = self.iter().collect();
        assert_eq!(keys.len(), self.len);
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "{:?}", keys);
    }

    pub(crate) fn root_key(&self) -> Option<&K> {
        self.root.get().map(|root| &root.key)
    }
}
