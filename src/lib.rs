//! This crate exposes an unbalanced Binary Search Tree (BST) of unique keys with
//! cursors: positions you can step through in order, dereference, compare, and erase at.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored keys. It is built out of `Node`s, each storing a key and links to up to two child
//! `Node`s (and, here, a link back to its parent). The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than its own
//!    key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than its
//!    own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! These invariants give sorted iteration for free: visit the left subtree, then the node, then
//! the right subtree. This tree does no rebalancing, so inserting keys in sorted order builds a
//! chain as tall as the tree is large.
//!
//! ## Cursors
//!
//! [`Tree::begin`] and [`Tree::find`] hand out a [`Cursor`]. A cursor that has walked off the
//! largest key is "past-the-end" and equals [`Tree::end`]. Trying to advance it further is an
//! [`Error`]. [`Tree::begin_mut`] and [`Tree::find_mut`] hand out a [`CursorMut`], which can also
//! overwrite the key under it or erase the node.
//!
//! # Examples
//!
//! ```
//! use cursor_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5.0, 3.0, 8.0] {
//!     tree.insert(key);
//! }
//!
//! let mut cursor = tree.begin();
//! let mut seen = Vec::new();
//! while cursor != tree.end() {
//!     seen.push(*cursor.key().unwrap());
//!     cursor.move_next().unwrap();
//! }
//! assert_eq!(seen, [3.0, 5.0, 8.0]);
//!
//! tree.find_mut(&3.0).erase();
//! assert_eq!(tree.len(), 2);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod cursor;
mod error;
mod node;
mod tree;

pub use cursor::{Cursor, CursorMut, Iter};
pub use error::{Error, Result};
pub use tree::Tree;
