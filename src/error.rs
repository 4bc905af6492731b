//! Errors surfaced by [`Cursor`][crate::Cursor] and [`CursorMut`][crate::CursorMut].

use thiserror::Error;

/// Errors that can occur while moving a cursor through a [`Tree`][crate::Tree].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cursor was already past-the-end, so there is nothing to advance to.
    /// This is a precondition violation by the caller, not a transient failure.
    #[error("cannot advance a cursor positioned past the end of the tree")]
    AdvancePastEnd,
}

/// A `Result` alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
