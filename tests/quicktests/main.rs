//! Property tests run against the public API.

mod tree;
