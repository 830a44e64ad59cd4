//! Filesystem adapters for board ports.

mod cache;

pub use cache::FileLocalCache;
