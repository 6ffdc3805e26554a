//! A skiplist is a way of storing elements in such a way that elements can be
//! efficiently accessed, inserted and removed, all in `$O(\log n)$` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list,
//! allowing the algorithm to effectively skip ahead. How high each node
//! reaches is decided at random by a [`LevelGenerator`] when it is inserted,
//! so the list stays balanced without ever being rebalanced.
//!
//! This crate provides a single ordered map, [`SkipList`]. Its nodes live in
//! an arena owned by the list and link to each other through integer handles,
//! so no `unsafe` code or reference counting is involved.
//!
//! ```
//! use lanes::{Deletion, SkipList};
//!
//! let mut list = SkipList::new();
//! list.insert(5, "a")?;
//! list.insert(1, "b")?;
//! list.insert(9, "c")?;
//! assert_eq!(list.get(&1)?, Some(&"b"));
//! assert_eq!(list.delete(&5)?, Deletion::Found("a"));
//!
//! for level in list.levels() {
//!     println!("level {}: {:?}", level.index(), level.collect::<Vec<_>>());
//! }
//! # Ok::<(), lanes::Error>(())
//! ```
//!
//! Keys need only be [`PartialOrd`]. Every key handed to the list must
//! nevertheless be totally ordered against the keys already stored; a key
//! which is not (such as `f64::NAN`) is rejected with
//! [`Error::ComparisonMismatch`] and the list is left as it was.
//!
//! The list is a single-threaded structure. Callers sharing it between
//! threads should guard the whole list behind one lock.

pub mod config;
pub mod error;
pub mod level_generator;
pub mod levels;
mod skiplist;
mod skipnode;

pub use config::{Config, DEFAULT_MAX_LEVEL, DEFAULT_P, MAX_LEVEL_LIMIT};
pub use error::{ConfigError, Error};
pub use level_generator::{Geometric, LevelGenerator};
pub use levels::{Iter, Level, Levels, Structure};
pub use skiplist::{Deletion, SkipList};
