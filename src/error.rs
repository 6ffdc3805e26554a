//! Errors raised by the skiplist and its configuration.
//!
//! A lookup or deletion of an absent key is _not_ an error; those report
//! through [`Option`] and [`Deletion`][crate::Deletion] respectively.

use thiserror::Error;

/// Reasons a set of construction parameters is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "`Error` is the operational error; this one only covers construction."
)]
#[non_exhaustive]
pub enum ConfigError {
    /// The maximum level must be at least 1.
    #[error("max level must be non-zero.")]
    ZeroMaxLevel,
    /// The maximum level must not exceed [`MAX_LEVEL_LIMIT`][crate::MAX_LEVEL_LIMIT].
    #[error("max level must be at most {}.", crate::MAX_LEVEL_LIMIT)]
    MaxLevelTooLarge,
    /// The promotion probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// Errors that can occur when constructing or operating on a
/// [`SkipList`][crate::SkipList].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The construction parameters were out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// A key could not be ordered against itself or a stored key.
    ///
    /// The operation that raised this left the list untouched.
    #[error("key is not comparable with the keys in the list.")]
    ComparisonMismatch,
}
