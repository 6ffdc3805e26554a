//! Construction parameters for a [`SkipList`][crate::SkipList].

use crate::error::ConfigError;

/// Default upper bound on a node's level.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Default probability that a node is promoted to the next level.
pub const DEFAULT_P: f64 = 0.5;

/// Largest accepted maximum level.
///
/// At `$p = 0.5$` a node reaches level 64 with probability `$2^{-64}$`, so
/// higher bounds would only inflate the header.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Parameters used to build a skiplist.
///
/// ```
/// use lanes::{Config, SkipList};
///
/// let config = Config::new().with_max_level(4).with_probability(0.25).with_seed(7);
/// let list: SkipList<u32, &str> = SkipList::with_config(config)?;
/// assert_eq!(list.max_level(), 4);
/// # Ok::<(), lanes::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_level: usize,
    p: f64,
    seed: Option<u64>,
}

impl Config {
    /// A configuration with the default 16 levels, `$p = 0.5$` and an
    /// unseeded random source.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            p: DEFAULT_P,
            seed: None,
        }
    }

    /// Set the highest level index a node may reach.
    #[must_use]
    #[inline]
    pub const fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the probability that a node is promoted one more level.
    #[must_use]
    #[inline]
    pub const fn with_probability(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    /// Seed the level generator so that the shape of the list is reproducible.
    #[must_use]
    #[inline]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured maximum level.
    #[must_use]
    #[inline]
    pub const fn max_level(&self) -> usize {
        self.max_level
    }

    /// The configured promotion probability.
    #[must_use]
    #[inline]
    pub const fn probability(&self) -> f64 {
        self.p
    }

    /// The configured seed, if any.
    #[must_use]
    #[inline]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter as a [`ConfigError`].
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_max_level(self.max_level)?;
        // Written this way round so that NaN is rejected too.
        if !(0.0 < self.p && self.p < 1.0) {
            return Err(ConfigError::InvalidProbability);
        }
        Ok(())
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Check a maximum level on its own, for generators built outside of a
/// [`Config`].
pub(crate) const fn validate_max_level(max_level: usize) -> Result<(), ConfigError> {
    if max_level == 0 {
        return Err(ConfigError::ZeroMaxLevel);
    }
    if max_level > MAX_LEVEL_LIMIT {
        return Err(ConfigError::MaxLevelTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Config, DEFAULT_MAX_LEVEL, DEFAULT_P, MAX_LEVEL_LIMIT};
    use crate::error::ConfigError;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.max_level(), DEFAULT_MAX_LEVEL);
        assert_eq!(config.probability(), DEFAULT_P);
        assert_eq!(config.seed(), None);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builder() {
        let config = Config::new().with_max_level(4).with_probability(0.25).with_seed(42);
        assert_eq!(config.max_level(), 4);
        assert_eq!(config.probability(), 0.25);
        assert_eq!(config.seed(), Some(42));
    }

    #[rstest]
    #[case(0, 0.5, ConfigError::ZeroMaxLevel)]
    #[case(MAX_LEVEL_LIMIT + 1, 0.5, ConfigError::MaxLevelTooLarge)]
    #[case(16, 0.0, ConfigError::InvalidProbability)]
    #[case(16, 1.0, ConfigError::InvalidProbability)]
    #[case(16, -0.5, ConfigError::InvalidProbability)]
    #[case(16, f64::NAN, ConfigError::InvalidProbability)]
    fn invalid(#[case] max_level: usize, #[case] p: f64, #[case] expected: ConfigError) {
        let config = Config::new().with_max_level(max_level).with_probability(p);
        assert_eq!(config.validate(), Err(expected));
    }

    #[rstest]
    fn valid(
        #[values(1, 4, 16, MAX_LEVEL_LIMIT)] max_level: usize,
        #[values(0.01, 0.5, 0.99)] p: f64,
    ) {
        let config = Config::new().with_max_level(max_level).with_probability(p);
        assert_eq!(config.validate(), Ok(()));
    }
}
