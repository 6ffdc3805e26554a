//! Geometric level generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    config::{self, Config, DEFAULT_MAX_LEVEL, DEFAULT_P},
    error::ConfigError,
    level_generator::LevelGenerator,
};

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n+1$` is some constant
/// `$p \in (0, 1)$`. This produces a geometric distribution, albeit truncated
/// at the maximum level allowed.
#[derive(Debug, Clone)]
pub struct Geometric {
    /// The highest level index that may be generated.
    max_level: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator producing levels in
    /// `$[0, \text{max\_level}]$`, with `p` as the probability that a given
    /// node is present in the next level.
    ///
    /// The random number generator is seeded from the thread-local generator.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `max_level` must be between 1
    /// and [`MAX_LEVEL_LIMIT`][crate::MAX_LEVEL_LIMIT].
    #[inline]
    pub fn new(max_level: usize, p: f64) -> Result<Self, ConfigError> {
        Self::from_config(&Config::new().with_max_level(max_level).with_probability(p))
    }

    /// Create a new geometric level generator whose sequence of levels is
    /// fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`Geometric::new`].
    #[inline]
    pub fn seeded(max_level: usize, p: f64, seed: u64) -> Result<Self, ConfigError> {
        let config = Config::new()
            .with_max_level(max_level)
            .with_probability(p)
            .with_seed(seed);
        Self::from_config(&config)
    }

    /// Create a new geometric level generator from a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`Config::validate`].
    #[inline]
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::unchecked(
            config.max_level(),
            config.probability(),
            config.seed(),
        ))
    }

    /// The probability that a node is promoted one more level.
    #[must_use]
    #[inline]
    pub fn probability(&self) -> f64 {
        self.p
    }

    fn unchecked(max_level: usize, p: f64, seed: Option<u64>) -> Self {
        debug_assert!(config::validate_max_level(max_level).is_ok());
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Geometric { max_level, p, rng }
    }
}

impl Default for Geometric {
    /// A generator with 16 levels and `$p = 0.5$`.
    #[inline]
    fn default() -> Self {
        Self::unchecked(DEFAULT_MAX_LEVEL, DEFAULT_P, None)
    }
}

impl LevelGenerator for Geometric {
    #[inline]
    fn max_level(&self) -> usize {
        self.max_level
    }

    /// Generate a level by flipping a biased coin.
    ///
    /// Starting from level 0, the level is incremented for as long as a
    /// uniform draw `$u \in [0, 1)$` lands below `$p$` and the maximum level
    /// has not been reached. The result follows
    ///
    /// ```math
    /// P(n) = p^n (1 - p), \quad n < \text{max\_level}
    /// ```
    ///
    /// with all the remaining mass on `$\text{max\_level}$`.
    #[inline]
    fn level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.rng.random::<f64>() < self.p {
            level += 1;
        }
        level
    }
}
