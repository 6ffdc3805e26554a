//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `$n > 0$` will contain a random subset of the nodes on level `$n - 1$`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `$n$` is `$p$` times the chance of occupying level
//! `$n-1$` (with `$0 < p < 1$`).
//!
//! The policy is injected into the list so that tests can script the exact
//! level of each node, but it is unlikely that anything other than the
//! default [`Geometric`] generator is needed otherwise.

pub mod geometric;

pub use geometric::Geometric;

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to
/// higher levels with a certain probability as determined by a
/// [`LevelGenerator`].
pub trait LevelGenerator {
    /// The highest level index that may be generated.
    ///
    /// The list sizes its header from this value, so it must not change over
    /// the lifetime of the generator.
    #[must_use]
    fn max_level(&self) -> usize;

    /// Generate a level for a new node in the range `$[0, \text{max\_level}]$`.
    ///
    /// This function should _never_ return a level greater than
    /// [`max_level`][LevelGenerator::max_level]; the list clamps it if it
    /// does.
    #[must_use]
    fn level(&mut self) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
    #[inline]
    fn max_level(&self) -> usize {
        (**self).max_level()
    }

    #[inline]
    fn level(&mut self) -> usize {
        (**self).level()
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    #[inline]
    fn max_level(&self) -> usize {
        (**self).max_level()
    }

    #[inline]
    fn level(&mut self) -> usize {
        (**self).level()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Geometric, LevelGenerator};

    #[test]
    fn boxed() -> anyhow::Result<()> {
        let mut generator: Box<dyn LevelGenerator> = Box::new(Geometric::new(3, 0.5)?);
        assert_eq!(generator.max_level(), 3);
        for _ in 0..1_000 {
            assert!(generator.level() <= 3);
        }
        Ok(())
    }

    #[test]
    fn borrowed() -> anyhow::Result<()> {
        fn draw<G: LevelGenerator>(mut generator: G) -> (usize, usize) {
            (generator.max_level(), generator.level())
        }

        let mut inner = Geometric::seeded(2, 0.5, 1)?;
        let (max_level, level) = draw(&mut inner);
        assert_eq!(max_level, 2);
        assert!(level <= 2);
        Ok(())
    }
}
