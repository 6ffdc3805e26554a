//! Read-only views over the lanes of a [`SkipList`][crate::SkipList].
//!
//! [`Levels`] walks the lanes from the highest level in use down to level 0,
//! yielding one [`Level`] per lane. Each [`Level`] lazily follows the forward
//! links of its lane. [`Iter`] is the level-0 lane with an exact length, and
//! [`Structure`] renders every lane as text.

use std::{fmt, iter::FusedIterator};

use crate::skipnode::{Arena, NodeId};

// ////////////////////////////////////////////////////////////////////////////
// Level
// ////////////////////////////////////////////////////////////////////////////

/// The entries linked at one level, in ascending key order.
pub struct Level<'a, K, V> {
    next: Option<NodeId>,
    nodes: &'a Arena<K, V>,
    index: usize,
}

impl<'a, K, V> Level<'a, K, V> {
    pub(crate) fn new(first: Option<NodeId>, nodes: &'a Arena<K, V>, index: usize) -> Self {
        Level {
            next: first,
            nodes,
            index,
        }
    }

    /// The level this lane belongs to, 0 being the lane holding every entry.
    #[must_use]
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl<'a, K, V> Iterator for Level<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.links.get(self.index).copied().flatten();
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Level<'_, K, V> {}

impl<K, V> Clone for Level<'_, K, V> {
    fn clone(&self) -> Self {
        Level { ..*self }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Level<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}: ", self.index)?;
        f.debug_list().entries(self.clone()).finish()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Levels
// ////////////////////////////////////////////////////////////////////////////

/// Iterator over the lanes in use, from the highest down to level 0.
pub struct Levels<'a, K, V> {
    head: &'a [Option<NodeId>],
    nodes: &'a Arena<K, V>,
    /// The next lane to hand out, or `None` once level 0 has been yielded.
    next: Option<usize>,
}

impl<'a, K, V> Levels<'a, K, V> {
    pub(crate) fn new(head: &'a [Option<NodeId>], nodes: &'a Arena<K, V>, top: usize) -> Self {
        Levels {
            head,
            nodes,
            next: Some(top),
        }
    }
}

impl<'a, K, V> Iterator for Levels<'a, K, V> {
    type Item = Level<'a, K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = index.checked_sub(1);
        let first = self.head.get(index).copied().flatten();
        Some(Level::new(first, self.nodes, index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.map_or(0, |index| index + 1);
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for Levels<'_, K, V> {}
impl<K, V> FusedIterator for Levels<'_, K, V> {}

impl<K, V> Clone for Levels<'_, K, V> {
    fn clone(&self) -> Self {
        Levels { ..*self }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Levels<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Iter
// ////////////////////////////////////////////////////////////////////////////

/// An iterator over the entries of a [`SkipList`][crate::SkipList] in
/// ascending key order.
pub struct Iter<'a, K, V> {
    level: Level<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// There must be exactly `len` nodes linked from `first` on level 0.
    pub(crate) fn new(first: Option<NodeId>, nodes: &'a Arena<K, V>, len: usize) -> Self {
        Iter {
            level: Level::new(first, nodes, 0),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.level.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            level: self.level.clone(),
            ..*self
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.level.clone()).finish()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Structure
// ////////////////////////////////////////////////////////////////////////////

/// Renders each lane on its own line, top first:
///
/// ```text
/// Level 1: (5: a) -> NIL
/// Level 0: (1: b) -> (5: a) -> (9: c) -> NIL
/// ```
pub struct Structure<'a, K, V>(Levels<'a, K, V>);

impl<'a, K, V> Structure<'a, K, V> {
    pub(crate) fn new(levels: Levels<'a, K, V>) -> Self {
        Structure(levels)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Structure<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Structure").field(&self.0).finish()
    }
}

impl<K, V> fmt::Display for Structure<'_, K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.0.clone().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "Level {}: ", level.index())?;
            for (k, v) in level {
                write!(f, "({k}: {v}) -> ")?;
            }
            write!(f, "NIL")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use crate::{SkipList, config::Config};

    #[test]
    fn iter() -> Result<()> {
        let size = 1000;
        let mut sl = SkipList::with_config(Config::new().with_seed(9))?;
        for i in (0..size).rev() {
            sl.insert(i, i)?;
        }

        let mut iter = sl.iter();
        for i in 0..size {
            assert_eq!(iter.size_hint(), (size - i, Some(size - i)));
            assert_eq!(iter.next(), Some((&i, &i)));
        }
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        Ok(())
    }

    #[test]
    fn levels_are_nested() -> Result<()> {
        let mut sl = SkipList::with_config(Config::new().with_seed(21))?;
        for i in 0..500 {
            sl.insert(i, ())?;
        }

        let levels: Vec<Vec<i32>> = sl
            .levels()
            .map(|level| level.map(|(&k, _)| k).collect())
            .collect();
        assert_eq!(levels.len(), sl.current_level() + 1);
        assert_eq!(levels.last().map(Vec::len), Some(500));
        for pair in levels.windows(2) {
            if let [upper, lower] = pair {
                assert!(upper.len() <= lower.len());
                assert!(upper.iter().all(|k| lower.contains(k)));
                assert!(upper.windows(2).all(|w| w[0] < w[1]));
            }
        }
        Ok(())
    }

    #[test]
    fn levels_size_hint() {
        let sl: SkipList<u8, u8> = SkipList::new();
        let mut levels = sl.levels();
        assert_eq!(levels.len(), 1);
        let bottom = levels.next();
        assert_eq!(bottom.as_ref().map(super::Level::index), Some(0));
        assert_eq!(bottom.map(Iterator::count), Some(0));
        assert_eq!(levels.len(), 0);
        assert!(levels.next().is_none());
    }

    #[test]
    fn empty_structure() {
        let sl: SkipList<u8, u8> = SkipList::new();
        assert_eq!(sl.structure().to_string(), "Level 0: NIL");
    }

    #[test]
    fn debug() -> Result<()> {
        let mut sl = SkipList::with_config(Config::new().with_seed(4))?;
        sl.insert(2, 'b')?;
        sl.insert(1, 'a')?;

        let mut iter = sl.iter();
        assert_eq!(format!("{iter:?}"), "[(1, 'a'), (2, 'b')]");
        assert!(iter.next().is_some());
        assert_eq!(format!("{iter:?}"), "[(2, 'b')]");

        let bottom = sl.levels().last();
        assert_eq!(
            bottom.map(|level| format!("{level:?}")).as_deref(),
            Some("Level 0: [(1, 'a'), (2, 'b')]")
        );
        assert!(format!("{:?}", sl.levels()).ends_with("Level 0: [(1, 'a'), (2, 'b')]]"));
        assert!(format!("{:?}", sl.structure()).starts_with("Structure(["));
        Ok(())
    }

    #[test]
    fn into_iter_ref() -> Result<()> {
        let mut sl = SkipList::new();
        sl.insert('b', 2)?;
        sl.insert('a', 1)?;
        let mut seen = Vec::new();
        for (k, v) in &sl {
            seen.push((*k, *v));
        }
        assert_eq!(seen, [('a', 1), ('b', 2)]);
        Ok(())
    }
}
