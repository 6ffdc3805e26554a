//! The skiplist map.

use std::{borrow::Borrow, cmp::Ordering, fmt, mem};

use tracing::{debug, trace};

use crate::{
    config::{self, Config},
    error::Error,
    level_generator::{Geometric, LevelGenerator},
    levels::{Iter, Levels, Structure},
    skipnode::{Arena, NodeId, Position, SkipNode},
};

// ////////////////////////////////////////////////////////////////////////////
// Deletion
// ////////////////////////////////////////////////////////////////////////////

/// Outcome of [`SkipList::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Deletion<V> {
    /// The key was present; its node was unlinked and the value is returned.
    Found(V),
    /// The key was not present and the list is unchanged.
    NotFound,
}

impl<V> Deletion<V> {
    /// Returns `true` if a node was removed.
    #[inline]
    pub const fn is_found(&self) -> bool {
        matches!(self, Deletion::Found(_))
    }

    /// The removed value, if any.
    #[inline]
    pub fn into_value(self) -> Option<V> {
        match self {
            Deletion::Found(value) => Some(value),
            Deletion::NotFound => None,
        }
    }
}

impl<V> From<Deletion<V>> for Option<V> {
    #[inline]
    fn from(deletion: Deletion<V>) -> Self {
        deletion.into_value()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// An ordered map storing each key at most once, with expected `$O(\log n)$`
/// insertion, lookup and deletion.
///
/// Nodes are kept in an arena owned by the list and linked through stable
/// handles, so the list is the single owner of every entry. The level of each
/// new node is drawn from a [`LevelGenerator`], which defaults to a
/// [`Geometric`] distribution.
///
/// Keys only need to be [`PartialOrd`]. A key that cannot be ordered (such as
/// `f64::NAN`) is rejected with [`Error::ComparisonMismatch`], and the
/// rejected operation leaves the list untouched.
///
/// # Examples
///
/// ```
/// use lanes::{Deletion, SkipList};
///
/// let mut list = SkipList::with_params(4, 0.5)?;
/// list.insert(5, "a")?;
/// list.insert(1, "b")?;
/// list.insert(9, "c")?;
///
/// assert_eq!(list.get(&1)?, Some(&"b"));
/// assert_eq!(list.get(&7)?, None);
/// assert_eq!(list.delete(&5)?, Deletion::Found("a"));
/// assert_eq!(list.iter().collect::<Vec<_>>(), [(&1, &"b"), (&9, &"c")]);
/// # Ok::<(), lanes::Error>(())
/// ```
#[derive(Clone)]
pub struct SkipList<K, V, G = Geometric> {
    /// Forward links of the header sentinel, one per level up to the maximum.
    head: Vec<Option<NodeId>>,
    nodes: Arena<K, V>,
    /// Highest level used by any node so far. It never decreases, even when
    /// deletions empty the top levels.
    current_level: usize,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Constructors
// ///////////////////////////////////////////////

impl<K, V> SkipList<K, V> {
    /// Create a new skiplist with the default 16 levels and `$p = 0.5$`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanes::SkipList;
    ///
    /// let list: SkipList<i64, String> = SkipList::new();
    /// assert_eq!(list.max_level(), 16);
    /// ```
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::from_generator(Geometric::default())
    }

    /// Create a new skiplist whose nodes reach at most `max_level`, each being
    /// promoted to the next level with probability `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `max_level` is zero or too
    /// large, or if `p` is not in `$(0, 1)$`.
    #[inline]
    pub fn with_params(max_level: usize, p: f64) -> Result<Self, Error> {
        Self::with_config(Config::new().with_max_level(max_level).with_probability(p))
    }

    /// Create a new skiplist from a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration does not
    /// validate.
    #[inline]
    pub fn with_config(config: Config) -> Result<Self, Error> {
        let generator = Geometric::from_config(&config)?;
        debug!(
            max_level = config.max_level(),
            p = config.probability(),
            seeded = config.seed().is_some(),
            "created skiplist"
        );
        Ok(Self::from_generator(generator))
    }
}

impl<K, V, G: LevelGenerator> SkipList<K, V, G> {
    /// Create a new skiplist drawing node levels from `level_generator`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the generator's maximum
    /// level is zero or too large.
    #[inline]
    pub fn with_generator(level_generator: G) -> Result<Self, Error> {
        config::validate_max_level(level_generator.max_level())?;
        debug!(
            max_level = level_generator.max_level(),
            "created skiplist with custom level generator"
        );
        Ok(Self::from_generator(level_generator))
    }

    fn from_generator(level_generator: G) -> Self {
        SkipList {
            head: vec![None; level_generator.max_level() + 1],
            nodes: Arena::new(),
            current_level: 0,
            level_generator,
        }
    }
}

// ///////////////////////////////////////////////
// Mutation
// ///////////////////////////////////////////////

impl<K, V, G> SkipList<K, V, G>
where
    K: PartialOrd,
    G: LevelGenerator,
{
    /// Insert `value` under `key`.
    ///
    /// If the key is already present its value is replaced in place and the
    /// old value is returned; no node is created and the levels are left
    /// untouched. Otherwise a new node is spliced into every level up to a
    /// freshly drawn one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComparisonMismatch`] if `key` cannot be ordered
    /// against itself or a stored key; nothing is inserted in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanes::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert_eq!(list.insert(3, "x")?, None);
    /// assert_eq!(list.insert(3, "y")?, Some("x"));
    /// assert_eq!(list.len(), 1);
    /// # Ok::<(), lanes::Error>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        ensure_comparable(&key)?;

        // Levels above `current_level` keep the header as their predecessor.
        let mut update = vec![Position::Head; self.head.len()];
        let mut current = Position::Head;
        for level in (0..=self.current_level).rev() {
            current = self.advance(current, level, &key)?;
            if let Some(slot) = update.get_mut(level) {
                *slot = current;
            }
        }

        if let Some(next) = self.next(current, 0) {
            if let Some(node) = self.nodes.get_mut(next) {
                if compare(&node.key, &key)? == Ordering::Equal {
                    trace!("replaced value of existing key");
                    return Ok(Some(mem::replace(&mut node.value, value)));
                }
            }
        }

        let level = self.level_generator.level().min(self.max_level());
        if level > self.current_level {
            debug!(from = self.current_level, to = level, "raised current level");
            self.current_level = level;
        }

        let mut node = SkipNode::new(key, value, level);
        for (i, (link, &predecessor)) in node.links.iter_mut().zip(&update).enumerate() {
            *link = self.next(predecessor, i);
        }
        let id = self.nodes.alloc(node);
        for (i, &predecessor) in update.iter().enumerate().take(level + 1) {
            self.set_next(predecessor, i, Some(id));
        }
        trace!(level, len = self.len(), "inserted node");
        Ok(None)
    }

    /// Remove the node holding `key`.
    ///
    /// Every level is searched on its own, starting again from the header,
    /// and the node is unlinked from each level it occupies before its slot
    /// is released. The current level is not lowered even if the top levels
    /// end up empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComparisonMismatch`] if `key` cannot be ordered
    /// against itself or a stored key; nothing is removed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanes::{Deletion, SkipList};
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1, "one")?;
    /// assert_eq!(list.delete(&1)?, Deletion::Found("one"));
    /// assert_eq!(list.delete(&1)?, Deletion::NotFound);
    /// # Ok::<(), lanes::Error>(())
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<Deletion<V>, Error>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        ensure_comparable(key)?;

        // All comparisons happen before the first link is touched.
        let mut unlinks = Vec::new();
        let mut target = None;
        for level in (0..=self.current_level).rev() {
            let predecessor = self.advance(Position::Head, level, key)?;
            let Some(next) = self.next(predecessor, level) else {
                continue;
            };
            let Some(node) = self.nodes.get(next) else {
                continue;
            };
            if compare(&node.key, key)? == Ordering::Equal {
                unlinks.push((level, predecessor));
                target = Some(next);
            }
        }

        let Some(id) = target else {
            return Ok(Deletion::NotFound);
        };
        for (level, predecessor) in unlinks {
            let successor = self.next(Position::Node(id), level);
            self.set_next(predecessor, level, successor);
        }
        let Some(node) = self.nodes.free(id) else {
            return Ok(Deletion::NotFound);
        };
        trace!(level = node.level(), len = self.len(), "deleted node");
        let (_key, value) = node.into_inner();
        Ok(Deletion::Found(value))
    }
}

// ///////////////////////////////////////////////
// Lookup
// ///////////////////////////////////////////////

impl<K, V, G> SkipList<K, V, G> {
    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComparisonMismatch`] if `key` cannot be ordered
    /// against itself or a stored key. An absent key is `Ok(None)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanes::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert("k".to_string(), 1)?;
    /// assert_eq!(list.get("k")?, Some(&1));
    /// assert_eq!(list.get("z")?, None);
    /// # Ok::<(), lanes::Error>(())
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&V>, Error>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        Ok(self
            .find(key)?
            .and_then(|id| self.nodes.get(id))
            .map(|node| &node.value))
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`SkipList::get`].
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>, Error>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        let Some(id) = self.find(key)? else {
            return Ok(None);
        };
        Ok(self.nodes.get_mut(id).map(|node| &mut node.value))
    }

    /// Returns `true` if `key` is stored in the list.
    ///
    /// # Errors
    ///
    /// Same as [`SkipList::get`].
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> Result<bool, Error>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        Ok(self.find(key)?.is_some())
    }

    /// The entry with the lowest key.
    #[must_use]
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = self.nodes.get(self.next(Position::Head, 0)?)?;
        Some((&node.key, &node.value))
    }

    /// The entry with the highest key, reached by running down the lanes.
    #[must_use]
    #[inline]
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut current = Position::Head;
        for level in (0..=self.current_level).rev() {
            while let Some(next) = self.next(current, level) {
                current = Position::Node(next);
            }
        }
        match current {
            Position::Head => None,
            Position::Node(id) => self.nodes.get(id).map(|node| (&node.key, &node.value)),
        }
    }

    /// Number of entries in the list.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list holds no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest level index any node has reached so far.
    #[must_use]
    #[inline]
    pub const fn current_level(&self) -> usize {
        self.current_level
    }

    /// Highest level index a node may reach.
    #[must_use]
    #[inline]
    pub fn max_level(&self) -> usize {
        self.head.len() - 1
    }

    /// Remove every entry and reset the current level to 0.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head.fill(None);
        self.current_level = 0;
    }

    /// Iterate over the entries in ascending key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.next(Position::Head, 0), &self.nodes, self.len())
    }

    /// Iterate over the levels in use, from [`current_level`] down to 0.
    ///
    /// Each item is itself a lazy iterator over the entries linked at that
    /// level.
    ///
    /// [`current_level`]: SkipList::current_level
    ///
    /// # Examples
    ///
    /// ```
    /// use lanes::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(2, 'b')?;
    /// list.insert(1, 'a')?;
    ///
    /// let bottom = list.levels().last().map(|level| level.collect::<Vec<_>>());
    /// assert_eq!(bottom, Some(vec![(&1, &'a'), (&2, &'b')]));
    /// # Ok::<(), lanes::Error>(())
    /// ```
    #[inline]
    pub fn levels(&self) -> Levels<'_, K, V> {
        Levels::new(&self.head, &self.nodes, self.current_level)
    }

    /// A [`Display`][fmt::Display] adaptor drawing every level in use, top
    /// first, as `Level i: (k: v) -> ... -> NIL`.
    #[inline]
    pub fn structure(&self) -> Structure<'_, K, V> {
        Structure::new(self.levels())
    }

    /// Locate the node holding `key`.
    fn find<Q>(&self, key: &Q) -> Result<Option<NodeId>, Error>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        ensure_comparable(key)?;
        let mut current = Position::Head;
        for level in (0..=self.current_level).rev() {
            current = self.advance(current, level, key)?;
        }
        let Some(next) = self.next(current, 0) else {
            return Ok(None);
        };
        let Some(node) = self.nodes.get(next) else {
            return Ok(None);
        };
        Ok((compare(&node.key, key)? == Ordering::Equal).then_some(next))
    }

    /// Move forward along `level` from `from` for as long as the next key is
    /// strictly below `key`, returning the last position reached.
    fn advance<Q>(&self, from: Position, level: usize, key: &Q) -> Result<Position, Error>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        let mut current = from;
        while let Some(next) = self.next(current, level) {
            let Some(node) = self.nodes.get(next) else {
                break;
            };
            if compare(&node.key, key)? != Ordering::Less {
                break;
            }
            current = Position::Node(next);
        }
        Ok(current)
    }

    /// The successor of `position` at `level`.
    fn next(&self, position: Position, level: usize) -> Option<NodeId> {
        let links = match position {
            Position::Head => self.head.as_slice(),
            Position::Node(id) => self.nodes.get(id)?.links.as_slice(),
        };
        links.get(level).copied().flatten()
    }

    fn set_next(&mut self, position: Position, level: usize, target: Option<NodeId>) {
        let links = match position {
            Position::Head => Some(&mut self.head),
            Position::Node(id) => self.nodes.get_mut(id).map(|node| &mut node.links),
        };
        if let Some(slot) = links.and_then(|links| links.get_mut(level)) {
            *slot = target;
        }
    }
}

/// Order a stored key against a probe.
fn compare<K, Q>(stored: &K, key: &Q) -> Result<Ordering, Error>
where
    K: Borrow<Q>,
    Q: PartialOrd + ?Sized,
{
    stored
        .borrow()
        .partial_cmp(key)
        .ok_or(Error::ComparisonMismatch)
}

/// Reject keys which are not even equal to themselves.
fn ensure_comparable<Q: PartialOrd + ?Sized>(key: &Q) -> Result<(), Error> {
    match key.partial_cmp(key) {
        Some(Ordering::Equal) => Ok(()),
        _ => Err(Error::ComparisonMismatch),
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

#[cfg(test)]
impl<K: PartialOrd, V, G> SkipList<K, V, G> {
    /// Checks the integrity of the skiplist.
    fn check(&self) {
        use std::collections::HashSet;

        assert_eq!(self.head.len(), self.max_level() + 1);
        assert!(self.current_level <= self.max_level());

        let mut below: Option<HashSet<NodeId>> = None;
        for level in 0..=self.max_level() {
            let mut seen = HashSet::new();
            let mut previous: Option<&K> = None;
            let mut current = self.next(Position::Head, level);
            while let Some(id) = current {
                let node = self.nodes.get(id).expect("link to a freed node");
                assert!(node.level() >= level, "node linked above its level");
                if let Some(previous) = previous {
                    assert_eq!(previous.partial_cmp(&node.key), Some(Ordering::Less));
                }
                if let Some(below) = &below {
                    assert!(below.contains(&id), "node missing from the level below");
                }
                assert!(seen.insert(id), "cycle at level {level}");
                previous = Some(&node.key);
                current = node.links.get(level).copied().flatten();
            }
            if level > self.current_level {
                assert!(seen.is_empty(), "node above the current level");
            }
            if level == 0 {
                assert_eq!(seen.len(), self.nodes.len());
            }
            below = Some(seen);
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V> Default for SkipList<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, G> fmt::Debug for SkipList<K, V, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "({k:?}, {v:?})")?;
        }
        write!(f, "]")
    }
}

impl<'a, K, V, G> IntoIterator for &'a SkipList<K, V, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
