//! Helpers shared by the integration tests.

#![allow(dead_code, reason = "Not every test binary uses every helper.")]

use std::fmt::Debug;

use lanes::{LevelGenerator, SkipList};

/// A level generator handing out a fixed sequence of levels, then level 0.
#[derive(Debug)]
pub struct Scripted {
    max_level: usize,
    levels: std::vec::IntoIter<usize>,
}

impl Scripted {
    pub fn new(max_level: usize, levels: impl IntoIterator<Item = usize>) -> Self {
        Self {
            max_level,
            levels: levels.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl LevelGenerator for Scripted {
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn level(&mut self) -> usize {
        self.levels.next().unwrap_or(0)
    }
}

/// Keys linked at each level in use, top level first.
pub fn lane_keys<K: Copy, V, G>(list: &SkipList<K, V, G>) -> Vec<(usize, Vec<K>)> {
    list.levels()
        .map(|level| (level.index(), level.map(|(&k, _)| k).collect()))
        .collect()
}

/// Assert the structural invariants which are observable through the public
/// enumeration.
pub fn assert_invariants<K, V, G>(list: &SkipList<K, V, G>)
where
    K: Ord + Copy + Debug,
{
    let lanes = lane_keys(list);
    assert_eq!(lanes.len(), list.current_level() + 1);
    assert!(list.current_level() <= list.max_level());

    for (expected, (index, keys)) in (0..=list.current_level()).rev().zip(&lanes) {
        assert_eq!(*index, expected);
        assert!(
            keys.windows(2).all(|pair| pair[0] < pair[1]),
            "level {index} is not strictly increasing: {keys:?}"
        );
    }

    for pair in lanes.windows(2) {
        let ((upper, above), (_, below)) = (&pair[0], &pair[1]);
        for key in above {
            assert!(
                below.binary_search(key).is_ok(),
                "{key:?} is on level {upper} but not below it"
            );
        }
    }

    let bottom = lanes.last().map(|(_, keys)| keys.len());
    assert_eq!(bottom, Some(list.len()));
}
