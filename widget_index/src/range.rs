// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge range indexes used to answer rectangle containment filters.
//!
//! Each rectangle edge (left, top, right, bottom) gets its own ordered multi-map
//! from coordinate to the set of z-indexes whose widget has that edge at that
//! coordinate. A containment query is then four range scans followed by a set
//! intersection:
//!
//! - left edge `>= q.x1`
//! - top edge `>= q.y1`
//! - right edge `<= q.x2`
//! - bottom edge `<= q.y2`

use alloc::collections::{BTreeMap, BTreeSet};

use crate::types::Rect;

/// One of the four rectangle edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// `x1`
    Left,
    /// `y1`
    Top,
    /// `x2`
    Right,
    /// `y2`
    Bottom,
}

impl Edge {
    /// All edges in index order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    /// The coordinate of this edge on `rect`.
    pub fn of(self, rect: &Rect) -> i64 {
        match self {
            Self::Left => rect.x1,
            Self::Top => rect.y1,
            Self::Right => rect.x2,
            Self::Bottom => rect.y2,
        }
    }
}

/// Ordered multi-map from a coordinate to the z-indexes touching it.
///
/// Buckets never stay empty: removing the last key at a coordinate drops the
/// coordinate too.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeMap {
    map: BTreeMap<i64, BTreeSet<i32>>,
}

impl EdgeMap {
    /// Register `key` at `coord`.
    pub fn add(&mut self, coord: i64, key: i32) {
        self.map.entry(coord).or_default().insert(key);
    }

    /// Unregister `key` at `coord`. Returns whether it was present.
    pub fn remove(&mut self, coord: i64, key: i32) -> bool {
        let Some(keys) = self.map.get_mut(&coord) else {
            return false;
        };
        let removed = keys.remove(&key);
        if keys.is_empty() {
            self.map.remove(&coord);
        }
        removed
    }

    /// Whether `key` is registered at `coord`.
    pub fn contains(&self, coord: i64, key: i32) -> bool {
        self.map.get(&coord).is_some_and(|keys| keys.contains(&key))
    }

    /// Union of all keys at coordinates `>= coord`.
    pub fn at_least(&self, coord: i64) -> BTreeSet<i32> {
        self.map.range(coord..).flat_map(|(_, keys)| keys.iter().copied()).collect()
    }

    /// Union of all keys at coordinates `<= coord`.
    pub fn at_most(&self, coord: i64) -> BTreeSet<i32> {
        self.map.range(..=coord).flat_map(|(_, keys)| keys.iter().copied()).collect()
    }

    /// Number of distinct coordinates.
    pub fn buckets(&self) -> usize {
        self.map.len()
    }

    /// Total number of registrations across all coordinates.
    pub fn entries(&self) -> usize {
        self.map.values().map(BTreeSet::len).sum()
    }

    /// Whether no coordinate is registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// The four edge maps, kept in lock-step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeIndexSet {
    left: EdgeMap,
    top: EdgeMap,
    right: EdgeMap,
    bottom: EdgeMap,
}

impl RangeIndexSet {
    /// Create an empty set of edge maps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access a single edge map.
    pub fn edge(&self, edge: Edge) -> &EdgeMap {
        match edge {
            Edge::Left => &self.left,
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
        }
    }

    fn edge_mut(&mut self, edge: Edge) -> &mut EdgeMap {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        }
    }

    /// Register all four edges of `rect` under `key`.
    pub fn add(&mut self, rect: &Rect, key: i32) {
        for edge in Edge::ALL {
            self.edge_mut(edge).add(edge.of(rect), key);
        }
    }

    /// Unregister all four edges of `rect` under `key`.
    pub fn remove(&mut self, rect: &Rect, key: i32) {
        for edge in Edge::ALL {
            self.edge_mut(edge).remove(edge.of(rect), key);
        }
    }

    /// Replace a registration.
    ///
    /// `old` is only removed when it sits under the same key as `new`; a
    /// registration under a different key belongs to whoever moved away from
    /// it and is removed on that path.
    pub fn reindex(&mut self, old: Option<(&Rect, i32)>, new: (&Rect, i32)) {
        if let Some((old_rect, old_key)) = old
            && old_key == new.1
        {
            self.remove(old_rect, old_key);
        }
        self.add(new.0, new.1);
    }

    /// Whether all four edges of `rect` are registered under `key`.
    pub fn contains(&self, rect: &Rect, key: i32) -> bool {
        Edge::ALL
            .into_iter()
            .all(|edge| self.edge(edge).contains(edge.of(rect), key))
    }

    /// Keys whose registered rectangle lies fully inside `query`, ascending.
    pub fn contained_in(&self, query: &Rect) -> BTreeSet<i32> {
        let mut sets = [
            self.left.at_least(query.x1),
            self.top.at_least(query.y1),
            self.right.at_most(query.x2),
            self.bottom.at_most(query.y2),
        ];
        sets.sort_by_key(BTreeSet::len);
        let [smallest, rest @ ..] = sets;
        smallest
            .into_iter()
            .filter(|key| rest.iter().all(|set| set.contains(key)))
            .collect()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        for edge in Edge::ALL {
            self.edge_mut(edge).clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn empty_buckets_are_dropped() {
        let mut m = EdgeMap::default();
        m.add(5, 1);
        m.add(5, 2);
        assert_eq!(m.buckets(), 1);
        assert!(m.remove(5, 1));
        assert_eq!(m.buckets(), 1);
        assert!(m.remove(5, 2));
        assert!(m.is_empty());
        assert!(!m.remove(5, 2));
    }

    #[test]
    fn range_unions_are_inclusive() {
        let mut m = EdgeMap::default();
        m.add(0, 1);
        m.add(10, 2);
        m.add(20, 3);
        assert_eq!(m.at_least(10).into_iter().collect::<Vec<_>>(), [2, 3]);
        assert_eq!(m.at_most(10).into_iter().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn contained_in_requires_all_four_edges() {
        let mut set = RangeIndexSet::new();
        set.add(&Rect::new(0, 0, 50, 50), 1);
        set.add(&Rect::new(50, 50, 100, 100), 2);
        set.add(&Rect::new(50, 0, 150, 100), 3);

        let hits: Vec<i32> = set.contained_in(&Rect::new(0, 0, 100, 150)).into_iter().collect();
        assert_eq!(hits, [1, 2]);
        assert!(set.contained_in(&Rect::new(1, 0, 100, 150)).contains(&2));
        assert!(!set.contained_in(&Rect::new(1, 0, 100, 150)).contains(&1));
    }

    #[test]
    fn reindex_same_key_replaces_edges() {
        let mut set = RangeIndexSet::new();
        let old = Rect::new(0, 0, 10, 10);
        let new = Rect::new(5, 5, 15, 15);
        set.add(&old, 7);
        set.reindex(Some((&old, 7)), (&new, 7));
        assert!(!set.contains(&old, 7));
        assert!(set.contains(&new, 7));
        assert_eq!(set.edge(Edge::Left).entries(), 1);
    }

    #[test]
    fn reindex_other_key_leaves_old_alone() {
        let mut set = RangeIndexSet::new();
        let rect = Rect::new(0, 0, 10, 10);
        set.add(&rect, 7);
        set.reindex(Some((&rect, 7)), (&rect, 8));
        assert!(set.contains(&rect, 7));
        assert!(set.contains(&rect, 8));
    }
}
