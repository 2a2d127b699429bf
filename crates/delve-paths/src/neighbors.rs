use delve_core::{GridLayout, Point};

/// Neighbor offsets in search order: the four orthogonal directions
/// (N, E, S, W) followed by the four diagonals (NE, SE, SW, NW).
pub const DIRECTIONS: [Point; 8] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, -1),
    Point::new(-1, 1),
];

/// Precomputed 8-way adjacency for every cell of a grid layout.
///
/// Cells are identified by their flat grid index. Neighbor lists are clipped
/// to the grid bounds and stored back to back, so a lookup is a slice of
/// one shared buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborCache {
    starts: Vec<usize>,
    ids: Vec<usize>,
}

impl NeighborCache {
    /// Build the cache for `layout`.
    pub fn new(layout: &GridLayout) -> Self {
        let mut cache = Self::default();
        cache.rebuild(layout);
        cache
    }

    /// Recompute all neighbor lists for `layout`.
    pub fn rebuild(&mut self, layout: &GridLayout) {
        let len = layout.len();
        self.starts.clear();
        self.ids.clear();
        self.starts.reserve(len + 1);
        self.ids.reserve(len * DIRECTIONS.len());
        for idx in 0..len {
            self.starts.push(self.ids.len());
            let p = layout.point(idx);
            for d in DIRECTIONS {
                if let Some(n) = layout.index(p + d) {
                    self.ids.push(n);
                }
            }
        }
        self.starts.push(self.ids.len());
    }

    /// Number of cells covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbors of the cell with flat index `idx`. Empty for an unknown index.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        match (self.starts.get(idx), self.starts.get(idx + 1)) {
            (Some(&s), Some(&e)) => &self.ids[s..e],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::Vec2;

    fn layout(w: i32, h: i32) -> GridLayout {
        GridLayout::new(w, h, 1.0, Vec2::ZERO).unwrap()
    }

    #[test]
    fn neighbor_counts_are_clipped() {
        let l = layout(3, 3);
        let cache = NeighborCache::new(&l);
        assert_eq!(cache.len(), 9);
        let count = |x, y| cache.neighbors(l.index(Point::new(x, y)).unwrap()).len();
        assert_eq!(count(1, 1), 8);
        assert_eq!(count(0, 0), 3);
        assert_eq!(count(2, 2), 3);
        assert_eq!(count(1, 0), 5);
        assert_eq!(count(0, 1), 5);
    }

    #[test]
    fn neighbors_follow_direction_order() {
        let l = layout(3, 3);
        let cache = NeighborCache::new(&l);
        let centre = l.index(Point::new(1, 1)).unwrap();
        let pts: Vec<Point> = cache
            .neighbors(centre)
            .iter()
            .map(|&i| l.point(i))
            .collect();
        let expected: Vec<Point> = DIRECTIONS.iter().map(|&d| Point::new(1, 1) + d).collect();
        assert_eq!(pts, expected);
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let l = layout(1, 1);
        let cache = NeighborCache::new(&l);
        assert_eq!(cache.len(), 1);
        assert!(cache.neighbors(0).is_empty());
        assert!(cache.neighbors(7).is_empty());
    }

    #[test]
    fn rebuild_tracks_new_layout() {
        let mut cache = NeighborCache::new(&layout(2, 2));
        assert_eq!(cache.len(), 4);
        cache.rebuild(&layout(4, 1));
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.neighbors(0), &[1]);
        assert_eq!(cache.neighbors(1), &[2, 0]);
    }
}
