use delve_core::{Grid, Point, Terrain};

use crate::config::{PathfinderConfig, Walkability};
use crate::neighbors::NeighborCache;
use crate::path::Path;

/// Sentinel cost for cells not reached by a search.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-search bookkeeping
// ---------------------------------------------------------------------------

/// Predecessor and best-cost tables for one search, indexed by cell id.
///
/// Every search allocates its own state, so concurrent searches over the
/// same pathfinder never share anything mutable.
pub(crate) struct SearchState {
    pub(crate) came_from: Vec<usize>,
    pub(crate) cost_so_far: Vec<i32>,
    pub(crate) expanded: usize,
}

impl SearchState {
    pub(crate) fn new(len: usize, start: usize) -> Self {
        let mut state = Self {
            came_from: vec![NO_PARENT; len],
            cost_so_far: vec![UNREACHABLE; len],
            expanded: 0,
        };
        state.cost_so_far[start] = 0;
        state
    }

    /// Record `cost` for `next` via `current` if it beats the known cost.
    #[inline]
    pub(crate) fn relax(&mut self, current: usize, next: usize, cost: i32) -> bool {
        if cost >= self.cost_so_far[next] {
            return false;
        }
        self.cost_so_far[next] = cost;
        self.came_from[next] = current;
        true
    }

    #[inline]
    pub(crate) fn is_reached(&self, idx: usize) -> bool {
        self.cost_so_far[idx] != UNREACHABLE
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Shortest-path and reachability searches over a [`Grid`] of terrain cells.
///
/// The pathfinder owns its grid together with a cache of each cell's
/// eight-way neighbors. Grids never change shape, so the cache stays valid
/// for the pathfinder's lifetime; cell edits made through
/// [`grid_mut`](Self::grid_mut) are seen by the next search.
#[derive(Debug)]
pub struct Pathfinder<C> {
    grid: Grid<C>,
    neighbors: NeighborCache,
    config: PathfinderConfig,
}

impl<C: Terrain + Clone> Pathfinder<C> {
    /// Wrap `grid` with the default configuration.
    pub fn new(grid: Grid<C>) -> Self {
        Self::with_config(grid, PathfinderConfig::default())
    }

    /// Wrap `grid` with `config`.
    pub fn with_config(grid: Grid<C>, config: PathfinderConfig) -> Self {
        let neighbors = NeighborCache::new(grid.layout());
        log::debug!(
            "pathfinder: cached neighbors for {} cells ({}x{})",
            neighbors.len(),
            grid.width(),
            grid.height()
        );
        Self {
            grid,
            neighbors,
            config,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid<C> {
        &self.grid
    }

    /// Mutable access for cell edits such as walkability toggles.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid<C> {
        &mut self.grid
    }

    /// Give the grid back.
    pub fn into_grid(self) -> Grid<C> {
        self.grid
    }

    #[inline]
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PathfinderConfig) {
        self.config = config;
    }

    /// Recompute the neighbor cache from the grid layout.
    pub fn rebuild_neighbors(&mut self) {
        self.neighbors.rebuild(self.grid.layout());
    }

    /// Cached neighbors of `p`, in search order. Empty if `p` is off-grid.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        let layout = self.grid.layout();
        let ids = match layout.index(p) {
            Some(i) => self.neighbors.neighbors(i),
            None => &[][..],
        };
        ids.iter().map(move |&i| layout.point(i))
    }

    /// Cost of stepping from `a` to the adjacent cell `b`.
    ///
    /// Zero for `a == b`, otherwise `b`'s entering cost plus the diagonal
    /// penalty when the step is diagonal.
    pub fn cost(&self, a: Point, b: Point) -> i32 {
        if a == b {
            return 0;
        }
        let Some(cell) = self.grid.at(b) else {
            return UNREACHABLE;
        };
        let base = cell.entering_cost_with(self.config.ignore_difficult_terrain);
        if a.is_diagonal_to(b) {
            base + self.config.effective_diagonal_penalty()
        } else {
            base
        }
    }

    #[inline]
    pub(crate) fn step_cost(&self, from: usize, to: usize) -> i32 {
        let layout = self.grid.layout();
        self.cost(layout.point(from), layout.point(to))
    }

    #[inline]
    pub(crate) fn neighbor_ids(&self, idx: usize) -> &[usize] {
        self.neighbors.neighbors(idx)
    }

    /// Whether a search may step onto the cell with flat index `idx`.
    #[inline]
    pub(crate) fn can_enter(&self, idx: usize) -> bool {
        match self.config.walkability {
            Walkability::Advisory => true,
            Walkability::Blocking => self.grid.cells()[idx].is_walkable(),
        }
    }

    /// Walk `came_from` back from `destination` to the start, start excluded.
    pub(crate) fn reconstruct(&self, state: &SearchState, destination: usize) -> Path<C> {
        if !state.is_reached(destination) {
            return Path::empty();
        }
        let cells = self.grid.cells();
        let mut steps = Vec::new();
        let mut current = destination;
        while state.came_from[current] != NO_PARENT {
            steps.push(cells[current].clone());
            current = state.came_from[current];
        }
        steps.reverse();
        Path::new(
            steps,
            state.cost_so_far[destination],
            *self.grid.layout(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{GridCell, MovementCost, Vec2};

    fn open_grid(w: i32, h: i32) -> Grid<GridCell> {
        Grid::with_generator(w, h, 1.0, Vec2::ZERO, |_, x, y| GridCell::new(x, y)).unwrap()
    }

    #[test]
    fn cost_rules() {
        let mut pf = Pathfinder::new(open_grid(3, 3));
        let o = Point::new(1, 1);
        assert_eq!(pf.cost(o, o), 0);
        assert_eq!(pf.cost(o, Point::new(1, 2)), MovementCost::NORMAL);
        assert_eq!(pf.cost(o, Point::new(2, 2)), MovementCost::NORMAL + 1);

        pf.grid_mut()
            .update_cell(2, 2, |c| c.set_difficult_terrain(true))
            .unwrap();
        assert_eq!(pf.cost(o, Point::new(2, 2)), MovementCost::DIFFICULT + 1);

        pf.set_config(
            PathfinderConfig::default()
                .with_ignore_difficult_terrain(true)
                .with_diagonal_penalty(-4),
        );
        assert_eq!(pf.cost(o, Point::new(2, 2)), MovementCost::NORMAL);
    }

    #[test]
    fn neighbors_are_clipped() {
        let pf = Pathfinder::new(open_grid(3, 3));
        assert_eq!(pf.neighbors(Point::new(1, 1)).count(), 8);
        assert_eq!(pf.neighbors(Point::new(0, 0)).count(), 3);
        assert_eq!(pf.neighbors(Point::new(9, 9)).count(), 0);
    }

    #[test]
    fn can_enter_follows_walkability_mode() {
        let mut pf = Pathfinder::new(open_grid(2, 1));
        pf.grid_mut()
            .update_cell(1, 0, |c| c.set_walkable(false))
            .unwrap();
        assert!(pf.can_enter(1));
        pf.set_config(PathfinderConfig::default().with_walkability(Walkability::Blocking));
        assert!(pf.can_enter(0));
        assert!(!pf.can_enter(1));
    }

    #[test]
    fn rebuild_keeps_grid() {
        let mut pf = Pathfinder::new(open_grid(4, 2));
        pf.rebuild_neighbors();
        assert_eq!(pf.neighbors(Point::new(3, 1)).count(), 3);
        let grid = pf.into_grid();
        assert_eq!(grid.size(), Point::new(4, 2));
    }
}
