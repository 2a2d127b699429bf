use delve_core::{Point, Terrain};

use crate::path::Path;
use crate::pathfinder::{Pathfinder, SearchState};
use crate::queue::PriorityQueue;

impl<C: Terrain + Clone> Pathfinder<C> {
    /// Cheapest paths from `start` to every cell the search reaches while
    /// expanding only cells within `radius_x` columns and `radius_y` rows of
    /// `start`.
    ///
    /// The radius limits expansion, not discovery: cells one step outside
    /// the rectangle are reached from its edge and get a path too. The
    /// search runs until the frontier is exhausted. Paths are returned in
    /// flat-index order of their destination; the start itself is omitted.
    pub fn find_paths_in_radius(&self, start: Point, radius_x: i32, radius_y: i32) -> Vec<Path<C>> {
        let layout = self.grid().layout();
        let Some(start_idx) = layout.index(start) else {
            log::debug!("find_paths_in_radius: start {start} is off-grid");
            return Vec::new();
        };

        let mut state = SearchState::new(layout.len(), start_idx);
        let mut frontier = PriorityQueue::new();
        frontier.enqueue(0, (start_idx, 0));

        while let Ok((current, queued_cost)) = frontier.dequeue() {
            if queued_cost > state.cost_so_far[current] {
                continue;
            }
            let p = layout.point(current);
            if (p.x - start.x).abs() > radius_x || (p.y - start.y).abs() > radius_y {
                continue;
            }
            state.expanded += 1;

            for &next in self.neighbor_ids(current) {
                if !self.can_enter(next) {
                    continue;
                }
                let new_cost = queued_cost.saturating_add(self.step_cost(current, next));
                if state.relax(current, next, new_cost) {
                    frontier.enqueue(new_cost, (next, new_cost));
                }
            }
        }

        let paths: Vec<Path<C>> = (0..layout.len())
            .filter(|&idx| idx != start_idx && state.is_reached(idx))
            .map(|idx| self.reconstruct(&state, idx))
            .filter(|path| !path.is_empty())
            .collect();

        log::trace!(
            "find_paths_in_radius: {start} r=({radius_x}, {radius_y}): expanded {}, reached {}",
            state.expanded,
            paths.len()
        );
        paths
    }
}
