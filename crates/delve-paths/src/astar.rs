use delve_core::{Point, Terrain, Vec2};

use crate::distance::estimate;
use crate::path::Path;
use crate::pathfinder::{Pathfinder, SearchState};
use crate::queue::PriorityQueue;

impl<C: Terrain + Clone> Pathfinder<C> {
    /// Compute the cheapest path from `start` to `destination` using A*.
    ///
    /// Returns an empty path when either point is off-grid, when
    /// `start == destination`, or when the destination cannot be reached.
    pub fn find_path(&self, start: Point, destination: Point) -> Path<C> {
        let layout = self.grid().layout();
        let (Some(start_idx), Some(goal_idx)) = (layout.index(start), layout.index(destination))
        else {
            log::debug!("find_path: {start} -> {destination} leaves the grid");
            return Path::empty();
        };

        if start_idx == goal_idx {
            return Path::empty();
        }

        let mut state = SearchState::new(layout.len(), start_idx);
        // Entries carry the cost they were queued with so stale ones can be
        // told apart from the current best.
        let mut frontier = PriorityQueue::new();
        frontier.enqueue(0, (start_idx, 0));

        let mut found = false;
        while let Ok((current, queued_cost)) = frontier.dequeue() {
            if queued_cost > state.cost_so_far[current] {
                continue;
            }
            if current == goal_idx {
                found = true;
                break;
            }
            state.expanded += 1;

            for &next in self.neighbor_ids(current) {
                if !self.can_enter(next) {
                    continue;
                }
                let new_cost = queued_cost.saturating_add(self.step_cost(current, next));
                if state.relax(current, next, new_cost) {
                    let priority =
                        new_cost.saturating_add(estimate(layout.point(next), destination));
                    frontier.enqueue(priority, (next, new_cost));
                }
            }
        }

        log::trace!(
            "find_path: {start} -> {destination}: found={found}, expanded {} cells",
            state.expanded
        );

        if !found {
            return Path::empty();
        }
        self.reconstruct(&state, goal_idx)
    }

    /// [`find_path`](Self::find_path) between the cells under two world
    /// positions. Empty if either position is off-grid.
    pub fn find_path_between(&self, start: Vec2, destination: Vec2) -> Path<C> {
        let grid = self.grid();
        let Some(from) = grid.try_get_cell_from_world_point(start) else {
            log::debug!("find_path_between: start {start} is off-grid");
            return Path::empty();
        };
        let Some(to) = grid.try_get_cell_from_world_point(destination) else {
            log::debug!("find_path_between: destination {destination} is off-grid");
            return Path::empty();
        };
        self.find_path(from, to)
    }
}
