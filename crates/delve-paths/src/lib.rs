//! Pathfinding over delve grids.
//!
//! A [`Pathfinder`] wraps a [`Grid`](delve_core::Grid) of
//! [`Terrain`](delve_core::Terrain) cells, precomputes every cell's
//! eight-way neighbors once, and answers two kinds of query:
//!
//! - **A\*** single-target search ([`Pathfinder::find_path`],
//!   [`Pathfinder::find_path_between`] for world positions)
//! - **Uniform-cost reachability** within a rectangular radius
//!   ([`Pathfinder::find_paths_in_radius`])
//!
//! Both return [`Path`] values. A missing path is an empty [`Path`], not an
//! error.
//!
//! Step costs are the entered cell's entering cost, plus a small penalty on
//! diagonal steps so that straight routes win ties. The A* estimate is the
//! Chebyshev distance scaled by `MovementCost::NORMAL`.

mod astar;
mod config;
mod distance;
mod neighbors;
mod path;
mod pathfinder;
mod queue;
mod radius;

pub use config::{PathfinderConfig, Walkability};
pub use distance::{chebyshev, estimate};
pub use neighbors::{DIRECTIONS, NeighborCache};
pub use path::Path;
pub use pathfinder::{Pathfinder, UNREACHABLE};
pub use queue::{PriorityQueue, QueueError};
