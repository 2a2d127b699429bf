//! **delve-core**: grid maps for dungeon crawling (core types).
//!
//! This crate provides the foundational types used across the *delve*
//! crates: geometry primitives, terrain cells and a fixed-size cell grid
//! anchored in world space.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{GridCell, MovementCost, Terrain};
pub use geom::{Point, Range, Vec2};
pub use grid::{Grid, GridChanged, GridError, GridLayout};
