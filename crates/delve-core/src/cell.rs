//! [`GridCell`], the terrain state of one grid position, and the
//! [`Terrain`] trait the pathfinder reads it through.

use std::fmt;

use crate::geom::Point;

/// Base costs of entering a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MovementCost;

impl MovementCost {
    /// Cost of entering an ordinary cell.
    pub const NORMAL: i32 = 10;
    /// Cost of entering difficult terrain.
    pub const DIFFICULT: i32 = 20;
}

/// Terrain information consumed by pathfinding.
///
/// Implementors must report the position they were created for; the
/// pathfinder relies on `pos()` matching the cell's coordinate in its grid.
pub trait Terrain {
    /// Grid coordinate of this cell.
    fn pos(&self) -> Point;

    /// Whether units may stand on this cell.
    fn is_walkable(&self) -> bool;

    /// Cost of moving into this cell. When `ignore_difficult_terrain` is set
    /// every cell costs [`MovementCost::NORMAL`].
    fn entering_cost_with(&self, ignore_difficult_terrain: bool) -> i32;

    /// Cost of moving into this cell, difficult terrain included.
    #[inline]
    fn entering_cost(&self) -> i32 {
        self.entering_cost_with(false)
    }
}

/// Terrain state of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pos: Point,
    walkable: bool,
    difficult_terrain: bool,
}

impl GridCell {
    /// A walkable, ordinary cell at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            walkable: true,
            difficult_terrain: false,
        }
    }

    /// X coordinate.
    #[inline]
    pub const fn x(&self) -> i32 {
        self.pos.x
    }

    /// Y coordinate.
    #[inline]
    pub const fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub const fn is_difficult_terrain(&self) -> bool {
        self.difficult_terrain
    }

    #[inline]
    pub fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }

    #[inline]
    pub fn set_difficult_terrain(&mut self, difficult: bool) {
        self.difficult_terrain = difficult;
    }

    /// Set walkability (builder).
    #[inline]
    pub const fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }

    /// Set difficult terrain (builder).
    #[inline]
    pub const fn with_difficult_terrain(mut self, difficult: bool) -> Self {
        self.difficult_terrain = difficult;
        self
    }
}

impl Default for GridCell {
    #[inline]
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Terrain for GridCell {
    #[inline]
    fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    fn is_walkable(&self) -> bool {
        self.walkable
    }

    fn entering_cost_with(&self, ignore_difficult_terrain: bool) -> i32 {
        if ignore_difficult_terrain || !self.difficult_terrain {
            MovementCost::NORMAL
        } else {
            MovementCost::DIFFICULT
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.walkable { "1" } else { "0" })
    }
}
