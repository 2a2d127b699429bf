/// How the search treats cells that are not walkable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Walkability {
    /// Walkability is informational only and the search ignores it.
    #[default]
    Advisory,
    /// Non-walkable cells are never entered. The start cell is exempt.
    Blocking,
}

/// Tuning knobs for [`Pathfinder`](crate::Pathfinder) searches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    pub walkability: Walkability,
    /// Extra cost of a diagonal step, biasing searches toward straight
    /// lines. Negative values are treated as 0.
    pub diagonal_penalty: i32,
    /// Price every step at `MovementCost::NORMAL`.
    pub ignore_difficult_terrain: bool,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            walkability: Walkability::Advisory,
            diagonal_penalty: 1,
            ignore_difficult_terrain: false,
        }
    }
}

impl PathfinderConfig {
    /// Set walkability handling (builder).
    pub fn with_walkability(mut self, walkability: Walkability) -> Self {
        self.walkability = walkability;
        self
    }

    /// Set the diagonal penalty (builder).
    pub fn with_diagonal_penalty(mut self, penalty: i32) -> Self {
        self.diagonal_penalty = penalty;
        self
    }

    /// Set whether difficult terrain is ignored (builder).
    pub fn with_ignore_difficult_terrain(mut self, ignore: bool) -> Self {
        self.ignore_difficult_terrain = ignore;
        self
    }

    /// The diagonal penalty actually applied.
    #[inline]
    pub(crate) fn effective_diagonal_penalty(&self) -> i32 {
        self.diagonal_penalty.max(0)
    }
}
