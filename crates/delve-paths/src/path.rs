use std::sync::OnceLock;

use delve_core::{GridLayout, Point, Terrain, Vec2};

/// The result of a path search: the cells to step through, in order.
///
/// The start cell is excluded and the destination included. An empty path
/// stands for both "no path exists" and "already there". Paths are
/// immutable, so the world-space waypoints are computed once on first use
/// and cached.
#[derive(Debug, Clone)]
pub struct Path<C> {
    cells: Vec<C>,
    search_cost: i32,
    layout: Option<GridLayout>,
    world: OnceLock<Vec<Vec2>>,
}

impl<C> Default for Path<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> Path<C> {
    /// A path with no cells.
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            search_cost: 0,
            layout: None,
            world: OnceLock::new(),
        }
    }

    pub(crate) fn new(cells: Vec<C>, search_cost: i32, layout: GridLayout) -> Self {
        Self {
            cells,
            search_cost,
            layout: Some(layout),
            world: OnceLock::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The cells of the path, start excluded.
    #[inline]
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// The last cell, if any.
    #[inline]
    pub fn destination(&self) -> Option<&C> {
        self.cells.last()
    }

    /// Accumulated search cost, diagonal penalties included.
    #[inline]
    pub fn search_cost(&self) -> i32 {
        self.search_cost
    }
}

impl<C: Terrain> Path<C> {
    /// Sum of the entering costs of every cell on the path.
    pub fn cost(&self) -> i32 {
        self.cells.iter().map(Terrain::entering_cost).sum()
    }

    /// Grid coordinates of the path's cells.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().map(Terrain::pos)
    }

    /// World position of each cell, computed once.
    pub fn world_path(&self) -> &[Vec2] {
        self.world.get_or_init(|| match &self.layout {
            Some(layout) => self
                .cells
                .iter()
                .map(|c| {
                    let p = c.pos();
                    layout.cell_to_world_point(p.x, p.y)
                })
                .collect(),
            None => Vec::new(),
        })
    }
}

impl<C: PartialEq> PartialEq for Path<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.search_cost == other.search_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{GridCell, MovementCost};

    fn layout() -> GridLayout {
        GridLayout::new(4, 4, 2.0, Vec2::new(1.0, 1.0)).unwrap()
    }

    #[test]
    fn empty_path() {
        let p: Path<GridCell> = Path::empty();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(p.cost(), 0);
        assert_eq!(p.search_cost(), 0);
        assert!(p.world_path().is_empty());
        assert!(p.destination().is_none());
        assert_eq!(p, Path::default());
    }

    #[test]
    fn cost_sums_entering_costs() {
        let cells = vec![
            GridCell::new(1, 0),
            GridCell::new(2, 0).with_difficult_terrain(true),
            GridCell::new(3, 1),
        ];
        let p = Path::new(cells, 41, layout());
        assert!(!p.is_empty());
        assert_eq!(
            p.cost(),
            2 * MovementCost::NORMAL + MovementCost::DIFFICULT
        );
        assert_eq!(p.cost(), p.cost());
        assert_eq!(p.search_cost(), 41);
        assert_eq!(p.destination(), Some(&GridCell::new(3, 1)));
        assert_eq!(
            p.points().collect::<Vec<_>>(),
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(3, 1)]
        );
    }

    #[test]
    fn world_path_is_cached() {
        let p = Path::new(vec![GridCell::new(0, 1), GridCell::new(1, 2)], 20, layout());
        let first = p.world_path();
        assert_eq!(first, &[Vec2::new(1.0, 3.0), Vec2::new(3.0, 5.0)]);
        let second = p.world_path();
        assert!(std::ptr::eq(first, second));
    }
}
