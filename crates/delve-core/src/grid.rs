//! The [`Grid`] type: a fixed-size 2D container of cell values anchored
//! in world space.
//!
//! Cells are stored densely in row-major order (`y * width + x`). That flat
//! index doubles as the cell's identity for anything that needs per-cell
//! side tables, such as the pathfinder's neighbor cache.

use std::fmt;

use crate::geom::{Point, Range, Vec2};

// ---------------------------------------------------------------------------
// GridLayout
// ---------------------------------------------------------------------------

/// Grid geometry: dimensions, cell size and world-space origin.
///
/// Always valid once constructed: `width > 0`, `height > 0` and a finite
/// `cell_size > 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridLayout {
    width: i32,
    height: i32,
    cell_size: f32,
    origin: Vec2,
}

impl GridLayout {
    /// Validate and create a layout.
    pub fn new(width: i32, height: i32, cell_size: f32, origin: Vec2) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            width,
            height,
            cell_size,
            origin,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Size as a `Point` (width, height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The grid rectangle `[0, width) x [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Always false: a layout has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `(x, y)` names a cell.
    #[inline]
    pub fn has_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.has_cell(p.x, p.y) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// World position of the lower-left corner of cell `(x, y)`.
    ///
    /// Defined for any coordinate, so `(width, height)` gives the far corner.
    #[inline]
    pub fn cell_to_world_point(&self, x: i32, y: i32) -> Vec2 {
        self.origin + Vec2::new(x as f32 * self.cell_size, y as f32 * self.cell_size)
    }

    /// World position of the centre of cell `(x, y)`.
    #[inline]
    pub fn cell_center(&self, x: i32, y: i32) -> Vec2 {
        self.cell_to_world_point(x, y) + Vec2::new(self.cell_size, self.cell_size) * 0.5
    }

    /// Coordinate of the cell containing `point`, or `None` if that cell
    /// lies outside the grid.
    pub fn try_get_cell_from_world_point(&self, point: Vec2) -> Option<Point> {
        let rel = point - self.origin;
        let fx = (rel.x / self.cell_size).floor();
        let fy = (rel.y / self.cell_size).floor();
        if !fx.is_finite() || !fy.is_finite() {
            return None;
        }
        let (x, y) = (fx as i32, fy as i32);
        self.has_cell(x, y).then_some(Point::new(x, y))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by grid construction and cell access.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The coordinate does not name a cell of the grid.
    OutOfBounds { pos: Point, size: Point },
    /// Width or height is not positive.
    InvalidSize { width: i32, height: i32 },
    /// Cell size is not a positive finite number.
    InvalidCellSize(f32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, size } => write!(
                f,
                "grid has no cell at {}-{} (size {}x{})",
                pos.x, pos.y, size.x, size.y
            ),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid grid size {width}x{height}")
            }
            Self::InvalidCellSize(s) => write!(f, "invalid cell size {s}"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Notification that the cell at `(x, y)` was replaced or edited.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridChanged {
    pub x: i32,
    pub y: i32,
}

type Observer = Box<dyn FnMut(GridChanged) + Send + Sync>;

/// A fixed-size 2D grid of cell values.
///
/// The grid never changes shape after construction. Cell values are
/// replaced with [`set_cell`](Grid::set_cell) or edited in place with
/// [`update_cell`](Grid::update_cell); both notify registered observers.
pub struct Grid<C> {
    layout: GridLayout,
    cells: Vec<C>,
    observers: Vec<Observer>,
}

impl<C: Default> Grid<C> {
    /// Create a grid filled with `C::default()`.
    pub fn new(width: i32, height: i32, cell_size: f32, origin: Vec2) -> Result<Self, GridError> {
        let layout = GridLayout::new(width, height, cell_size, origin)?;
        let cells = std::iter::repeat_with(C::default)
            .take(layout.len())
            .collect();
        Ok(Self {
            layout,
            cells,
            observers: Vec::new(),
        })
    }
}

impl<C> Grid<C> {
    /// Create a grid whose cells are produced by `generate(layout, x, y)`.
    ///
    /// The generator runs once per coordinate, x outer and y inner.
    pub fn with_generator(
        width: i32,
        height: i32,
        cell_size: f32,
        origin: Vec2,
        mut generate: impl FnMut(&GridLayout, i32, i32) -> C,
    ) -> Result<Self, GridError> {
        let layout = GridLayout::new(width, height, cell_size, origin)?;
        let mut slots: Vec<Option<C>> = std::iter::repeat_with(|| None)
            .take(layout.len())
            .collect();
        for x in 0..width {
            for y in 0..height {
                let i = (y as usize) * (width as usize) + (x as usize);
                slots[i] = Some(generate(&layout, x, y));
            }
        }
        Ok(Self {
            layout,
            cells: slots.into_iter().flatten().collect(),
            observers: Vec::new(),
        })
    }

    /// The grid's geometry.
    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.layout.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.layout.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.layout.cell_size
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.layout.origin
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.layout.size()
    }

    /// The grid rectangle.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.layout.bounds()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(x, y)` names a cell of this grid.
    #[inline]
    pub fn has_cell(&self, x: i32, y: i32) -> bool {
        self.layout.has_cell(x, y)
    }

    /// Whether `p` names a cell of this grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.layout.has_cell(p.x, p.y)
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        self.layout
            .index(Point::new(x, y))
            .ok_or(GridError::OutOfBounds {
                pos: Point::new(x, y),
                size: self.size(),
            })
    }

    /// The cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Result<&C, GridError> {
        let i = self.checked_index(x, y)?;
        Ok(&self.cells[i])
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&C> {
        self.layout.index(p).map(|i| &self.cells[i])
    }

    /// All cells, indexed by flat index (`y * width + x`).
    #[inline]
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// Replace the cell at `(x, y)` and notify observers.
    pub fn set_cell(&mut self, x: i32, y: i32, value: C) -> Result<(), GridError> {
        let i = self.checked_index(x, y)?;
        self.cells[i] = value;
        self.notify(x, y);
        Ok(())
    }

    /// Edit the cell at `(x, y)` in place and notify observers.
    pub fn update_cell<R>(
        &mut self,
        x: i32,
        y: i32,
        f: impl FnOnce(&mut C) -> R,
    ) -> Result<R, GridError> {
        let i = self.checked_index(x, y)?;
        let r = f(&mut self.cells[i]);
        self.notify(x, y);
        Ok(r)
    }

    /// Register a callback invoked after every cell change.
    pub fn on_cell_changed(&mut self, observer: impl FnMut(GridChanged) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Remove all change callbacks.
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    fn notify(&mut self, x: i32, y: i32) {
        for observer in self.observers.iter_mut() {
            observer(GridChanged { x, y });
        }
    }

    /// World position of the lower-left corner of cell `(x, y)`.
    #[inline]
    pub fn cell_to_world_point(&self, x: i32, y: i32) -> Vec2 {
        self.layout.cell_to_world_point(x, y)
    }

    /// Coordinate of the cell containing the world `point`, if any.
    #[inline]
    pub fn try_get_cell_from_world_point(&self, point: Vec2) -> Option<Point> {
        self.layout.try_get_cell_from_world_point(point)
    }

    /// Row-major iterator over `(Point, &C)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &C)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.layout.point(i), c))
    }
}

impl<C: fmt::Debug> fmt::Debug for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("layout", &self.layout)
            .field("cells", &self.cells)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// One text row per grid row, highest `y` first so the output reads like
/// the world it describes.
impl<C: fmt::Display> fmt::Display for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.layout.width as usize;
        for (n, row) in self.cells.chunks(w).rev().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{GridCell, Terrain};
    use std::sync::{Arc, Mutex};

    fn cell_grid(w: i32, h: i32) -> Grid<GridCell> {
        Grid::with_generator(w, h, 1.0, Vec2::ZERO, |_, x, y| GridCell::new(x, y)).unwrap()
    }

    #[test]
    fn new_rejects_bad_dimensions() {
        assert_eq!(
            Grid::<i32>::new(0, 3, 1.0, Vec2::ZERO).unwrap_err(),
            GridError::InvalidSize {
                width: 0,
                height: 3
            }
        );
        assert!(Grid::<i32>::new(3, -1, 1.0, Vec2::ZERO).is_err());
        assert_eq!(
            Grid::<i32>::new(3, 3, 0.0, Vec2::ZERO).unwrap_err(),
            GridError::InvalidCellSize(0.0)
        );
        assert!(Grid::<i32>::new(3, 3, f32::NAN, Vec2::ZERO).is_err());
    }

    #[test]
    fn new_fills_with_default() {
        let g = Grid::<i32>::new(4, 3, 1.0, Vec2::ZERO).unwrap();
        assert_eq!(g.size(), Point::new(4, 3));
        assert_eq!(g.len(), 12);
        assert!(g.iter().all(|(_, &v)| v == 0));
    }

    #[test]
    fn generator_runs_x_outer_y_inner() {
        let mut order = Vec::new();
        let g = Grid::with_generator(2, 3, 1.0, Vec2::ZERO, |_, x, y| {
            order.push((x, y));
            x * 10 + y
        })
        .unwrap();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        for x in 0..2 {
            for y in 0..3 {
                assert_eq!(*g.cell(x, y).unwrap(), x * 10 + y);
            }
        }
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut g = Grid::<i32>::new(5, 4, 1.0, Vec2::ZERO).unwrap();
        for p in g.bounds() {
            assert!(g.has_cell(p.x, p.y));
            g.set_cell(p.x, p.y, p.x * 100 + p.y).unwrap();
        }
        for p in g.bounds() {
            assert_eq!(*g.cell(p.x, p.y).unwrap(), p.x * 100 + p.y);
            assert_eq!(g.at(p), Some(&(p.x * 100 + p.y)));
        }
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut g = Grid::<i32>::new(3, 2, 1.0, Vec2::ZERO).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 2), (3, 2), (i32::MIN, i32::MAX)] {
            assert!(!g.has_cell(x, y));
            assert!(matches!(
                g.cell(x, y),
                Err(GridError::OutOfBounds { .. })
            ));
            assert_eq!(
                g.set_cell(x, y, 1),
                Err(GridError::OutOfBounds {
                    pos: Point::new(x, y),
                    size: Point::new(3, 2)
                })
            );
            assert!(g.at(Point::new(x, y)).is_none());
        }
    }

    #[test]
    fn world_point_conversion() {
        let g = Grid::<i32>::new(10, 10, 2.0, Vec2::new(5.0, -3.0)).unwrap();
        assert_eq!(g.cell_to_world_point(0, 0), Vec2::new(5.0, -3.0));
        assert_eq!(g.cell_to_world_point(3, 4), Vec2::new(11.0, 5.0));

        for p in g.bounds() {
            let centre = g.layout().cell_center(p.x, p.y);
            assert_eq!(g.try_get_cell_from_world_point(centre), Some(p));
            let corner = g.cell_to_world_point(p.x, p.y);
            assert_eq!(g.try_get_cell_from_world_point(corner), Some(p));
        }

        assert_eq!(g.try_get_cell_from_world_point(Vec2::new(4.9, 0.0)), None);
        assert_eq!(g.try_get_cell_from_world_point(Vec2::new(25.0, 0.0)), None);
        assert_eq!(
            g.try_get_cell_from_world_point(Vec2::new(f32::NAN, 0.0)),
            None
        );
    }

    #[test]
    fn observers_see_changes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut g = cell_grid(3, 3);
        let sink = Arc::clone(&seen);
        g.on_cell_changed(move |ev| sink.lock().unwrap().push(ev));

        g.set_cell(1, 2, GridCell::new(1, 2).with_walkable(false))
            .unwrap();
        let now = g
            .update_cell(0, 0, |c| {
                c.set_difficult_terrain(true);
                c.is_difficult_terrain()
            })
            .unwrap();
        assert!(now);
        assert!(g.set_cell(5, 5, GridCell::new(5, 5)).is_err());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![GridChanged { x: 1, y: 2 }, GridChanged { x: 0, y: 0 }]
        );

        g.clear_observers();
        g.set_cell(2, 2, GridCell::new(2, 2)).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn index_and_point_agree() {
        let g = cell_grid(4, 3);
        for (i, c) in g.cells().iter().enumerate() {
            assert_eq!(g.layout().point(i), c.pos());
            assert_eq!(g.layout().index(c.pos()), Some(i));
        }
    }

    #[test]
    fn display_puts_top_row_first() {
        let mut g = cell_grid(3, 2);
        g.update_cell(0, 1, |c| c.set_walkable(false)).unwrap();
        assert_eq!(g.to_string(), "011\n111");
    }
}
