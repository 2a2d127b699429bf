//! Persisted map layouts.
//!
//! A layout is stored as the list of coordinates that are not walkable.
//! Everything else in the grid is walkable.

use std::fs;
use std::path::Path;

use delve_core::{Grid, GridCell, Point, Terrain};
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// The walkability layout of a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default)]
    pub unwalkable_tiles: Vec<Point>,
}

impl MapSettings {
    pub fn new(unwalkable_tiles: Vec<Point>) -> Self {
        Self { unwalkable_tiles }
    }

    /// Collect the non-walkable cells of `grid`, x outer and y inner.
    pub fn from_grid<C: Terrain>(grid: &Grid<C>) -> Self {
        let mut unwalkable_tiles = Vec::new();
        for x in 0..grid.width() {
            for y in 0..grid.height() {
                let p = Point::new(x, y);
                if grid.at(p).is_some_and(|c| !c.is_walkable()) {
                    unwalkable_tiles.push(p);
                }
            }
        }
        Self { unwalkable_tiles }
    }

    /// Make the listed cells non-walkable and every other cell walkable.
    ///
    /// Coordinates outside the grid are skipped. Returns how many cells
    /// changed.
    pub fn apply_to(&self, grid: &mut Grid<GridCell>) -> usize {
        let mut blocked = vec![false; grid.len()];
        for &p in &self.unwalkable_tiles {
            match grid.layout().index(p) {
                Some(i) => blocked[i] = true,
                None => log::warn!("map layout: skipping {p}, outside {}", grid.bounds()),
            }
        }

        let mut changed = 0;
        for (i, &is_blocked) in blocked.iter().enumerate() {
            let p = grid.layout().point(i);
            let walkable = !is_blocked;
            if grid.at(p).is_some_and(|c| c.is_walkable() != walkable)
                && grid.update_cell(p.x, p.y, |c| c.set_walkable(walkable)).is_ok()
            {
                changed += 1;
            }
        }
        changed
    }

    /// Read a layout from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        log::info!(
            "loaded map layout from {} ({} blocked tiles)",
            path.display(),
            settings.unwalkable_tiles.len()
        );
        Ok(settings)
    }

    /// Write the layout as JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        log::info!("saved map to {}", path.display());
        Ok(())
    }
}
