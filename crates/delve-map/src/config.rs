//! Host configuration persisted as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use delve_core::{Grid, GridCell, Vec2};
use delve_paths::{Pathfinder, PathfinderConfig};
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::settings::MapSettings;

/// Grid geometry, map file and search settings for one dungeon.
///
/// Fields missing from a file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelveConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
    pub origin: Vec2,
    /// Whether walkability editing is enabled. See
    /// [`MapEditor::from_config`](crate::MapEditor::from_config).
    pub editor_enabled: bool,
    /// Layout applied by [`build_pathfinder`](Self::build_pathfinder).
    /// A relative path is taken relative to the configuration file.
    pub map_file: Option<PathBuf>,
    pub pathfinding: PathfinderConfig,
}

impl Default for DelveConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: 10.0,
            origin: Vec2::ZERO,
            editor_enabled: false,
            map_file: None,
            pathfinding: PathfinderConfig::default(),
        }
    }
}

impl DelveConfig {
    /// Load the configuration at `path`.
    ///
    /// A missing file is created with the defaults; an empty one is
    /// overwritten with them. A relative `map_file` is resolved against the
    /// directory holding `path`.
    pub fn read_from_disk(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!(
                "configuration file {} was missing, creating default",
                path.display()
            );
            let config = Self::default();
            config.write_to_disk(path)?;
            return Ok(config);
        }

        let json = fs::read_to_string(path)?;
        if json.trim().is_empty() {
            log::warn!(
                "configuration file {} was empty, regenerating default",
                path.display()
            );
            let config = Self::default();
            config.write_to_disk(path)?;
            return Ok(config);
        }

        let mut config: Self = serde_json::from_str(&json)?;
        if let Some(dir) = path.parent() {
            config.resolve_map_file(dir);
        }
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    fn resolve_map_file(&mut self, dir: &Path) {
        if let Some(file) = &self.map_file {
            if file.is_relative() {
                self.map_file = Some(dir.join(file));
            }
        }
    }

    /// Write the configuration as pretty JSON, creating parent directories.
    pub fn write_to_disk(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// A fresh grid with one walkable cell per coordinate.
    pub fn build_grid(&self) -> Result<Grid<GridCell>, MapError> {
        let grid = Grid::with_generator(
            self.width,
            self.height,
            self.cell_size,
            self.origin,
            |_, x, y| GridCell::new(x, y),
        )?;
        Ok(grid)
    }

    /// Build the grid, apply the configured map layout if any, and wrap it
    /// in a pathfinder.
    pub fn build_pathfinder(&self) -> Result<Pathfinder<GridCell>, MapError> {
        let mut grid = self.build_grid()?;
        if let Some(file) = &self.map_file {
            MapSettings::load(file)?.apply_to(&mut grid);
        }
        Ok(Pathfinder::with_config(grid, self.pathfinding))
    }
}
