use std::path::{Path, PathBuf};

use delve_core::{Grid, GridCell, Terrain, Vec2};

use crate::config::DelveConfig;
use crate::error::MapError;
use crate::settings::MapSettings;

/// Layout file used when the configuration names none.
pub const DEFAULT_MAP_FILE: &str = "map.json";

/// Interactive walkability editing bound to one layout file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEditor {
    file: PathBuf,
}

impl MapEditor {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// The editor for `config`'s map file, or `None` when
    /// `editor_enabled` is off.
    pub fn from_config(config: &DelveConfig) -> Option<Self> {
        if !config.editor_enabled {
            log::info!("map editor is disabled");
            return None;
        }
        let file = config
            .map_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAP_FILE));
        Some(Self::new(file))
    }

    /// The layout file this editor saves to.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Flip the walkability of the cell under the world position `point`.
    ///
    /// Returns the cell's new walkability, or `None` if `point` is off-grid.
    pub fn toggle_at(&self, grid: &mut Grid<GridCell>, point: Vec2) -> Option<bool> {
        let p = grid.try_get_cell_from_world_point(point)?;
        let walkable = grid
            .update_cell(p.x, p.y, |c| {
                c.set_walkable(!c.is_walkable());
                c.is_walkable()
            })
            .ok()?;
        log::debug!("map editor: {p} is now {}", if walkable { "open" } else { "blocked" });
        Some(walkable)
    }

    /// Save the grid's layout to the editor's file.
    pub fn save(&self, grid: &Grid<GridCell>) -> Result<MapSettings, MapError> {
        let settings = MapSettings::from_grid(grid);
        settings.save(&self.file)?;
        Ok(settings)
    }

    /// Replace the grid's layout with the one in the editor's file.
    pub fn load(&self, grid: &mut Grid<GridCell>) -> Result<usize, MapError> {
        let settings = MapSettings::load(&self.file)?;
        Ok(settings.apply_to(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{GridChanged, Point};
    use std::sync::{Arc, Mutex};

    fn grid() -> Grid<GridCell> {
        Grid::with_generator(4, 4, 10.0, Vec2::new(-20.0, -20.0), |_, x, y| {
            GridCell::new(x, y)
        })
        .unwrap()
    }

    #[test]
    fn toggle_flips_and_notifies() {
        let mut g = grid();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        g.on_cell_changed(move |ev| sink.lock().unwrap().push(ev));

        let editor = MapEditor::new("unused.json");
        assert_eq!(editor.toggle_at(&mut g, Vec2::new(-15.0, 5.0)), Some(false));
        assert!(!g.cell(0, 2).unwrap().is_walkable());
        assert_eq!(editor.toggle_at(&mut g, Vec2::new(-11.0, 9.0)), Some(true));
        assert!(g.cell(0, 2).unwrap().is_walkable());

        assert_eq!(editor.toggle_at(&mut g, Vec2::new(25.0, 0.0)), None);
        assert_eq!(
            *events.lock().unwrap(),
            vec![GridChanged { x: 0, y: 2 }, GridChanged { x: 0, y: 2 }]
        );
    }

    #[test]
    fn disabled_editor_is_not_created() {
        let config = DelveConfig {
            map_file: Some(PathBuf::from("layout.json")),
            ..DelveConfig::default()
        };
        assert!(!config.editor_enabled);
        assert_eq!(MapEditor::from_config(&config), None);

        let enabled = DelveConfig {
            editor_enabled: true,
            ..config
        };
        let editor = MapEditor::from_config(&enabled).unwrap();
        assert_eq!(editor.file(), Path::new("layout.json"));

        let unnamed = DelveConfig {
            editor_enabled: true,
            ..DelveConfig::default()
        };
        assert_eq!(
            MapEditor::from_config(&unnamed).unwrap().file(),
            Path::new(DEFAULT_MAP_FILE)
        );
    }

    #[test]
    fn save_then_load_restores_layout() {
        let dir = tempfile::tempdir().unwrap();
        let editor = MapEditor::new(dir.path().join("MapSettings").join("testmap.json"));

        let mut g = grid();
        editor.toggle_at(&mut g, Vec2::new(0.0, 0.0)).unwrap();
        editor.toggle_at(&mut g, Vec2::new(15.0, -15.0)).unwrap();
        let saved = editor.save(&g).unwrap();
        assert_eq!(saved.unwalkable_tiles, vec![Point::new(2, 2), Point::new(3, 0)]);
        assert!(editor.file().exists());

        let mut fresh = grid();
        assert_eq!(editor.load(&mut fresh).unwrap(), 2);
        assert_eq!(MapSettings::from_grid(&fresh), saved);
    }
}
