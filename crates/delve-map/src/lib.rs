//! Map layouts, walkability editing and persisted configuration for
//! *delve* dungeons.
//!
//! The pathfinding core only needs to know which cells are walkable. This
//! crate stores that layout as JSON ([`MapSettings`]), edits it from world
//! positions ([`MapEditor`]), and builds ready-to-query pathfinders from a
//! persisted [`DelveConfig`].

mod config;
mod editor;
mod error;
mod settings;

pub use config::DelveConfig;
pub use editor::{DEFAULT_MAP_FILE, MapEditor};
pub use error::MapError;
pub use settings::MapSettings;
