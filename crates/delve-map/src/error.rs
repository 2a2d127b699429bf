use std::fmt;
use std::io;

use delve_core::GridError;

/// Errors raised while loading, saving or applying map data.
#[derive(Debug)]
pub enum MapError {
    /// Reading or writing a file failed.
    Io(io::Error),
    /// A file did not hold valid JSON for the expected type.
    Json(serde_json::Error),
    /// The settings describe an invalid grid.
    Grid(GridError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map i/o error: {e}"),
            Self::Json(e) => write!(f, "map json error: {e}"),
            Self::Grid(e) => write!(f, "map grid error: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<GridError> for MapError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn conversions_keep_source() {
        let e: MapError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(e.to_string().contains("gone"));
        assert!(e.source().is_some());

        let e: MapError = GridError::InvalidCellSize(-1.0).into();
        assert_eq!(e.to_string(), "map grid error: invalid cell size -1");
    }
}
