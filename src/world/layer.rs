//! Map layer files
//!
//! A layer is a CSV grid of integers, one cell per tile. `-1` marks an empty
//! cell; any other value is interpreted by the layer's role.

use std::fs;
use std::path::{Path, PathBuf};

/// Validation limits so a corrupt file can't allocate an absurd world
pub mod limits {
    /// Maximum rows or columns in a layer
    pub const MAX_LAYER_SIZE: usize = 1024;
}

/// Parsed layer cells, row-major
pub type Layout = Vec<Vec<i32>>;

/// Error type for map layer loading
#[derive(Debug)]
pub enum LayerError {
    Io { path: PathBuf, source: std::io::Error },
    NotInteger { row: usize, col: usize, value: String },
    Ragged { row: usize, expected: usize, found: usize },
    TooLarge { rows: usize, cols: usize },
    /// Cell value has no graphic in the layer's indexed sequence
    GraphicIndex { layer: String, row: usize, col: usize, value: i32 },
}

impl std::fmt::Display for LayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            LayerError::NotInteger { row, col, value } => {
                write!(f, "row {} col {}: '{}' is not an integer", row, col, value)
            }
            LayerError::Ragged { row, expected, found } => {
                write!(f, "row {} has {} cells, expected {}", row, found, expected)
            }
            LayerError::TooLarge { rows, cols } => {
                write!(f, "layer too large ({}x{}, max {})", cols, rows, limits::MAX_LAYER_SIZE)
            }
            LayerError::GraphicIndex { layer, row, col, value } => {
                write!(f, "layer '{}' row {} col {}: no graphic for value {}", layer, row, col, value)
            }
        }
    }
}

impl std::error::Error for LayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayerError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse CSV text into a rectangular grid. Blank lines are skipped.
pub fn parse_layer(text: &str) -> Result<Layout, LayerError> {
    let mut rows: Layout = Vec::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let row_idx = rows.len();
        let row = line
            .split(',')
            .enumerate()
            .map(|(col, cell)| {
                let cell = cell.trim();
                cell.parse::<i32>().map_err(|_| LayerError::NotInteger {
                    row: row_idx,
                    col,
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<i32>, _>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(LayerError::Ragged { row: row_idx, expected: first.len(), found: row.len() });
            }
        }
        rows.push(row);
    }

    let cols = rows.first().map_or(0, Vec::len);
    if rows.len() > limits::MAX_LAYER_SIZE || cols > limits::MAX_LAYER_SIZE {
        return Err(LayerError::TooLarge { rows: rows.len(), cols });
    }
    Ok(rows)
}

pub fn load_layer<P: AsRef<Path>>(path: P) -> Result<Layout, LayerError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LayerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layer(&text)
}
