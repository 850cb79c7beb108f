// Common traits and types for shape grids

use crate::config::GridConfig;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns are zero, or the rendered rows are ragged
    InvalidDimensions { rows: usize, cols: usize },
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A cell holds something other than 0 or 1
    NonBinaryCell { row: usize, col: usize, value: u8 },
    DimensionMismatch {
        expected: GridConfig,
        found: GridConfig,
    },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid grid dimensions {}x{}", rows, cols)
            }
            GridError::OutOfRange {
                row,
                col,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "Cell ({}, {}) is out of range - grid size is {}x{}",
                    row, col, rows, cols
                )
            }
            GridError::NonBinaryCell { row, col, value } => {
                write!(f, "Cell ({}, {}) holds {} - expected 0 or 1", row, col, value)
            }
            GridError::DimensionMismatch { expected, found } => write!(
                f,
                "Grid size mismatch: expected {}x{}, found {}x{}",
                expected.rows, expected.cols, found.rows, found.cols
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Common trait for clickable selection grids
pub trait GridTrait {
    /// Get the grid configuration
    fn config(&self) -> &GridConfig;

    /// Deselect every cell
    fn clear(&mut self);

    /// Get the number of selected cells
    fn selected_cells(&self) -> usize;

    /// Check if a cell is selected
    fn is_cell_selected(&self, row: usize, col: usize) -> GridResult<bool>;

    /// Flip a cell, returning whether it is selected afterwards
    fn toggle_cell(&mut self, row: usize, col: usize) -> GridResult<bool>;

    /// Validate coordinates against grid bounds
    fn validate_coordinates(&self, row: usize, col: usize) -> GridResult<()> {
        let config = self.config();
        if !config.contains(row, col) {
            return Err(GridError::OutOfRange {
                row,
                col,
                rows: config.rows,
                cols: config.cols,
            });
        }
        Ok(())
    }
}
