// Shape Grid - binary mask painted cell by cell
// Each cell is 0 (empty) or 1 (part of the shape); the layout matches the
// rendered table of `cell_{row}_{col}` elements exactly.

use crate::config::GridConfig;
use crate::grid::traits::{GridError, GridResult, GridTrait};

pub const EMPTY: u8 = 0;
pub const SELECTED: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGrid {
    config: GridConfig,
    cells: Vec<Vec<u8>>,
}

impl ShapeGrid {
    /// Create an all-empty grid of the given size
    pub fn new(rows: usize, cols: usize) -> GridResult<Self> {
        Self::with_config(GridConfig::new(rows, cols))
    }

    pub fn with_config(config: GridConfig) -> GridResult<Self> {
        if config.is_empty() {
            return Err(GridError::InvalidDimensions {
                rows: config.rows,
                cols: config.cols,
            });
        }

        Ok(Self {
            config,
            cells: vec![vec![EMPTY; config.cols]; config.rows],
        })
    }

    /// Size the grid from the rendered page: one entry per row group with
    /// its cell count. Ragged rows are rejected so the mask always lines up
    /// with what the user sees.
    pub fn from_rendered(row_lengths: &[usize]) -> GridResult<Self> {
        let config = GridConfig::from_rendered(row_lengths);
        if row_lengths.iter().any(|&len| len != config.cols) {
            return Err(GridError::InvalidDimensions {
                rows: config.rows,
                cols: config.cols,
            });
        }
        Self::with_config(config)
    }

    /// Load a previously saved mask
    pub fn from_rows(rows: Vec<Vec<u8>>) -> GridResult<Self> {
        let lengths: Vec<usize> = rows.iter().map(Vec::len).collect();
        let mut grid = Self::from_rendered(&lengths)?;

        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value > SELECTED {
                    return Err(GridError::NonBinaryCell { row, col, value });
                }
            }
        }

        grid.cells = rows;
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> GridResult<u8> {
        self.validate_coordinates(row, col)?;
        Ok(self.cells[row][col])
    }

    /// Flip a cell between 0 and 1 and return the new value
    pub fn toggle(&mut self, row: usize, col: usize) -> GridResult<u8> {
        self.validate_coordinates(row, col)?;
        let cell = &mut self.cells[row][col];
        *cell = if *cell == SELECTED { EMPTY } else { SELECTED };
        Ok(*cell)
    }

    pub fn selected_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == SELECTED)
            .count()
    }

    /// Cell-wise OR of two masks of the same size
    pub fn union(&self, other: &ShapeGrid) -> GridResult<ShapeGrid> {
        if self.config != other.config {
            return Err(GridError::DimensionMismatch {
                expected: self.config,
                found: other.config,
            });
        }

        let cells: Vec<Vec<u8>> = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| x | y).collect::<Vec<u8>>())
            .collect();

        Ok(ShapeGrid {
            config: self.config,
            cells,
        })
    }

    /// JSON body expected by the define-shapes endpoint: a 2-D array of 0/1
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.cells)
    }
}

impl GridTrait for ShapeGrid {
    fn config(&self) -> &GridConfig {
        &self.config
    }

    fn clear(&mut self) {
        self.cells = vec![vec![EMPTY; self.config.cols]; self.config.rows];
    }

    fn selected_cells(&self) -> usize {
        self.selected_count()
    }

    fn is_cell_selected(&self, row: usize, col: usize) -> GridResult<bool> {
        Ok(self.get(row, col)? == SELECTED)
    }

    fn toggle_cell(&mut self, row: usize, col: usize) -> GridResult<bool> {
        Ok(self.toggle(row, col)? == SELECTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert_eq!(
            ShapeGrid::new(0, 4),
            Err(GridError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert!(ShapeGrid::new(3, 0).is_err());
    }

    #[test]
    fn serializes_as_plain_matrix() {
        let mut grid = ShapeGrid::new(2, 2).unwrap();
        grid.toggle(1, 0).unwrap();
        assert_eq!(grid.to_json().unwrap(), "[[0,0],[1,0]]");
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut grid = ShapeGrid::new(2, 3).unwrap();
        grid.toggle(0, 2).unwrap();
        grid.toggle(1, 1).unwrap();
        grid.clear();
        assert_eq!(grid.selected_cells(), 0);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
    }

    #[test]
    fn from_rows_rejects_non_binary_values() {
        let err = ShapeGrid::from_rows(vec![vec![0, 2]]).unwrap_err();
        assert_eq!(
            err,
            GridError::NonBinaryCell {
                row: 0,
                col: 1,
                value: 2
            }
        );
    }
}
