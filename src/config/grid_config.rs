// Shape grid dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10, // Default model grid size
            cols: 10,
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Dimensions of a grid as rendered on the page: one entry per row group
    /// holding its cell count. The first row decides the column count.
    pub fn from_rendered(row_lengths: &[usize]) -> Self {
        Self {
            rows: row_lengths.len(),
            cols: row_lengths.first().copied().unwrap_or(0),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}
