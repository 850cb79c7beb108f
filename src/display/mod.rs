// Display module for shape grid snapshots
pub mod formatters;

// Re-export main functions
pub use formatters::{
    format_column_headers, format_row_prefix, format_selection_summary, print_colored_grid,
    print_grid_header, render_grid,
};

/// Trait for displaying grid cells
pub trait CellDisplay {
    /// Get the display string for this cell
    fn display_cell(&self) -> &str;

    /// Check if this cell is part of the shape
    fn is_selected(&self) -> bool;
}

impl CellDisplay for u8 {
    fn display_cell(&self) -> &str {
        if self.is_selected() {
            " # "
        } else {
            " . "
        }
    }

    fn is_selected(&self) -> bool {
        *self == crate::grid::shape::SELECTED
    }
}
