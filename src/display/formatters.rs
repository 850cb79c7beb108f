// Shape grid formatting utilities

use super::CellDisplay;
use crate::grid::{GridTrait, ShapeGrid};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Column headers for a grid
pub fn format_column_headers(cols: usize) -> String {
    let mut line = String::from("    ");
    for col in 0..cols {
        let _ = write!(line, " {:2}", col);
    }
    line
}

/// Row prefix for grid rows
pub fn format_row_prefix(row: usize) -> String {
    format!("{:2}: ", row)
}

/// Plain-text snapshot of the whole grid: `#` selected, `.` empty
pub fn render_grid(grid: &ShapeGrid) -> String {
    let mut out = format_column_headers(grid.cols());
    out.push('\n');

    for (row, cells) in grid.cells().iter().enumerate() {
        out.push_str(&format_row_prefix(row));
        for cell in cells {
            out.push_str(cell.display_cell());
        }
        out.push('\n');
    }
    out
}

/// Print grid header with size and selection count
pub fn print_grid_header(model_index: usize, grid: &ShapeGrid) {
    println!();
    println!(
        "=== SHAPE GRID - MODEL {} ({} x {}) ===",
        model_index,
        grid.rows(),
        grid.cols()
    );
    println!("{}", format_selection_summary(grid));
}

/// `Selected cells: N / TOTAL`
pub fn format_selection_summary(grid: &ShapeGrid) -> String {
    format!(
        "Selected cells: {} / {}",
        grid.selected_count(),
        grid.config().cell_count()
    )
}

/// Print the grid to stdout, selected cells highlighted
pub fn print_colored_grid(grid: &ShapeGrid, use_color: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(stdout, Print(format_column_headers(grid.cols())), Print("\n"))?;

    for (row, cells) in grid.cells().iter().enumerate() {
        queue!(stdout, Print(format_row_prefix(row)))?;
        for cell in cells {
            if use_color && cell.is_selected() {
                queue!(
                    stdout,
                    SetForegroundColor(Color::Blue),
                    Print(cell.display_cell()),
                    ResetColor
                )?;
            } else {
                queue!(stdout, Print(cell.display_cell()))?;
            }
        }
        queue!(stdout, Print("\n"))?;
    }

    stdout.flush()
}
