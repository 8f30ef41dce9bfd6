//! Output formatting for CLI

use crate::grid::Grid;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render the grid as a text map with `*` on the interior cells of `path`.
pub fn render_path(grid: &Grid, path: &[usize]) -> String {
    let interior = if path.len() > 2 {
        &path[1..path.len() - 1]
    } else {
        &[]
    };
    let mut out = String::with_capacity(grid.len() + grid.height());
    for (index, cell) in grid.cells().iter().enumerate() {
        if index > 0 && index % grid.width() == 0 {
            out.push('\n');
        }
        if interior.contains(&index) {
            out.push('*');
        } else {
            out.push(cell.to_char());
        }
    }
    out
}
