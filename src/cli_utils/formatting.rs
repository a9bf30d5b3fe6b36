use colored::Colorize;

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect()
}

fn join_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| format!("{:width$}", cell, width = widths.get(i).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render a padded text table, header first
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let widths = column_widths(headers, rows);
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let header_line = join_row(&header_cells, &widths);

    let mut lines = vec![header_line.clone(), "-".repeat(header_line.chars().count())];
    lines.extend(rows.iter().map(|row| join_row(row, &widths)));
    lines
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) {
    for (i, line) in render_table(headers, rows).into_iter().enumerate() {
        if i == 0 {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
}

pub fn print_header(text: &str) {
    println!();
    println!("{}", text.bold().bright_cyan());
    println!("{}", "=".repeat(text.len()));
    println!();
}
