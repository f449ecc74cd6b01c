/// Cells fill column by column and wrap after this many rows, so index `i`
/// sits at row `i % 10`, column `i / 10`.
const GRID_ROWS: usize = 10;

pub fn print_grid(values: &[i32], active: Option<(usize, usize)>) {
    for line in grid_lines(values, active) {
        println!("{line}");
    }
    println!();
}

pub fn grid_lines(values: &[i32], active: Option<(usize, usize)>) -> Vec<String> {
    if values.is_empty() {
        return Vec::new();
    }

    let columns = values.len().div_ceil(GRID_ROWS);
    let rows = GRID_ROWS.min(values.len());
    let mut lines = Vec::with_capacity(rows);

    for row in 0..rows {
        let mut line = String::new();
        for col in 0..columns {
            let index = col * GRID_ROWS + row;
            if index >= values.len() {
                continue;
            }
            let marked = matches!(active, Some((a, b)) if index == a || index == b);
            if marked {
                line.push_str(&format!("[{:>4}]", values[index]));
            } else {
                line.push_str(&format!(" {:>4} ", values[index]));
            }
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}
