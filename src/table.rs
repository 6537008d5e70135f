// Table rendering for query results. Layout math (column widths, padding)
// is done here with Unicode-aware display widths; callers pass cells as
// plain strings, with NULL columns already mapped to "".

use unicode_width::UnicodeWidthStr;

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

/// Render a header row, a dash separator and the data rows as a
/// left-aligned table. Each column is as wide as its widest cell (display
/// width, not byte length); trailing spaces are trimmed from every line.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            out.push_str(COLUMN_GAP);
        }
        out.push_str(cell);
        for _ in cell.width()..*width {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
