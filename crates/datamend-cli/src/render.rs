//! Terminal rendering helpers for workflow output.

use colored::{ColoredString, Colorize};

use datamend_core::file::{Row, UploadedFile};
use datamend_core::format::{format_file_size, format_relative_time, group_thousands};
use datamend_core::modification::confidence_level;

/// Cells wider than this are cut so tables stay readable.
const MAX_CELL_WIDTH: usize = 32;

/// Renders a JSON cell value the way the backend meant it to read.
pub fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    format!("{clipped}…")
}

/// Prints rows as a padded table in the backend's column order.
///
/// Columns missing from a row render as empty cells.
pub fn print_table(columns: &[String], rows: &[Row]) {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| clip(&row.get(column).map(|v| cell_text(v)).unwrap_or_default()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(widths.iter().copied())
        .map(|(column, width)| format!("{column:width$}"))
        .collect();
    println!("  {}", header.join("  ").bold());

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:width$}"))
            .collect();
        println!("  {}", line.join("  "));
    }
}

/// One-line summary of an uploaded file record.
pub fn file_summary(file: &UploadedFile) -> String {
    let columns = file
        .headers
        .as_ref()
        .map(|headers| headers.len().to_string())
        .unwrap_or_else(|| "?".to_string());
    let rows = file
        .row_count
        .map(group_thousands)
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{} ({}, {} columns, {} rows, uploaded {})",
        file.name,
        format_file_size(file.file_size),
        columns,
        rows,
        format_relative_time(&file.uploaded_at),
    )
}

/// Colors text according to a confidence style tag.
pub fn paint(text: &str, style_tag: &str) -> ColoredString {
    match style_tag {
        "green" => text.green(),
        "yellow" => text.yellow(),
        _ => text.red(),
    }
}

/// Confidence rendered as `high (92%)`, colored by bucket.
pub fn confidence_text(confidence: f64) -> ColoredString {
    let level = confidence_level(confidence);
    paint(
        &format!("{} ({}%)", level.category.as_str(), level.percentage),
        level.style_tag,
    )
}
