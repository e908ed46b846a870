//! Cleaning and feature-transform summaries

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{CleaningSummary, DistributionShape, FeatureSummary, IqrBounds};

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

// Indent the table
fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn print_section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { Color::Yellow })
}

/// Null count per column
pub fn display_missing_counts(title: &str, counts: &[(String, usize)]) {
    print_section("🕳️", title);
    let mut table = new_table(&["Column", "Missing"]);
    for (name, count) in counts {
        table.add_row(vec![Cell::new(name), count_cell(*count)]);
    }
    print_indented(&table);
}

/// Column types in table order
pub fn display_dtypes(listing: &[(String, String)]) {
    print_section("🔤", "COLUMN TYPES");
    let mut table = new_table(&["Column", "Type"]);
    for (name, dtype) in listing {
        table.add_row(vec![Cell::new(name), Cell::new(dtype).fg(Color::Cyan)]);
    }
    print_indented(&table);
}

fn fmt_shape(shape: (usize, usize)) -> String {
    format!("{} rows × {} columns", shape.0, shape.1)
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "n/a".to_string())
}

/// Row and column changes made while cleaning
pub fn display_cleaning_summary(summary: &CleaningSummary) {
    print_section("📋", "CLEANING SUMMARY");

    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("📁 Initial shape"), Cell::new(fmt_shape(summary.initial_shape))]);
    table.add_row(vec![
        Cell::new("🗑️  Columns dropped"),
        count_cell(summary.dropped_columns.len()),
    ]);
    table.add_row(vec![
        Cell::new("📍 Rows without coordinates"),
        count_cell(summary.rows_missing_coordinates),
    ]);
    for (column, unparsed) in &summary.unparsed_amounts {
        table.add_row(vec![
            Cell::new(format!("💲 Unparsed '{}' amounts", column)),
            count_cell(*unparsed),
        ]);
    }
    table.add_row(vec![Cell::new("📅 Unparsed dates"), count_cell(summary.unparsed_dates)]);
    table.add_row(vec![
        Cell::new("⏭️  Future dates cleared"),
        count_cell(summary.future_dates_reset),
    ]);
    table.add_row(vec![
        Cell::new("👯 Duplicates removed"),
        count_cell(summary.duplicates_removed),
    ]);
    table.add_row(vec![
        Cell::new("🔁 Residual duplicates"),
        Cell::new(summary.residual_duplicates).fg(if summary.residual_duplicates == 0 {
            Color::Green
        } else {
            Color::Red
        }),
    ]);
    table.add_row(vec![
        Cell::new("✅ Final shape"),
        Cell::new(fmt_shape(summary.final_shape))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    print_indented(&table);

    if !summary.dropped_columns.is_empty() {
        println!();
        println!(
            "      {} {}:",
            style("Dropped columns").yellow(),
            style(format!("({})", summary.dropped_columns.len())).dim()
        );
        for name in &summary.dropped_columns {
            println!("        {} {}", style("•").dim(), name);
        }
    }
}

/// Skewness and kurtosis before capping
pub fn display_shapes(shapes: &[DistributionShape]) {
    print_section("📈", "DISTRIBUTION SHAPE");
    let mut table = new_table(&["Column", "Skewness", "Kurtosis"]);
    for shape in shapes {
        let color = if shape.is_skewed() { Color::Yellow } else { Color::White };
        table.add_row(vec![
            Cell::new(&shape.column),
            Cell::new(fmt_opt(shape.skewness)).fg(color),
            Cell::new(fmt_opt(shape.kurtosis)).fg(color),
        ]);
    }
    print_indented(&table);
}

/// Quartiles and bounds used for capping
pub fn display_bounds(bounds: &[IqrBounds]) {
    print_section("✂️", "OUTLIER CAPPING (IQR)");
    let mut table = new_table(&["Column", "Q1", "Q3", "Lower", "Upper", "Capped"]);
    for b in bounds {
        table.add_row(vec![
            Cell::new(&b.column),
            Cell::new(format!("{:.4}", b.q1)),
            Cell::new(format!("{:.4}", b.q3)),
            Cell::new(format!("{:.4}", b.lower)),
            Cell::new(format!("{:.4}", b.upper)),
            count_cell(b.capped),
        ]);
    }
    print_indented(&table);
}

/// Everything the feature transform stage fitted
pub fn display_feature_summary(summary: &FeatureSummary) {
    display_shapes(&summary.shapes);
    display_bounds(&summary.bounds);

    print_section("🧮", "ENCODING & SCALING");
    let mut table = new_table(&["Step", "Columns"]);
    table.add_row(vec![
        Cell::new("One-hot indicators"),
        Cell::new(summary.indicators.len()),
    ]);
    table.add_row(vec![
        Cell::new("Min-max scaled"),
        Cell::new(names(summary.min_max.iter().map(|p| p.column.as_str()))),
    ]);
    table.add_row(vec![
        Cell::new("Standardized"),
        Cell::new(names(summary.standardized.iter().map(|p| p.column.as_str()))),
    ]);
    table.add_row(vec![
        Cell::new("Booleans → 0/1"),
        Cell::new(summary.converted_booleans.len()),
    ]);
    print_indented(&table);
}

fn names<'a>(iter: impl Iterator<Item = &'a str>) -> String {
    iter.collect::<Vec<_>>().join(", ")
}
