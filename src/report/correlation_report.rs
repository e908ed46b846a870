//! Ranked correlation tables

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{CorrelationAnalysis, CorrelationSign, TargetCorrelation};

/// `feature: 0.1234 (Positive)`
pub fn format_correlation(entry: &TargetCorrelation) -> String {
    format!(
        "{}: {:.4} ({})",
        entry.feature,
        entry.correlation,
        entry.sign()
    )
}

fn ranking_table(entries: &[TargetCorrelation]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Correlation").add_attribute(Attribute::Bold),
        Cell::new("Sign").add_attribute(Attribute::Bold),
    ]);

    for (i, entry) in entries.iter().enumerate() {
        let color = match entry.sign() {
            CorrelationSign::Positive => Color::Green,
            CorrelationSign::Negative => Color::Red,
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.feature),
            Cell::new(format!("{:.4}", entry.correlation)).fg(color),
            Cell::new(entry.sign()).fg(color),
        ]);
    }
    table
}

fn print_ranking(indent: &str, entries: &[TargetCorrelation]) {
    for line in ranking_table(entries).to_string().lines() {
        println!("{}{}", indent, line);
    }
}

/// Overall ranking followed by one table per subgroup
pub fn display_correlation_analysis(analysis: &CorrelationAnalysis, target: &str, subgroup_source: &str) {
    println!();
    println!(
        "    {} {}",
        style("🔗").cyan(),
        style(format!(
            "TOP {} CORRELATIONS WITH '{}' (ABSOLUTE VALUE)",
            analysis.overall.len(),
            target
        ))
        .white()
        .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    if analysis.overall.is_empty() {
        println!("      {}", style("No defined correlations with the target").dim());
    } else {
        print_ranking("    ", &analysis.overall);
    }

    if !analysis.has_subgroups {
        println!();
        println!(
            "    {}",
            style(format!(
                "No one-hot encoded columns for '{}' found. Skipping subgroup analysis.",
                subgroup_source
            ))
            .yellow()
        );
        return;
    }

    for subgroup in &analysis.subgroups {
        println!();
        println!(
            "      {} {} {}",
            style("Top correlations in").white().bold(),
            style(&subgroup.group).cyan().bold(),
            style(format!("({} rows)", subgroup.rows)).dim()
        );
        print_ranking("      ", &subgroup.correlations);
    }
}
