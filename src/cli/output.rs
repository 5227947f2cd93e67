//! Output formatting for CLI

use crate::analysis::AccuracySummary;

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

/// Format a ratio as a percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print one accuracy line, e.g. `training: 20/32 (62.5%, p=0.1077)`
pub fn print_accuracy(summary: &AccuracySummary) {
    print_kv(
        &summary.label,
        &format!(
            "{}/{} ({}, p={:.4})",
            summary.correct,
            summary.rounds,
            format_percent(summary.accuracy),
            summary.p_value
        ),
    );
}
