// Copyright 2026 Dropbox (created by Andrew Yates <ayates@dropbox.com>)
use colored::Colorize;
use dashtriage::analyzer::AnalysisReport;
use dashtriage::recommend::Priority;

/// Print error message
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "ERROR:".bright_red().bold(), msg);
}

/// Print warning message
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "WARNING:".bright_yellow().bold(), msg);
}

/// Print success message
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".bright_green().bold(), msg);
}

/// Print info message
pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".bright_blue().bold(), msg);
}

/// Colored console rendering of an analysis outcome.
pub fn print_analysis(analysis: &AnalysisReport) {
    let summary = &analysis.summary;
    print_info(&format!(
        "analyzed {} comparisons from {} source expectations and recorded failures",
        summary.total_comparisons,
        analysis.source_expectations.len(),
    ));

    if !analysis.has_mismatches() {
        print_success("no mismatches found");
        return;
    }

    println!(
        "{} {} mismatches ({} patterns)",
        "✗".bright_red().bold(),
        summary.total_mismatches(),
        analysis.patterns.len(),
    );
    for pattern in analysis.patterns.iter().take(10) {
        println!(
            "  {:>4}x [{}] {} => {}",
            pattern.count,
            pattern.category.to_string().bright_yellow(),
            pattern.expected.dimmed(),
            pattern.received.dimmed(),
        );
    }

    for rec in &analysis.recommendations {
        let tag = match rec.priority {
            Priority::High => "HIGH".bright_red().bold(),
            Priority::Medium => "MEDIUM".bright_yellow().bold(),
            Priority::Low => "LOW".bright_blue().bold(),
        };
        println!("  [{tag}] {} - {}", rec.issue, rec.details);
    }
}
