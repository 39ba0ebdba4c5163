//! Report rendering for one-shot roasts.
//!
//! Turns a [`RoastResult`] into terminal text, Markdown or JSON.

use crate::models::{CategoryScores, RoastResult};
use anyhow::Result;
use std::path::Path;

/// Generate a plain-text report for the terminal.
pub fn generate_text_report(result: &RoastResult) -> String {
    let verdict = result.verdict();
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}/100 - {}\n",
        verdict.emoji(),
        result.score,
        verdict.label()
    ));
    output.push_str(&format!("{}\n\n", result.url));

    output.push_str("🔥 THE ROAST\n");
    output.push_str(&format!("\"{}\"\n\n", result.roast));

    for (category, score) in result.metrics.iter() {
        output.push_str(&format!("  {:<15} {:>3}\n", category.to_string(), score));
    }

    if !result.burns.is_empty() {
        output.push_str("\n🔥 Burns:\n");
        for burn in &result.burns {
            output.push_str(&format!("  • {}\n", burn));
        }
    }

    if !result.compliments.is_empty() {
        output.push_str("\n✨ Silver Linings:\n");
        for compliment in &result.compliments {
            output.push_str(&format!("  • {}\n", compliment));
        }
    }

    output.push_str(&format!("\n{}\n", result.share_text()));
    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(result: &RoastResult) -> String {
    let verdict = result.verdict();
    let mut output = String::new();

    output.push_str("# Roast Report\n\n");
    output.push_str(&format!("- **Site:** {}\n", result.url));
    output.push_str(&format!(
        "- **Score:** {}/100 {} {}\n\n",
        result.score,
        verdict.emoji(),
        verdict.label()
    ));

    output.push_str("## The Roast\n\n");
    output.push_str(&format!("> {}\n\n", result.roast));

    output.push_str(&generate_metrics_section(&result.metrics));
    output.push_str(&generate_list_section("🔥 Burns", &result.burns));
    output.push_str(&generate_list_section("✨ Silver Linings", &result.compliments));

    output.push_str("---\n\n");
    output.push_str(&format!("*{}*\n", result.share_text()));

    output
}

/// Generate the metrics table.
fn generate_metrics_section(metrics: &CategoryScores) -> String {
    let mut section = String::new();

    section.push_str("## Metrics\n\n");
    section.push_str("| Category | Score |\n");
    section.push_str("|----------|------:|\n");
    for (category, score) in metrics.iter() {
        section.push_str(&format!("| {} | {} |\n", category, score));
    }
    section.push('\n');

    section
}

fn generate_list_section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut section = format!("## {}\n\n", title);
    for item in items {
        section.push_str(&format!("- {}\n", item));
    }
    section.push('\n');
    section
}

/// Generate a JSON report, identical in shape to the HTTP response.
pub fn generate_json_report(result: &RoastResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write a rendered report to disk.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
