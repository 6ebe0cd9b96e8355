use colored::*;
use keys_core::ValidationReport;
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, title: &str, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report, title),
    }
}

fn print_text_report(report: &ValidationReport, title: &str) {
    println!("\n{}", "═".repeat(60));
    println!("  {}", title.to_uppercase().bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!("\n{} {}", "✓".green().bold(), "Check PASSED".green().bold());
    } else {
        println!("\n{} {}", "✗".red().bold(), "Check FAILED".red().bold());
    }

    if !report.violations.is_empty() {
        println!("\n{}", "Violations:".red().bold());
        for violation in &report.violations {
            println!(
                "  row {}: {}",
                violation.row_index,
                violation.message.red()
            );
        }
    }

    let dropped = report.stats.violations_found - report.violations.len();
    if dropped > 0 {
        println!(
            "\n{}",
            format!("{} more violation(s) not shown", dropped).yellow()
        );
    }

    println!("\n{}", "Summary:".bold());
    println!("  Rows checked:     {}", report.stats.records_checked);
    if report.stats.reference_records > 0 {
        println!("  Reference rows:   {}", report.stats.reference_records);
    }
    println!("  Violations:       {}", report.stats.violations_found);
    println!("  Duration:         {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) {
    let output = json!({
        "passed": report.passed,
        "violations": report
            .violations
            .iter()
            .map(|v| json!({
                "row": v.row_index,
                "kind": v.kind,
                "field": v.field_name,
                "message": v.message,
                "value": v.value,
            }))
            .collect::<Vec<_>>(),
        "summary": {
            "rows_checked": report.stats.records_checked,
            "reference_rows": report.stats.reference_records,
            "violation_count": report.stats.violations_found,
            "duration_ms": report.stats.duration_ms,
        }
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(err) => print_error(&format!("Failed to render JSON report: {}", err)),
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
