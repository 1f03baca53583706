//! Pretty output formatting.

use movies_core::document::Item;
use movies_core::movies::BulkLoadReport;
use movies_core::store::{ItemsOutput, TableDescription};
use serde_json::Value;

/// Format a movie for display.
pub fn format_item(item: &Item) -> String {
    let year = item.get("year").map(Value::to_string).unwrap_or_default();
    let title = item.get("title").and_then(Value::as_str).unwrap_or("?");
    let mut output = format!("{title} ({year})");
    if let Some(Value::Object(info)) = item.get("info") {
        for (key, value) in info {
            output.push_str(&format!("\n  {key}: {}", format_value(value)));
        }
    }
    output
}

/// Format the attributes returned by a write.
pub fn format_attributes(attributes: Option<&Item>) -> String {
    match attributes {
        None => "No attributes returned.".to_string(),
        Some(attributes) => attributes
            .iter()
            .map(|(key, value)| format!("{key}: {}", format_value(value)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format query or scan results for display.
pub fn format_items(output: &ItemsOutput) -> String {
    if output.items.is_empty() {
        return format!("No movies found (scanned {}).", output.scanned_count);
    }
    let mut output_text = format!(
        "MOVIES ({} of {} scanned)\n",
        output.count, output.scanned_count
    );
    output_text.push_str(&"-".repeat(40));
    for item in &output.items {
        output_text.push_str(&format!("\n{}", format_item(item)));
        output_text.push('\n');
    }
    output_text
}

/// Format a table description for display.
pub fn format_table(table: &TableDescription) -> String {
    let keys = table
        .key_schema
        .iter()
        .map(|k| format!("{} ({:?})", k.attribute_name, k.key_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} [{:?}]\n  Keys: {}\n  Throughput: {} read / {} write",
        table.table_name,
        table.table_status,
        keys,
        table.provisioned_throughput.read_capacity_units,
        table.provisioned_throughput.write_capacity_units
    )
}

/// Format a bulk load report for display.
pub fn format_report(report: &BulkLoadReport) -> String {
    let mut output = format!(
        "{}: {} of {} movies loaded",
        report.message, report.succeeded, report.total
    );
    for failed in &report.failed {
        output.push_str(&format!(
            "\n  FAILED {} ({}): {}",
            failed.title, failed.year, failed.message
        ));
    }
    output
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(values) => values
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
