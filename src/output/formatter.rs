use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::grades::{Average, FieldError, ResultRecord};

/// Format a record for display
/// Format: one "Student N: <score>" line per slot, then "Average: <value>"
pub fn format_result(record: &ResultRecord) -> String {
    format_result_colored(record, false)
}

/// Same layout as `format_result`, with the average highlighted when colors are on
pub fn format_result_colored(record: &ResultRecord, use_colors: bool) -> String {
    let mut lines: Vec<String> = record
        .scores()
        .iter()
        .enumerate()
        .map(|(i, score)| format!("Student {}: {}", i + 1, score))
        .collect();

    let average = record.average();
    let average_line = if use_colors {
        match average {
            Average::None => format!("Average: {}", average.dimmed()),
            Average::Mean(_) => format!("Average: {}", average.bold().green()),
        }
    } else {
        format!("Average: {}", average)
    };
    lines.push(average_line);

    lines.join("\n")
}

/// Format a record as one CSV row (no line terminator)
/// Columns: padded scores, then the average
pub fn format_csv_row(record: &ResultRecord) -> String {
    record.fields().join(",")
}

/// Format field errors one per line as "<field>: <message>"
pub fn format_field_errors(errors: &[FieldError], use_colors: bool) -> String {
    errors
        .iter()
        .map(|e| {
            if use_colors {
                format!("{}: {}", e.field.bold(), e.error.red())
            } else {
                e.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if stdout is a TTY and NO_COLOR is unset (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
