//! History table rendering.

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};

use crate::domain::models::TaskRecord;

const TASK_PREVIEW_CHARS: usize = 48;

/// Render a compact listing of past runs.
pub fn format_history_table(records: &[TaskRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Task", "Created", "Duration"]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(truncate(&record.task, TASK_PREVIEW_CHARS)),
            Cell::new(record.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(format!("{:.2}s", record.completion_time)),
        ]);
    }

    table.to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{prefix}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_contains_row_data() {
        let record = TaskRecord::new("summarize the report");
        let rendered = format_history_table(std::slice::from_ref(&record));
        assert!(rendered.contains(&record.id));
        assert!(rendered.contains("summarize the report"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 48), "short");
        let long = "x".repeat(60);
        let truncated = truncate(&long, 48);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 51);
    }
}
