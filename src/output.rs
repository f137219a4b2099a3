//! @ai:module:intent Format run reports for different outputs (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_run_report
//! @ai:module:depends_on report
//! @ai:module:stateless true

use crate::report::{ChangeKind, FieldChange, RunReport};
use colored::Colorize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a run report as a string
/// @ai:effects pure
pub fn format_run_report(report: &RunReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Text => format_run_report_text(report),
    }
}

/// @ai:intent Format a run report as human-readable text
/// @ai:effects pure
fn format_run_report_text(report: &RunReport) -> String {
    let mut output = String::new();

    for file in &report.files {
        if let Some(error) = &file.error {
            output.push_str(&format!(
                "{} {}\n",
                "ERROR".red().bold(),
                error
            ));
            continue;
        }

        if file.changes.is_empty() && file.warnings.is_empty() {
            continue;
        }

        let status = if file.written {
            "updated".green()
        } else {
            "would update".yellow()
        };
        output.push_str(&format!(
            "{} ({})\n",
            file.path.display().to_string().bold(),
            status
        ));

        for change in &file.changes {
            output.push_str(&format_change(change));
        }

        for warning in &file.warnings {
            output.push_str(&format!("  {} {}\n", "warn:".yellow(), warning));
        }
    }

    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&format!(
        "Scanned {} files, {} fields changed in {} files\n",
        report.files_scanned, report.fields_changed, report.files_changed
    ));

    if report.failures > 0 {
        output.push_str(&format!(
            "{} files failed\n",
            report.failures.to_string().red().bold()
        ));
    } else if !report.has_changes() {
        output.push_str(&format!("{} All tags up to date\n", "OK".green().bold()));
    }

    output
}

fn format_change(change: &FieldChange) -> String {
    let field = match &change.struct_name {
        Some(name) => format!("{}.{}", name, change.field),
        None => change.field.clone(),
    };
    let location = format!("line {}", change.line);

    let detail = match change.kind {
        ChangeKind::Added => format!(
            "{} {}",
            "+".green(),
            change.new_tag.as_deref().unwrap_or_default()
        ),
        ChangeKind::Removed => format!(
            "{} {}",
            "-".red(),
            change.old_tag.as_deref().unwrap_or_default().dimmed()
        ),
        ChangeKind::Updated => format!(
            "{} -> {}",
            change.old_tag.as_deref().unwrap_or_default().dimmed(),
            change.new_tag.as_deref().unwrap_or_default()
        ),
    };

    format!("  {} ({}) {}\n", field.cyan(), location.dimmed(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FileReport;
    use std::path::PathBuf;

    fn sample() -> RunReport {
        let mut report = RunReport::default();
        report.push(FileReport {
            path: PathBuf::from("models.go"),
            changes: vec![FieldChange {
                struct_name: Some("User".to_string()),
                field: "UserID".to_string(),
                line: 4,
                kind: ChangeKind::Added,
                old_tag: None,
                new_tag: Some("`json:\"user_id\"`".to_string()),
            }],
            written: true,
            ..Default::default()
        });
        report
    }

    #[test]
    fn test_text_report_lists_changes() {
        colored::control::set_override(false);
        let text = format_run_report(&sample(), OutputFormat::Text);
        assert!(text.contains("models.go (updated)"));
        assert!(text.contains("User.UserID (line 4) + `json:\"user_id\"`"));
        assert!(text.contains("Scanned 1 files, 1 fields changed in 1 files"));
    }

    #[test]
    fn test_json_report() {
        let json = format_run_report(&sample(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fields_changed"], 1);
        assert_eq!(value["files"][0]["changes"][0]["kind"], "added");
    }
}
