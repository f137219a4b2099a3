//! @ai:module:intent Apply synthesized tags to Go source files
//! @ai:module:layer application
//! @ai:module:public_api RewriteOptions, Rewritten, rewrite_source, rewrite_file, rewrite_files
//! @ai:module:depends_on parser, engine, report, gofmt, error
//! @ai:module:stateless true

use crate::engine::{synthesize, FieldContext, Rewrite, Warning};
use crate::error::{Error, Result};
use crate::parser::{parse_source, Field, Node, StructType};
use crate::report::{ChangeKind, FieldChange, FileReport, RunReport};
use crate::request::TagRequest;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// @ai:intent Everything that decides how fields are rewritten
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub requests: Vec<TagRequest>,
    pub remove: bool,
    /// Also rewrite struct types declared inside other structs' fields
    pub nested: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            remove: false,
            nested: true,
        }
    }
}

/// @ai:intent Rewritten source text and what changed in it
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub source: String,
    pub changes: Vec<FieldChange>,
    pub warnings: Vec<Warning>,
}

struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// @ai:intent Rewrite the tags of every struct field in a source string
/// @ai:pre src is syntactically valid Go
/// @ai:post bytes outside the edited tag spans are unchanged
/// @ai:post fields whose tag would not change produce no edit
/// @ai:idempotent true
/// @ai:effects pure
pub fn rewrite_source(src: &str, options: &RewriteOptions) -> Result<Rewritten> {
    let mut edits = Vec::new();
    let mut changes = Vec::new();
    let mut warnings = Vec::new();

    for node in parse_source(src)? {
        match node {
            Node::Struct(record) if record.depth > 0 && !options.nested => {
                tracing::debug!("Skipping nested struct at line {}", record.line);
            }
            Node::Struct(record) => {
                for field in &record.fields {
                    if let Some((edit, change)) =
                        rewrite_field(&record, field, options, &mut warnings)
                    {
                        edits.push(edit);
                        changes.push(change);
                    }
                }
            }
            Node::Other { keyword, line } => {
                tracing::debug!("Skipping `{}` declaration at line {}", keyword, line);
            }
        }
    }

    Ok(Rewritten {
        source: apply_edits(src, edits),
        changes,
        warnings,
    })
}

/// @ai:intent Turn the engine's decision for one field into a source edit
/// @ai:effects pure
fn rewrite_field(
    record: &StructType,
    field: &Field,
    options: &RewriteOptions,
    warnings: &mut Vec<Warning>,
) -> Option<(Edit, FieldChange)> {
    let context = FieldContext {
        identifier: field.identifier(),
        current_tag: field.tag.as_ref().map(|t| t.text.as_str()),
        type_description: &field.type_text,
    };

    let synthesis = synthesize(&context, &options.requests, options.remove);
    warnings.extend(synthesis.warnings);

    let (edit, new_tag) = match (synthesis.rewrite, &field.tag) {
        (Rewrite::Skip, _) => {
            tracing::debug!(
                "Leaving field `{}` at line {} untouched",
                field.identifier().unwrap_or("<embedded>"),
                field.line
            );
            return None;
        }
        (Rewrite::Remove, None) => return None,
        (Rewrite::Remove, Some(tag)) => (
            Edit {
                range: field.type_end..tag.span.end,
                replacement: String::new(),
            },
            None,
        ),
        (Rewrite::Replace(raw), Some(tag)) if tag.text == raw => return None,
        (Rewrite::Replace(raw), Some(tag)) => (
            Edit {
                range: tag.span.clone(),
                replacement: raw.clone(),
            },
            Some(raw),
        ),
        (Rewrite::Replace(raw), None) => (
            Edit {
                range: field.type_end..field.type_end,
                replacement: format!(" {raw}"),
            },
            Some(raw),
        ),
    };

    let old_tag = field.tag.as_ref().map(|t| t.text.clone());
    let change = FieldChange {
        struct_name: record.name.clone(),
        field: field.names.join(", "),
        line: field.line,
        kind: ChangeKind::between(old_tag.as_deref(), new_tag.as_deref()),
        old_tag,
        new_tag,
    };

    Some((edit, change))
}

fn apply_edits(src: &str, mut edits: Vec<Edit>) -> String {
    let mut out = src.to_string();
    edits.sort_by_key(|e| std::cmp::Reverse(e.range.start));
    for edit in edits {
        out.replace_range(edit.range, &edit.replacement);
    }
    out
}

/// @ai:intent Rewrite one file, writing it back only when something changed
/// @ai:pre path exists and is readable
/// @ai:effects fs:read, fs:write
pub fn rewrite_file(path: &Path, options: &RewriteOptions, write: bool) -> Result<FileReport> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rewritten = rewrite_source(&content, options).map_err(|e| e.in_file(path))?;

    let mut warnings: Vec<String> = Vec::new();
    for warning in &rewritten.warnings {
        let message = warning.to_string();
        if !warnings.contains(&message) {
            tracing::warn!("{}: {}", path.display(), message);
            warnings.push(message);
        }
    }

    let written = write && !rewritten.changes.is_empty();
    if written {
        std::fs::write(path, &rewritten.source).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(
            "Rewrote {} field tags in {}",
            rewritten.changes.len(),
            path.display()
        );
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        changes: rewritten.changes,
        warnings,
        written,
        error: None,
    })
}

/// @ai:intent Rewrite many files, collecting per-file failures instead of stopping
/// @ai:effects fs:read, fs:write, process
pub fn rewrite_files(
    paths: &[PathBuf],
    options: &RewriteOptions,
    write: bool,
    gofmt: bool,
) -> RunReport {
    let mut report = RunReport::default();

    for path in paths {
        match rewrite_file(path, options, write) {
            Ok(mut file_report) => {
                if gofmt && file_report.written {
                    if let Err(e) = crate::gofmt::format_file(path) {
                        tracing::warn!("{}", e);
                        file_report.warnings.push(e.to_string());
                    }
                }
                report.push(file_report);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                report.push(FileReport::failed(path.clone(), e.to_string()));
            }
        }
    }

    report
}
