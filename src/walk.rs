//! @ai:module:intent Expand a file, directory or glob argument into Go files
//! @ai:module:layer infrastructure
//! @ai:module:public_api resolve_paths, is_go_file
//! @ai:module:depends_on error

use crate::error::{Error, Result};
use glob::{glob_with, MatchOptions};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// @ai:intent Check if a path names a Go source file
/// @ai:effects pure
pub fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// @ai:intent Resolve a command-line path argument into a sorted list of files
/// @ai:post a plain file is returned as is; directories yield their `.go` files
/// @ai:edge_cases a missing path or a glob without matches yields an empty list
/// @ai:effects fs:read
pub fn resolve_paths(pattern: &str, skip_dirs: &[String]) -> Result<Vec<PathBuf>> {
    if !has_glob_meta(pattern) {
        let path = Path::new(pattern);
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }
        if path.is_dir() {
            return Ok(walk(path, skip_dirs)
                .filter(|p| is_go_file(p))
                .collect());
        }
        return Ok(Vec::new());
    }

    expand_glob(pattern, skip_dirs)
}

fn expand_glob(pattern: &str, skip_dirs: &[String]) -> Result<Vec<PathBuf>> {
    // Hidden directories only match when the pattern spells out their dot.
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let matches = glob_with(pattern, options).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let named: Vec<&str> = pattern.split(['/', '\\']).collect();
    let mut files = Vec::new();
    for entry in matches {
        match entry {
            Ok(path) => {
                if path.is_file() && !in_skipped_dir(&path, skip_dirs, &named) {
                    files.push(path);
                }
            }
            Err(e) => tracing::warn!("Skipping unreadable glob match: {}", e),
        }
    }

    files.sort();
    Ok(files)
}

/// A match is dropped when it sits under a skipped directory the pattern does not name.
fn in_skipped_dir(path: &Path, skip_dirs: &[String], named: &[&str]) -> bool {
    path.parent().is_some_and(|parent| {
        parent.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            skip_dirs.iter().any(|d| *d == name) && !named.contains(&name.as_ref())
        })
    })
}

fn walk<'a>(root: &Path, skip_dirs: &'a [String]) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| !is_skipped_dir(e, skip_dirs))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(DirEntry::into_path)
}

fn is_skipped_dir(entry: &DirEntry, skip_dirs: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || skip_dirs.iter().any(|d| *d == name)
}
