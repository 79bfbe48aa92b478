//! Shared helpers for the line-oriented (`.jsonl`) log formats

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub(crate) const LOG_EXTENSION: &str = "jsonl";

/// Recursively find all `.jsonl` files under a root, in sorted path order
pub(crate) fn find_log_files(root: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*.{LOG_EXTENSION}", root.display());
    let mut files = Vec::new();
    match glob::glob(&pattern) {
        Ok(entries) => {
            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(err) => debug!(%err, "skipping unreadable path"),
                }
            }
        }
        Err(err) => debug!(%pattern, %err, "invalid glob pattern"),
    }
    files.sort();
    files
}

/// Read a whole log file; invalid UTF-8 is replaced rather than rejected
pub(crate) fn read_log(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            debug!(file = %path.display(), %err, "failed to read log file");
            None
        }
    }
}

/// Decode every non-blank line, skipping lines that fail to decode
pub(crate) fn decode_lines<'a, T>(content: &'a str, path: &'a Path) -> impl Iterator<Item = T> + 'a
where
    T: DeserializeOwned + 'a,
{
    content
        .lines()
        .enumerate()
        .filter_map(move |(idx, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            match serde_json::from_str(trimmed) {
                Ok(value) => Some(value),
                Err(err) => {
                    debug!(file = %path.display(), line = idx + 1, %err, "invalid JSON line");
                    None
                }
            }
        })
}

/// Keep only non-blank strings
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
