//! Input collection and linking.
//!
//! Directories are walked for `.ts` files; everything is concatenated into
//! one source, each file behind a `/* <file name> */` header line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["out", "node_modules"];

/// Expand `inputs` into a list of files. Files are taken as given;
/// directories contribute their `.ts` files in file-name order.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }
        let walker = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("cannot access path: {e}");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_typescript(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    debug!(count = files.len(), "collected sources");
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_typescript(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("ts")
}

/// Read and concatenate `files`. With `header`, each file is preceded by a
/// `/* <file name> */` line.
pub fn link_sources(files: &[PathBuf], header: bool) -> Result<String> {
    let mut linked = String::new();
    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if header {
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            linked.push_str(&format!("/* {name} */\n"));
        }
        linked.push_str(&text);
    }
    Ok(linked)
}
