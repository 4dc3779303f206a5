//! File discovery and filtering for elmscope.

use std::collections::HashSet;
use std::time::Instant;

use ignore::WalkBuilder;
use tracing::info;

use elmscope_error::{Error, ErrorKind, Result};

use crate::options::InputOptions;

/// Extensions of tree files: S-expression notation and JSON dumps.
pub const TREE_EXTENSIONS: &[&str] = &["sexp", "json"];

pub const ELM_EXTENSIONS: &[&str] = &["elm"];

/// Directories to skip during file discovery.
fn should_skip_dir(name: &str) -> bool {
    matches!(
        name,
        // Elm package cache
        "elm-stuff"
            // Build output directories
            | "target"
            | "build"
            | "dist"
            // Vendor/dependency directories
            | "vendor"
            | "node_modules"
    )
}

/// Discover files matching any of the given extensions.
///
/// Explicit `input.files` are kept as given, in order and before anything
/// found by walking `input.dirs`. Duplicates are dropped.
pub fn discover_files(input: &InputOptions, extensions: &[&str]) -> Result<Vec<String>> {
    let discovery_start = Instant::now();

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    let mut add_path = |path: String| {
        if seen.insert(path.clone()) {
            files.push(path);
        }
    };

    for file in &input.files {
        add_path(file.clone());
    }

    for dir in &input.dirs {
        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(true)
            .follow_links(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                // Always include root
                if entry.depth() == 0 {
                    return true;
                }
                let Some(file_type) = entry.file_type() else {
                    return true;
                };
                if !file_type.is_dir() {
                    return true;
                }
                let Some(name) = entry.file_name().to_str() else {
                    return true;
                };
                !should_skip_dir(&name.to_ascii_lowercase())
            });

        for entry in builder.build() {
            let entry = entry.map_err(|e| {
                Error::new(
                    ErrorKind::TraversalFailed,
                    format!("Failed to walk directory {dir}: {e}"),
                )
                .with_operation("discovery::discover_files")
                .with_context("dir", dir.clone())
            })?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if extensions.contains(&ext) {
                add_path(path.to_string_lossy().into_owned());
            }
        }
    }

    info!(
        "File discovery: {:.2}s ({} files)",
        discovery_start.elapsed().as_secs_f64(),
        files.len()
    );

    if files.is_empty() {
        return Err(Error::invalid_argument(format!(
            "No input files found. Expected files with extensions: {}",
            extensions.join(", ")
        ))
        .with_operation("discovery::discover_files"));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walk_skips_package_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("elm-stuff").join("packages")).unwrap();
        fs::write(root.join("src").join("Main.sexp"), "(module)").unwrap();
        fs::write(root.join("src").join("Main.elm"), "module Main").unwrap();
        fs::write(root.join("elm-stuff").join("packages").join("Dep.sexp"), "(module)").unwrap();

        let input = InputOptions::new().with_dir(root.to_string_lossy());
        let files = discover_files(&input, TREE_EXTENSIONS).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Main.sexp"));
    }

    #[test]
    fn test_explicit_files_first_and_deduplicated() {
        let input = InputOptions::new().with_file("b.sexp").with_file("a.sexp").with_file("b.sexp");
        let files = discover_files(&input, TREE_EXTENSIONS).unwrap();
        assert_eq!(files, vec!["b.sexp", "a.sexp"]);
    }

    #[test]
    fn test_nothing_found() {
        let tmp = tempfile::tempdir().unwrap();
        let input = InputOptions::new().with_dir(tmp.path().to_string_lossy());
        let err = discover_files(&input, ELM_EXTENSIONS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
