//! Core processing pipeline: load trees → resolve → render.

use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use elmscope_core::{PrintConfig, SyntaxTree, declared_names, from_json, parse_tree, render_tree, to_json};
use elmscope_error::{Error, ErrorKind, Result};
use elmscope_make::{Diagnostic, MakeSettings, diagnostics_for_file};
use elmscope_resolver::{
    ReferenceRecord, Resolver, ResolverOption, TextEdit, declaration_at, find_usages,
    rename_edits, resolve_trees_with, unused_imports,
};

use crate::output::{FileReport, NameRow, UnusedRow};

/// Read one tree file. `.json` files are dumps, anything else is notation.
pub fn load_tree(path: &str) -> Result<SyntaxTree> {
    let text = fs::read_to_string(path).map_err(|err| {
        Error::from(err)
            .with_operation("pipeline::load_tree")
            .with_context("path", path)
    })?;
    let tree = match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&text),
        _ => parse_tree(&text),
    }
    .map_err(|err| err.with_context("path", path))?;
    Ok(tree.with_file_name(path))
}

fn is_malformed(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ParseFailed | ErrorKind::InvalidFormat | ErrorKind::DeserializationFailed
    )
}

/// Load all tree files, keeping their order. Malformed trees are logged and
/// skipped; I/O errors abort.
pub fn load_trees(files: &[String], option: &ResolverOption) -> Result<Vec<SyntaxTree>> {
    let load_start = Instant::now();
    let loaded: Vec<Result<SyntaxTree>> = if option.sequential {
        files.iter().map(|f| load_tree(f)).collect()
    } else {
        files.par_iter().map(|f| load_tree(f)).collect()
    };

    let mut trees = Vec::with_capacity(loaded.len());
    for result in loaded {
        match result {
            Ok(tree) => trees.push(tree),
            Err(err) if is_malformed(err.kind()) => {
                warn!(error = %err, "skipping malformed tree");
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        "Loading trees: {:.2}s ({} of {} files)",
        load_start.elapsed().as_secs_f64(),
        trees.len(),
        files.len()
    );
    Ok(trees)
}

fn file_label(resolver: &Resolver<'_>) -> String {
    resolver.tree().file_name().unwrap_or("<tree>").to_string()
}

/// Top-level names declared in each tree.
pub fn collect_names(trees: &[SyntaxTree], option: &ResolverOption) -> Vec<FileReport<NameRow>> {
    resolve_trees_with(trees, option, |resolver| {
        let items = declared_names(resolver.tree().root())
            .iter()
            .map(|name| NameRow {
                name: name.name().to_string(),
                span: name.span(),
            })
            .collect();
        FileReport::new(file_label(resolver), items)
    })
}

/// Every reference occurrence with its resolution.
pub fn collect_references(
    trees: &[SyntaxTree],
    option: &ResolverOption,
) -> Vec<FileReport<ReferenceRecord>> {
    resolve_trees_with(trees, option, |resolver| {
        let items = resolver
            .references()
            .iter()
            .map(|reference| reference.record(resolver))
            .collect();
        FileReport::new(file_label(resolver), items)
    })
}

fn single_tree<'a>(trees: &'a [SyntaxTree], command: &str) -> Result<&'a SyntaxTree> {
    match trees {
        [tree] => Ok(tree),
        _ => Err(Error::invalid_argument(format!(
            "{command} expects exactly one tree file, got {}",
            trees.len()
        ))
        .with_operation("pipeline::single_tree")),
    }
}

/// Usages of the declaration whose identifier covers `offset`.
pub fn collect_usages(trees: &[SyntaxTree], offset: usize) -> Result<Vec<FileReport<ReferenceRecord>>> {
    let tree = single_tree(trees, "usages")?;
    let resolver = Resolver::new(tree);
    let declaration = declaration_at(&resolver, offset)?;
    let items = find_usages(&resolver, declaration)
        .iter()
        .map(|reference| reference.record(&resolver))
        .collect();
    Ok(vec![FileReport::new(file_label(&resolver), items)])
}

pub fn collect_rename(
    trees: &[SyntaxTree],
    offset: usize,
    new_name: &str,
) -> Result<Vec<FileReport<TextEdit>>> {
    let tree = single_tree(trees, "rename")?;
    let resolver = Resolver::new(tree);
    let declaration = declaration_at(&resolver, offset)?;
    let edits = rename_edits(&resolver, declaration, new_name)?;
    Ok(vec![FileReport::new(file_label(&resolver), edits)])
}

pub fn collect_unused_imports(
    trees: &[SyntaxTree],
    option: &ResolverOption,
) -> Vec<FileReport<UnusedRow>> {
    resolve_trees_with(trees, option, |resolver| {
        let items = unused_imports(resolver)
            .iter()
            .map(|unused| UnusedRow {
                message: unused.describe(),
                span: unused.node().span(),
            })
            .collect();
        FileReport::new(file_label(resolver), items)
    })
}

/// Render each tree, separated by a `;; file` header when there are several.
pub fn render_trees(trees: &[SyntaxTree], config: &PrintConfig, json: bool) -> Result<String> {
    let mut out = String::new();
    for tree in trees {
        if trees.len() > 1 {
            let _ = writeln!(out, ";; {}", tree.file_name().unwrap_or("<tree>"));
        }
        if json {
            out.push_str(&to_json(tree)?);
            out.push('\n');
        } else {
            out.push_str(&render_tree(tree.root(), config));
        }
    }
    Ok(out)
}

/// Run `elm-make` for every file.
pub fn collect_diagnostics(
    files: &[String],
    settings: &MakeSettings,
    option: &ResolverOption,
) -> Vec<FileReport<Diagnostic>> {
    let run = |file: &String| {
        FileReport::new(file.clone(), diagnostics_for_file(settings, Path::new(file)))
    };
    let make_start = Instant::now();
    let reports: Vec<_> = if option.sequential {
        files.iter().map(run).collect()
    } else {
        files.par_iter().map(run).collect()
    };
    info!("elm-make: {:.2}s", make_start.elapsed().as_secs_f64());
    reports
}
