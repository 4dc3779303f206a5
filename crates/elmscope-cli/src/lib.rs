//! elmscope command-line interface.
//!
pub mod discovery;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::Path;

use elmscope_core::{PrintConfig, SyntaxTree};
use elmscope_error::Result;
use elmscope_make::{MakeSettings, Settings};
use elmscope_resolver::ResolverOption;

pub use options::{InputOptions, MakeOptions};
pub use output::{FileReport, NameRow, TextLine, UnusedRow, render_reports};

/// Options for running elmscope.
#[derive(Debug, Clone, Default)]
pub struct ElmscopeOptions {
    pub input: InputOptions,
    pub output: Option<String>,
    pub sequential: bool,
    pub json: bool,
}

/// What to compute over the inputs.
#[derive(Debug, Clone)]
pub enum Task {
    Names,
    Refs,
    Usages { offset: usize },
    Rename { offset: usize, new_name: String },
    UnusedImports,
    Print { config: PrintConfig },
    Make { settings: MakeSettings },
}

/// Settings for `make`: the `--config` file if given, otherwise
/// `elmscope.toml` in `cwd`, then the `--elm-make` override.
pub fn load_make_settings(make: &MakeOptions, cwd: &Path) -> Result<MakeSettings> {
    let settings = match &make.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::load_from_dir(cwd)?,
    };
    let mut settings = settings.make;
    if let Some(executable) = &make.elm_make {
        settings = settings.with_executable(executable.clone());
    }
    Ok(settings)
}

/// Main entry point
pub fn run_main(opts: &ElmscopeOptions, task: &Task) -> Result<String> {
    let option = ResolverOption::default().with_sequential(opts.sequential);
    let load = || -> Result<Vec<SyntaxTree>> {
        let files = discovery::discover_files(&opts.input, discovery::TREE_EXTENSIONS)?;
        pipeline::load_trees(&files, &option)
    };

    match task {
        Task::Names => render_reports(&pipeline::collect_names(&load()?, &option), opts.json),
        Task::Refs => render_reports(&pipeline::collect_references(&load()?, &option), opts.json),
        Task::Usages { offset } => {
            render_reports(&pipeline::collect_usages(&load()?, *offset)?, opts.json)
        }
        Task::Rename { offset, new_name } => render_reports(
            &pipeline::collect_rename(&load()?, *offset, new_name)?,
            opts.json,
        ),
        Task::UnusedImports => render_reports(
            &pipeline::collect_unused_imports(&load()?, &option),
            opts.json,
        ),
        Task::Print { config } => pipeline::render_trees(&load()?, config, opts.json),
        Task::Make { settings } => {
            let files = discovery::discover_files(&opts.input, discovery::ELM_EXTENSIONS)?;
            render_reports(&pipeline::collect_diagnostics(&files, settings, &option), opts.json)
        }
    }
}
