//! Shared CLI options for elmscope subcommands.

use clap::Args;

/// Where to read inputs from. At least one file or directory is required.
#[derive(Args, Debug, Clone, Default)]
#[group(required = true, multiple = true)]
pub struct InputOptions {
    /// Individual files to process (repeatable)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        num_args = 1..,
        action = clap::ArgAction::Append
    )]
    pub files: Vec<String>,

    /// Directories to scan recursively (repeatable)
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        num_args = 1..,
        action = clap::ArgAction::Append
    )]
    pub dirs: Vec<String>,
}

/// Options of the `make` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct MakeOptions {
    /// Settings file (default: `elmscope.toml` in the working directory)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// `elm-make` executable, overriding the settings file
    #[arg(long = "elm-make", value_name = "EXE")]
    pub elm_make: Option<String>,
}

impl InputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dirs.push(dir.into());
        self
    }
}

impl MakeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Option<String>) -> Self {
        self.config = config;
        self
    }

    pub fn with_elm_make(mut self, elm_make: Option<String>) -> Self {
        self.elm_make = elm_make;
        self
    }
}
