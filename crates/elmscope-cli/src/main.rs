use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use elmscope::{ElmscopeOptions, InputOptions, MakeOptions, Task, load_make_settings, run_main};
use elmscope_core::{PrintConfig, PrintFormat};

#[derive(Parser, Debug)]
#[command(
    name = "elmscope",
    about = "elmscope: binding and reference resolution over Elm syntax trees",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Process files one at a time instead of in parallel
    #[arg(long, global = true, default_value_t = false)]
    sequential: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE", global = true)]
    output: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Top-level names declared in each tree
    Names(InputOptions),

    /// Every reference occurrence and what it resolves to
    Refs(InputOptions),

    /// Usages of the declaration at a byte offset
    Usages {
        #[command(flatten)]
        input: InputOptions,

        /// Byte offset inside the declaration's identifier or one of its usages
        #[arg(long, value_name = "OFFSET")]
        at: usize,
    },

    /// Edits renaming the declaration at a byte offset
    Rename {
        #[command(flatten)]
        input: InputOptions,

        #[arg(long, value_name = "OFFSET")]
        at: usize,

        /// New lower-case name
        #[arg(long, value_name = "NAME")]
        to: String,
    },

    /// Imports and exposed values nothing refers to
    UnusedImports(InputOptions),

    /// Dump trees
    Print {
        #[command(flatten)]
        input: InputOptions,

        /// Output format: 'tree', 'compact' or 'flat'
        #[arg(long, value_name = "FORMAT", default_value = "tree")]
        format: PrintFormat,

        /// Include byte spans
        #[arg(long, default_value_t = false)]
        spans: bool,
    },

    /// Run elm-make over Elm source files and report its diagnostics
    Make {
        #[command(flatten)]
        input: InputOptions,

        #[command(flatten)]
        make: MakeOptions,
    },
}

pub fn run(args: Cli) -> anyhow::Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let (input, task) = match args.command {
        Command::Names(input) => (input, Task::Names),
        Command::Refs(input) => (input, Task::Refs),
        Command::Usages { input, at } => (input, Task::Usages { offset: at }),
        Command::Rename { input, at, to } => (
            input,
            Task::Rename {
                offset: at,
                new_name: to,
            },
        ),
        Command::UnusedImports(input) => (input, Task::UnusedImports),
        Command::Print {
            input,
            format,
            spans,
        } => {
            let config = PrintConfig::new().with_format(format).with_spans(spans);
            (input, Task::Print { config })
        }
        Command::Make { input, make } => {
            let cwd = std::env::current_dir().context("cannot read working directory")?;
            let settings = load_make_settings(&make, &cwd)?;
            (input, Task::Make { settings })
        }
    };

    let opts = ElmscopeOptions {
        input,
        output: args.output,
        sequential: args.sequential,
        json: args.json,
    };

    let output = run_main(&opts, &task).inspect_err(|err| {
        tracing::error!(error = %err, status = %err.status(), "execution failed");
    })?;
    if let Some(ref path) = opts.output {
        std::fs::write(path, &output).with_context(|| format!("cannot write {path}"))?;
        tracing::info!(path, "output written");
    } else {
        print!("{output}");
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    run(args)
}
