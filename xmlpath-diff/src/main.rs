use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};
use xmlpath_core::{
    diff_documents, format_json, format_summary, parse_file, PathDiff, PathOptions,
};

mod cli;
mod input;
mod logging;
mod report;

use cli::{normalize_args, Cli, OutputFormat};

fn main() -> Result<()> {
    let normalized = normalize_args(std::env::args_os());
    let cli = Cli::parse_from(normalized.args);
    logging::init(cli.verbose);

    for arg in normalized.ignored.iter().chain(&cli.extra) {
        warn!(argument = %arg.to_string_lossy(), "ignoring unrecognized argument");
    }

    let Some((file1, file2)) = cli.inputs() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let missing = input::missing_inputs(&[file1, file2]);
    if !missing.is_empty() {
        println!("One or both of the input files do not exist.");
        for path in missing {
            println!("  missing: {}", path.display());
        }
        return Ok(());
    }

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let options = cli.path_options();
    debug!(?options, "comparing {} with {}", file1.display(), file2.display());

    let diff = run_diff(file1, file2, &options)?;

    match cli.format {
        OutputFormat::Text => {
            if !diff.is_empty() {
                let left = file1.display().to_string();
                let right = file2.display().to_string();
                println!("{}", report::render_text(&diff, &left, &right));
            }
        }
        OutputFormat::Json => println!("{}", format_json(&diff)),
        OutputFormat::Summary => println!("{}", format_summary(&diff)),
    }

    Ok(())
}

fn run_diff(file1: &Path, file2: &Path, options: &PathOptions) -> Result<PathDiff> {
    let left =
        parse_file(file1).with_context(|| format!("failed to parse {}", file1.display()))?;
    let right =
        parse_file(file2).with_context(|| format!("failed to parse {}", file2.display()))?;

    Ok(diff_documents(&left, &right, options))
}
