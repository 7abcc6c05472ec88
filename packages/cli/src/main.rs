mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, init, preview, CheckArgs, InitArgs, PreviewArgs};
use tracing_subscriber::EnvFilter;

/// Blockcraft CLI - page builder documents from the command line
#[derive(Parser, Debug)]
#[command(name = "blockcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine internals (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a project file and config from the starter template
    Init(InitArgs),

    /// Report structural problems in a project file
    Check(CheckArgs),

    /// Render a project page for one or more platforms
    Preview(PreviewArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
