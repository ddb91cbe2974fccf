#![forbid(unsafe_code)]
//! blade-expects command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use blade_expects::commands::{
    execute_check, execute_compile, execute_init, CheckOptions, CompileOptions, InitOptions,
};
use blade_expects::Config;

#[derive(Parser)]
#[command(name = "blade-expects")]
#[command(about = "Compile-time @expects guards for Blade templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".blade-expects.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Rewrite @expects annotations into guard code
    Compile {
        /// Template file or directory
        path: PathBuf,

        /// Rewrite files in place
        #[arg(short, long)]
        write: bool,

        /// Show a unified diff instead of writing
        #[arg(long)]
        diff: bool,

        /// Output file (single-file mode only; default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate @expects annotations without rewriting
    Check {
        /// Template file or directory
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "blade_expects=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Init { force } => execute_init(InitOptions { force }),
        Commands::Compile { path, write, diff, out } => {
            execute_compile(CompileOptions { path, write, diff, out }, config)
        }
        Commands::Check { path } => execute_check(CheckOptions { path }, config),
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", style("✗").red(), err);
        std::process::exit(1);
    }

    Ok(())
}
