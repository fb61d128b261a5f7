use anyhow::Result;
use clap::{ArgGroup, Parser};
use colored::Colorize;
use std::path::PathBuf;

use qlift_uic::commands::{self, Options, OutputMode};
use qlift_uic::config::{self, BatchPolicy};
use qlift_uic::logging;
use qlift_uic::project;

#[derive(Parser)]
#[command(name = "qlift-uic")]
#[command(about = "Generate Swift code from Qt user interfaces", long_about = None)]
#[command(version)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["code", "localizable_code", "strings", "extension"]),
))]
struct Cli {
    /// UI files (or directories of UI files) to compile
    files: Vec<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// The output path for generated files (defaults to the current directory)
    #[arg(short, long, value_name = "path")]
    output_directory: Option<PathBuf>,

    /// Configuration file (defaults to ./qlift-uic.toml when present)
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,

    /// Process every document even if one fails
    #[arg(long)]
    keep_going: bool,

    /// Generate UI code
    #[arg(long)]
    code: bool,

    /// Generate localizable UI code
    #[arg(long)]
    localizable_code: bool,

    /// Generate .strings files
    #[arg(long)]
    strings: bool,

    /// Generate localization resource accessor extension
    #[arg(long)]
    extension: bool,
}

impl Cli {
    fn mode(&self) -> OutputMode {
        if self.extension {
            OutputMode::Extension
        } else if self.strings {
            OutputMode::Strings
        } else if self.localizable_code {
            OutputMode::LocalizableCode
        } else {
            OutputMode::Code
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::resolve_config(cli.config.as_deref())?;
    let verbose = cli.verbose || config.output.verbose;
    logging::init(verbose);

    let mode = cli.mode();
    let output_directory = cli
        .output_directory
        .clone()
        .or_else(|| config.output.directory.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let policy = if cli.keep_going {
        BatchPolicy::Continue
    } else {
        config.batch.policy
    };
    let inputs = if mode == OutputMode::Extension {
        Vec::new()
    } else {
        project::discover_inputs(&cli.files)?
    };

    commands::execute(&Options {
        mode,
        inputs,
        output_directory,
        verbose,
        policy,
    })
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
