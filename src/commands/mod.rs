pub mod extension;
pub mod generate;

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BatchPolicy;

/// Which artifact an invocation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Swift code with plain string literals
    Code,
    /// Swift code reading translatable strings through `NSLocalizedString`
    LocalizableCode,
    /// The `.strings` table of every translatable string
    Strings,
    /// The fixed `Bundle.lang` accessor
    Extension,
}

impl OutputMode {
    pub fn localizes(self) -> bool {
        !matches!(self, OutputMode::Code)
    }
}

/// Everything a run needs once the command line and config file are merged
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: OutputMode,
    pub inputs: Vec<PathBuf>,
    pub output_directory: PathBuf,
    pub verbose: bool,
    pub policy: BatchPolicy,
}

pub fn execute(options: &Options) -> Result<()> {
    match options.mode {
        OutputMode::Extension => extension::execute(&options.output_directory, options.verbose),
        _ => generate::execute(options),
    }
}

fn create_output_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Can't create output directory {}", dir.display()))
}

fn write_artifact(path: &Path, content: &str, verbose: bool) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Write error {}", path.display()))?;
    if verbose {
        eprintln!("   {} {}", "Generated".green().bold(), path.display());
    }
    Ok(())
}
