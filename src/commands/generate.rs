use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::{create_output_directory, write_artifact, Options, OutputMode};
use crate::config::BatchPolicy;
use crate::project::file_stem;
use crate::transpiler;

/// Transform every input document and write one artifact per document
pub fn execute(options: &Options) -> Result<()> {
    if options.inputs.is_empty() {
        anyhow::bail!("Missing expected argument '<file> ...'");
    }
    create_output_directory(&options.output_directory)?;

    let mut failures = 0;
    for input in &options.inputs {
        match process_file(input, options) {
            Ok(_) => {}
            Err(e) if options.policy == BatchPolicy::Continue => {
                eprintln!("{} {:#}", "error:".red().bold(), e);
                failures += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{} of {} document(s) failed",
            failures,
            options.inputs.len()
        );
    }
    Ok(())
}

/// Transform one document and write its artifact; returns the path written
pub fn process_file(input: &Path, options: &Options) -> Result<PathBuf> {
    let data = fs::read(input).with_context(|| format!("Error read {}", input.display()))?;
    let stem = file_stem(input)?;

    let transformed = transpiler::transform(&data, stem, options.mode.localizes())
        .with_context(|| format!("XML invalid: {}", input.display()))?;

    let (output, content) = match options.mode {
        OutputMode::Strings => (
            options.output_directory.join(format!("{}.strings", stem)),
            transformed.strings.to_strings_file(),
        ),
        _ => (
            options.output_directory.join(format!("{}.swift", stem)),
            transformed.code,
        ),
    };

    write_artifact(&output, &content, options.verbose)?;
    Ok(output)
}
