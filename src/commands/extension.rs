use anyhow::Result;
use std::path::Path;

use crate::commands::{create_output_directory, write_artifact};
use crate::transpiler::{extension_source, EXTENSION_FILE_NAME};

/// Write `language_bundle_accessor.swift` into `output_dir`
pub fn execute(output_dir: &Path, verbose: bool) -> Result<()> {
    create_output_directory(output_dir)?;
    write_artifact(
        &output_dir.join(EXTENSION_FILE_NAME),
        extension_source(),
        verbose,
    )
}
