use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension every input document must carry
pub const UI_EXTENSION: &str = "ui";

/// Expand the command-line inputs into the list of `.ui` documents to process.
///
/// Files must have the `ui` extension. Directories are walked recursively and contribute
/// their `.ui` files in sorted order. Argument order is otherwise preserved.
pub fn discover_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = discover_in_directory(path)?;
            if found.is_empty() {
                log::warn!("no .ui files found in {}", path.display());
            }
            inputs.extend(found);
        } else if has_ui_extension(path) {
            inputs.push(path.clone());
        } else {
            anyhow::bail!(
                "File {} must have extension '{}'",
                path.display(),
                UI_EXTENSION
            );
        }
    }

    Ok(inputs)
}

fn discover_in_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_ui_extension(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn has_ui_extension(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(UI_EXTENSION)
}

/// `dialog` for `forms/dialog.ui`
pub fn file_stem(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid filename: {}", path.display()))
}
