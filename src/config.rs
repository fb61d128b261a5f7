use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Looked up in the working directory when no `--config` is given
pub const CONFIG_FILE: &str = "qlift-uic.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output directory; `-o` on the command line wins
    pub directory: Option<String>,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    #[serde(default)]
    pub policy: BatchPolicy,
}

/// What to do with the remaining documents after one fails
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BatchPolicy {
    /// Stop at the first failing document
    #[default]
    Abort,
    /// Process every document and report all failures at the end
    Continue,
}

/// Load and parse a qlift-uic.toml configuration file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!("could not find config file `{}`", path.display())
        } else {
            anyhow::anyhow!("failed to read `{}`: {}", path.display(), e)
        }
    })?;

    toml::from_str(&content).map_err(|e| anyhow::anyhow!("failed to parse `{}`: {}", path.display(), e))
}

/// Load `explicit` if given, else `qlift-uic.toml` from the working directory if present,
/// else the defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                load_config(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
