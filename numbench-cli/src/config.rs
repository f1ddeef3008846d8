//! Configuration loading from numbench.toml
//!
//! numbench configuration can be specified in a `numbench.toml` file in the
//! project root. The configuration is discovered by walking up from the
//! current directory; command line flags override it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`NumbenchConfig::discover`]
pub const CONFIG_FILE: &str = "numbench.toml";

/// numbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NumbenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerConfig {
    /// Repetition count forced on every suite; suites use their own policy when unset
    #[serde(default)]
    pub repetitions: Option<u64>,
    /// Check each operation's result, untimed, before timing it
    #[serde(default = "default_verify")]
    pub verify: bool,
    /// Pin the benchmarking thread to CPU 0 (Linux only)
    #[serde(default)]
    pub pin_cpu: bool,
    /// Continue with the next suite after one fails
    #[serde(default)]
    pub keep_going: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            repetitions: None,
            verify: default_verify(),
            pin_cpu: false,
            keep_going: false,
        }
    }
}

fn default_verify() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory JSON reports are written to when no output file is given
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl NumbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for a configuration file
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), "ignoring config: {}", e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Path of the JSON report when the run has no explicit output file
    pub fn report_path(&self) -> Option<PathBuf> {
        self.output
            .directory
            .as_ref()
            .map(|dir| Path::new(dir).join("numbench.json"))
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# numbench Configuration

[runner]
# Force this repetition count on every suite (uncomment to enable)
# repetitions = 500
# Check each operation's result before timing it
verify = true
# Pin the benchmarking thread to CPU 0 (Linux only)
pin_cpu = false
# Continue with the next suite after one fails
keep_going = false

[output]
# Default output format: human, json
format = "human"
# Directory for JSON reports (uncomment to enable)
# directory = "target/numbench"
"#
        .to_string()
    }
}
