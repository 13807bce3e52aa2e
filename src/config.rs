//! Configuration for descriptor generation.
//!
//! Settings are layered, later sources winning:
//! - Default values
//! - TOML configuration file (`.tscomp/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `TSCOMP_` and use double
//! underscores to separate nested levels:
//! - `TSCOMP_GENERATE__OUTPUT_DIR=dist/components` sets `generate.output_dir`
//! - `TSCOMP_GENERATE__PARALLEL_THREADS=2` sets `generate.parallel_threads`
//! - `TSCOMP_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".tscomp";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "TSCOMP_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Package directory (where package.json lives)
    #[serde(default = "default_package_dir")]
    pub package_dir: PathBuf,

    /// Descriptor generation settings
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GenerateConfig {
    /// Source directory, relative to the package
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Output directory for descriptors, relative to the package
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Descriptor file extension, including the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// JSON array of class names to skip, relative to the package
    #[serde(default = "default_ignore_file")]
    pub ignore_file: PathBuf,

    /// Number of classes resolved in parallel
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `tscomp::resolution = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_package_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_source_dir() -> PathBuf {
    PathBuf::from("lib")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("components")
}
fn default_extension() -> String {
    ".jsonld".to_string()
}
fn default_ignore_file() -> PathBuf {
    PathBuf::from(".componentsignore")
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            package_dir: default_package_dir(),
            generate: GenerateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            extension: default_extension(),
            ignore_file: default_ignore_file(),
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            // Double underscore becomes a dot, single underscores stay in field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find `.tscomp/settings.toml` in the current directory or an ancestor
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Source directory resolved against the package directory
    pub fn source_path(&self) -> PathBuf {
        self.package_dir.join(&self.generate.source_dir)
    }

    /// Output directory resolved against the package directory
    pub fn output_path(&self) -> PathBuf {
        self.package_dir.join(&self.generate.output_dir)
    }

    pub fn ignore_path(&self) -> PathBuf {
        self.package_dir.join(&self.generate.ignore_file)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
