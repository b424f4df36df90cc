use clap::Parser;
use config::ValueKind;
use directories::ProjectDirs;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "guess-structure")]
#[command(
    about = "Decides whether each recorded insert/remove trace came from a stack, a queue or a priority queue"
)]
pub struct Args {
    /// Trace file to read. Standard input is read when omitted.
    pub input: Option<PathBuf>,

    /// Set a configuration value; format $NAME=$VALUE.
    #[arg(long, short)]
    pub config: Vec<String>,

    /// Print the config file location and exit.
    #[arg(long)]
    pub print_config_path: bool,
}

/// Configuration for a guess-structure run. The sources of these configuration values (from
/// highest-precedence to lowest-precedence) are:
///
/// 1. The positional input path and `--config` command line flags.
/// 2. A user-specific configuration file (e.g. `$HOME/.config/guess-structure/config.toml`).
/// 3. Defaults specified in the code (using `#[serde(default)]`).
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Trace file to read; standard input when unset.
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Flush standard output after every verdict line.
    #[serde(default = "default_flush_each_case")]
    pub flush_each_case: bool,

    // serde will place any unrecognized fields here. They are reported by unknown_field_warning
    // rather than rejected.
    #[serde(flatten)]
    unknown: HashMap<String, Value>,
}

fn default_flush_each_case() -> bool {
    true
}

impl Config {
    /// Names of config keys that were not recognized
    pub fn unknown_fields(&self) -> impl Iterator<Item = &str> {
        self.unknown.keys().map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("invalid --config value {0:?}, expected NAME=VALUE")]
    InvalidOverride(String),
    #[error("configuration error")]
    Config(#[from] config::ConfigError),
}

/// Parses the command line and loads the configuration. Returns `None` if an early-exit argument
/// was passed.
pub fn initialize() -> Result<Option<Config>, ConfigLoadError> {
    let args = Args::parse();
    let dirs = ProjectDirs::from("", "", "guess-structure");
    if dirs.is_none() {
        log::debug!("No home directory; skipping the user config file");
    }
    initialize_with(&args, dirs.as_ref().map(ProjectDirs::config_dir))
}

/// Acts on already-parsed arguments, with the user config file looked up in `config_dir`.
pub fn initialize_with(
    args: &Args,
    config_dir: Option<&Path>,
) -> Result<Option<Config>, ConfigLoadError> {
    if args.print_config_path {
        match config_dir {
            Some(dir) => println!("Config file location: {:?}", config_file(dir)),
            None => println!("No config file location: home directory not found"),
        }
        return Ok(None);
    }
    let config = load_config(args, config_dir)?;
    unknown_field_warning("", &config.unknown);
    Ok(Some(config))
}

/// Returns the config file path within the given config directory.
pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("config.toml")
}

/// Builds the layered configuration. The config file is optional.
pub fn load_config(args: &Args, config_dir: Option<&Path>) -> Result<Config, ConfigLoadError> {
    let mut builder = config::Config::builder();
    if let Some(dir) = config_dir {
        builder = builder.add_source(config::File::from(config_file(dir)).required(false));
    }
    for entry in &args.config {
        let Some((name, value)) = entry.split_once('=') else {
            return Err(ConfigLoadError::InvalidOverride(entry.clone()));
        };
        builder = builder.set_override(name.trim(), override_value(value.trim()))?;
    }
    if let Some(input) = &args.input {
        builder = builder.set_override("input", input.to_string_lossy().into_owned())?;
    }
    Ok(builder.build()?.try_deserialize()?)
}

/// Types a `--config` value the way TOML would for booleans and integers; anything else stays a
/// string. Values pass through the flattened map as-is, so `"true"` must already be a bool.
fn override_value(text: &str) -> ValueKind {
    if let Ok(flag) = text.parse::<bool>() {
        ValueKind::Boolean(flag)
    } else if let Ok(number) = text.parse::<i64>() {
        ValueKind::I64(number)
    } else {
        ValueKind::String(text.to_string())
    }
}

/// Emits a warning for each unrecognized config key.
fn unknown_field_warning(prefix: &str, unknown: &HashMap<String, Value>) {
    let mut names: Vec<_> = unknown.keys().collect();
    names.sort();
    for name in names {
        log::warn!("Unknown config key: {prefix}{name}");
    }
}
