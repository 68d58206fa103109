use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use word_tree_core::{Framing, Ranking};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "WORD_TREE_CONFIG";

/// Server configuration, read from a TOML file.
///
/// Every field has a default; a missing file yields the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
	#[serde(default = "default_host")]
	pub host: String,
	#[serde(default = "default_port")]
	pub port: u16,
	/// Sorted vocabulary file the index is built from
	#[serde(default = "default_vocabulary")]
	pub vocabulary: PathBuf,
	/// Limit applied when a request does not give `n`
	#[serde(default = "default_limit")]
	pub default_limit: usize,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub framing: Framing,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
			vocabulary: default_vocabulary(),
			default_limit: default_limit(),
			ranking: Ranking::default(),
			framing: Framing::default(),
		}
	}
}

impl ServerConfig {
	/// Loads the configuration from `WORD_TREE_CONFIG` or `./word_tree.toml`.
	pub fn load() -> Result<Self, String> {
		let path = resolve_config_path();
		if !path.exists() {
			return Ok(Self::default());
		}
		Self::from_file(&path)
	}

	pub fn from_file(path: &Path) -> Result<Self, String> {
		let raw = fs::read_to_string(path).map_err(|e| format!("failed to read config file {}: {e}", path.display()))?;
		Self::parse(&raw).map_err(|e| format!("failed to parse TOML from {}: {e}", path.display()))
	}

	pub fn parse(raw: &str) -> Result<Self, String> {
		let config: ServerConfig = toml::from_str(raw).map_err(|e| e.to_string())?;
		if config.default_limit == 0 {
			return Err("default_limit must be at least 1".to_owned());
		}
		Ok(config)
	}
}

fn resolve_config_path() -> PathBuf {
	match env::var(CONFIG_ENV) {
		Ok(path) => PathBuf::from(path),
		Err(_) => PathBuf::from("./word_tree.toml"),
	}
}

fn default_host() -> String {
	"127.0.0.1".to_owned()
}

fn default_port() -> u16 {
	5000
}

fn default_vocabulary() -> PathBuf {
	PathBuf::from("./data/word_list.txt")
}

fn default_limit() -> usize {
	5
}
