//! Runtime configuration, layered from an optional TOML file and `AGENDA_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Deserialised server settings. Only `database_url` is mandatory.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  /// Location of the SQLite database file.
  pub database_url:  PathBuf,
  /// Phone-validation credential. Checked on first enrichment, not here.
  #[serde(default)]
  pub api_key:       Option<String>,
  #[serde(default = "default_validator_url")]
  pub validator_url: String,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 3000 }

fn default_validator_url() -> String { agenda_api::validator::DEFAULT_ENDPOINT.to_string() }

impl ServerConfig {
  /// Read `file` (if it exists) and overlay the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("AGENDA"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig (is AGENDA_DATABASE_URL set?)")
  }

  /// `database_url` with a leading `~` expanded to the user's home directory.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.database_url) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::io::Write as _;

  fn write_toml(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
      "agenda-config-{}-{}.toml",
      std::process::id(),
      contents.len()
    ));
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
  }

  #[test]
  fn defaults_fill_optional_keys() {
    let path = write_toml("database_url = \"/tmp/agenda.db\"\n");
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.database_url, PathBuf::from("/tmp/agenda.db"));
    assert!(cfg.api_key.is_none());
    assert_eq!(cfg.validator_url, agenda_api::validator::DEFAULT_ENDPOINT);
    std::fs::remove_file(path).ok();
  }

  #[test]
  fn missing_database_url_is_fatal() {
    let path = write_toml("port = 8080\napi_key = \"k\"\n");
    assert!(ServerConfig::load(&path).is_err());
    std::fs::remove_file(path).ok();
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/agenda.db")),
      PathBuf::from(home).join("agenda.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs.db")), PathBuf::from("/abs.db"));
  }
}
