use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shortdial_store::DEFAULT_DATA_FILE;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "shortdial.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Directory file to read and write.
    pub data_file: PathBuf,
    /// Log level used when `--verbose` is not given.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: "warn".into(),
        }
    }
}

impl CliConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `shortdial.toml` in the
    /// working directory is used if present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if !implicit.exists() {
                    return Ok(Self::default());
                }
                implicit
            }
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply a `--data-file` override.
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }

    /// Effective log level: `debug` when verbose, else the configured level.
    pub fn tracing_level(&self, verbose: bool) -> anyhow::Result<tracing::Level> {
        if verbose {
            return Ok(tracing::Level::DEBUG);
        }
        self.log_level
            .parse()
            .with_context(|| format!("invalid log_level '{}'", self.log_level))
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert_eq!(c.data_file, PathBuf::from("employees.json"));
        assert_eq!(c.tracing_level(false).unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = CliConfig::from_toml("data_file = \"/srv/phone/staff.json\"\n").unwrap();
        assert_eq!(c.data_file, PathBuf::from("/srv/phone/staff.json"));
        assert_eq!(c.log_level, "warn");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(CliConfig::from_toml("datafile = \"x.json\"\n").is_err());
    }

    #[test]
    fn data_file_override_wins() {
        let c = CliConfig::default().with_data_file(Some("other.json".into()));
        assert_eq!(c.data_file, PathBuf::from("other.json"));
        let c = c.with_data_file(None);
        assert_eq!(c.data_file, PathBuf::from("other.json"));
    }

    #[test]
    fn verbose_forces_debug() {
        let c = CliConfig::from_toml("log_level = \"error\"\n").unwrap();
        assert_eq!(c.tracing_level(false).unwrap(), tracing::Level::ERROR);
        assert_eq!(c.tracing_level(true).unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn bad_log_level_is_error() {
        let c = CliConfig::from_toml("log_level = \"loud\"\n").unwrap();
        assert!(c.tracing_level(false).is_err());
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn explicit_config_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shortdial.toml");
        fs::write(&path, "data_file = \"team.json\"\nlog_level = \"info\"\n").unwrap();

        let c = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(c.data_file, PathBuf::from("team.json"));
        assert_eq!(c.tracing_level(false).unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn toml_roundtrip() {
        let c = CliConfig::default().with_data_file(Some("a/b.json".into()));
        assert_eq!(CliConfig::from_toml(&c.to_toml().unwrap()).unwrap(), c);
    }
}
