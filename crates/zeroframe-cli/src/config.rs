use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User-level configuration loaded from `~/.config/zeroframe/config.toml` (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is not set (e.g. `zeroframe=debug`).
    pub log_level: Option<String>,
    /// Canned behavior of the scripted host.
    #[serde(default)]
    pub frame: FrameConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct FrameConfig {
    /// Command name -> result returned by the host.
    #[serde(default)]
    pub responses: BTreeMap<String, Value>,
    /// Command name -> error message the host rejects with.
    #[serde(default)]
    pub failures: BTreeMap<String, String>,
}

impl Config {
    /// Config written by `config init`: answers `ping` and logs every dispatch.
    pub fn starter() -> Self {
        Self {
            log_level: Some("info,zeroframe=debug".to_string()),
            frame: FrameConfig {
                responses: BTreeMap::from([
                    ("ping".to_string(), Value::from("pong")),
                    ("wrapperPermissionAdd".to_string(), Value::from("ok")),
                ]),
                failures: BTreeMap::new(),
            },
        }
    }
}

/// Load config from `path`, or from the default path when none is given.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_from_path(path),
        None => load_from_path(default_path()?),
    }
}

/// Load config from a given path; if missing or empty, return defaults.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = toml::from_str(&contents)?;
    Ok(cfg)
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("zeroframe").join("config.toml"))
}

/// Write `config` to `path` unless a file is already there, creating parent directories.
/// Returns the path either way; existing files are never overwritten.
pub fn write_if_missing(config: &Config, path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_from_path(dir.path().join("config.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn returns_default_when_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "  \n").expect("write");
        assert_eq!(load(Some(&path)).expect("load"), Config::default());
    }

    #[test]
    fn parses_custom_config() {
        let contents = r#"
            log_level = "debug"
            [frame.responses]
            ping = "pong"
            siteInfo = { address = "1HeLLo", peers = 3 }
            [frame.failures]
            fileGet = "No such file"
        "#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.frame.responses["ping"], Value::from("pong"));
        assert_eq!(
            cfg.frame.responses["siteInfo"],
            serde_json::json!({ "address": "1HeLLo", "peers": 3 })
        );
        assert_eq!(cfg.frame.failures["fileGet"], "No such file");
    }

    #[test]
    fn write_creates_file_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::starter();

        write_if_missing(&cfg, &path).expect("write should succeed");
        let second = write_if_missing(&Config::default(), &path).expect("second write ok");
        assert_eq!(second, path);

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded, cfg);
    }
}
