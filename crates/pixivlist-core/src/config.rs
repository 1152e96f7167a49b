use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default manifest file name, looked up in the current directory.
pub const DEFAULT_LIST_FILE: &str = "list.txt";

/// Global configuration loaded from `~/.config/pixivlist/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixivListConfig {
    /// Value substituted for `%root%` in list paths. None = substitute nothing.
    #[serde(default)]
    pub root_directory: Option<String>,
    /// List file used when the CLI is not given one.
    #[serde(default = "default_list_file")]
    pub list_file: String,
}

fn default_list_file() -> String {
    DEFAULT_LIST_FILE.to_string()
}

impl Default for PixivListConfig {
    fn default() -> Self {
        Self {
            root_directory: None,
            list_file: default_list_file(),
        }
    }
}

impl PixivListConfig {
    /// Explicit values win over the config file.
    pub fn resolve_list_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.list_file))
    }

    pub fn resolve_root_dir<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.root_directory.as_deref())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pixivlist")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PixivListConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PixivListConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<PixivListConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: PixivListConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = PixivListConfig::default();
        assert_eq!(cfg.list_file, "list.txt");
        assert!(cfg.root_directory.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PixivListConfig {
            root_directory: Some("/data/pixiv".to_string()),
            list_file: "members.txt".to_string(),
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PixivListConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_missing_fields_use_defaults() {
        let cfg: PixivListConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, PixivListConfig::default());

        let cfg: PixivListConfig = toml::from_str(r#"root_directory = "/srv/art""#).unwrap();
        assert_eq!(cfg.root_directory.as_deref(), Some("/srv/art"));
        assert_eq!(cfg.list_file, "list.txt");
    }

    #[test]
    fn explicit_values_override_config() {
        let cfg = PixivListConfig {
            root_directory: Some("/cfg/root".to_string()),
            list_file: "cfg.txt".to_string(),
        };
        assert_eq!(cfg.resolve_root_dir(None), Some("/cfg/root"));
        assert_eq!(cfg.resolve_root_dir(Some("/cli/root")), Some("/cli/root"));
        assert_eq!(cfg.resolve_list_file(None), PathBuf::from("cfg.txt"));
        assert_eq!(
            cfg.resolve_list_file(Some(Path::new("other.txt"))),
            PathBuf::from("other.txt")
        );
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"list_file = \"mine.txt\"\n").unwrap();
        f.flush().unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.list_file, "mine.txt");
    }

    #[test]
    fn load_from_invalid_toml_errs() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"list_file = [").unwrap();
        f.flush().unwrap();
        assert!(load_from(f.path()).is_err());
    }
}
