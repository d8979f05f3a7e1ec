use crate::error::{AppError, Result};
use autoemail_common::OverlapPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 分類エンドポイントの既定値
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/process";

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "AUTOEMAIL_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub overlap_policy: OverlapPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("autoemail").join("config.json"))
    }

    /// 送信先の決定（フラグ > 環境変数 > 設定ファイル）
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> String {
        if let Some(endpoint) = flag.filter(|e| !e.trim().is_empty()) {
            return endpoint.trim().to_string();
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                return endpoint.trim().to_string();
            }
        }
        self.endpoint.clone()
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        let endpoint = endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "エンドポイントは http:// または https:// で始めてください: {}",
                endpoint
            )));
        }
        self.endpoint = endpoint.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.overlap_policy, OverlapPolicy::Reject);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            endpoint: "http://example.test/process".into(),
            overlap_policy: OverlapPolicy::Allow,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"overlap_policy": "allow"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.overlap_policy, OverlapPolicy::Allow);
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = Config::default();
        assert_eq!(
            config.resolve_endpoint(Some(" http://flag.test/process ")),
            "http://flag.test/process"
        );
    }

    #[test]
    fn test_set_endpoint_validates_scheme() {
        let mut config = Config::default();
        assert!(config.set_endpoint("ftp://x".into()).is_err());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        config.set_endpoint("https://api.test/process".into()).unwrap();
        assert_eq!(config.endpoint, "https://api.test/process");
    }
}
