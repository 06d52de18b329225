use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::picker::ClampPolicy;
use crate::source::{remote, AlQuranClient, ChapterFiles, SourceKind, VerseSource};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_NARROW_WIDTH: u16 = 100;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub source: Option<String>,
    pub data_dir: Option<String>,
    pub api_base_url: Option<String>,
    pub clamp_policy: Option<String>,
    pub narrow_width: Option<u16>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            source: Some(SourceKind::Remote.as_str().to_string()),
            data_dir: None,
            api_base_url: None,
            clamp_policy: None,
            narrow_width: None,
        }
    }

    /// Load from the user config directory. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("ayat").join("config.json"))
    }

    pub fn source_kind(&self) -> Result<SourceKind> {
        match self.source.as_deref() {
            None => Ok(SourceKind::Remote),
            Some(s) => SourceKind::from_str(s)
                .ok_or_else(|| anyhow!("Unknown verse source '{}' (expected remote or local)", s)),
        }
    }

    pub fn clamp(&self) -> Result<ClampPolicy> {
        match self.clamp_policy.as_deref() {
            None => Ok(ClampPolicy::default()),
            Some(s) => ClampPolicy::from_str(s)
                .ok_or_else(|| anyhow!("Unknown clamp policy '{}' (expected max or first)", s)),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    pub fn narrow_width(&self) -> u16 {
        self.narrow_width.unwrap_or(DEFAULT_NARROW_WIDTH)
    }

    pub fn build_source(&self) -> Result<VerseSource> {
        Ok(match self.source_kind()? {
            SourceKind::Remote => VerseSource::Remote(AlQuranClient::new(
                self.api_base_url.as_deref().unwrap_or(remote::DEFAULT_API_BASE),
            )),
            SourceKind::Local => VerseSource::Local(ChapterFiles::new(self.data_dir())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.source_kind().unwrap(), SourceKind::Remote);
        assert_eq!(config.clamp().unwrap(), ClampPolicy::ToMaximum);
        assert_eq!(config.data_dir(), PathBuf::from("data"));
        assert_eq!(config.narrow_width(), DEFAULT_NARROW_WIDTH);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"source": "local", "data_dir": "/srv/quran", "clamp_policy": "first"}"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source_kind().unwrap(), SourceKind::Local);
        assert_eq!(config.clamp().unwrap(), ClampPolicy::ToFirst);
        assert_eq!(config.api_base_url, None);

        match config.build_source().unwrap() {
            VerseSource::Local(files) => assert_eq!(files.root(), Path::new("/srv/quran")),
            other => panic!("expected local source, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_values_are_errors() {
        let config = Config {
            source: Some("carrier-pigeon".to_string()),
            clamp_policy: Some("middle".to_string()),
            ..Config::new()
        };
        assert!(config.source_kind().is_err());
        assert!(config.build_source().is_err());
        assert!(config.clamp().is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ source: remote").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
