use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "kdramadl.toml";

/// Upper bound for the network timeout in seconds.
pub const MAX_TIMEOUT: u64 = 86_400;

/// Values read from the config file. Every field is optional and only fills flags left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub resolution: Option<String>,
    pub format: Option<String>,
    pub hard_subs: Option<bool>,
    pub hard_subs_style: Option<String>,
    pub ffmpeg: Option<PathBuf>,
    pub folder: Option<PathBuf>,
    pub alt: Option<bool>,
    pub proxy: Option<String>,
    pub timeout: Option<u64>,
    pub auto_quit: Option<bool>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub raw_prompts: Option<bool>,
}

impl FileConfig {
    /// Reads `path`. A missing file yields the empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;

        if let Some(timeout) = config.timeout
            && !(1..=MAX_TIMEOUT).contains(&timeout)
        {
            bail!("timeout must be between 1 and {} seconds, got {}", MAX_TIMEOUT, timeout);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load(&dir.path().join(DEFAULT_CONFIG_PATH)).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn reads_kebab_case_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
resolution = "720p"
format = "mp4"
hard-subs = true
hard-subs-style = "FontSize=22"
proxy = "http://127.0.0.1:8080"
timeout = 30
auto-quit = true
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.resolution.as_deref(), Some("720p"));
        assert_eq!(config.format.as_deref(), Some("mp4"));
        assert_eq!(config.hard_subs, Some(true));
        assert_eq!(config.hard_subs_style.as_deref(), Some("FontSize=22"));
        assert_eq!(config.timeout, Some(30));
        assert_eq!(config.auto_quit, Some(true));
        assert_eq!(config.verbose, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = FileConfig::parse("code = \"ABC\"").unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn timeout_out_of_range() {
        for content in ["timeout = 0", "timeout = 86401"] {
            let err = FileConfig::parse(content).unwrap_err();
            assert!(err.to_string().starts_with("timeout must be between 1 and 86400"), "{content}");
        }
        assert_eq!(FileConfig::parse("timeout = 86400").unwrap().timeout, Some(MAX_TIMEOUT));
    }

    #[test]
    fn malformed_file_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "timeout = ").unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Parsing "));
    }
}
