use crate::shell::APP_NAME;
use anyhow::Context as _;
use anyhow::Result;
use ash_types::{AshError, AshResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "config.toml";

/// User settings read from `$XDG_CONFIG_HOME/ash/config.toml`.
/// Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tips: Vec<String>,
    /// Show a tip after every n-th command, 0 disables
    pub tip_interval: usize,
    pub http_timeout_secs: u64,
    /// Word list for `wordle`
    pub words: Vec<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tips: ash_builtin::tips::default_tips(),
            tip_interval: 3,
            http_timeout_secs: 10,
            words: ash_builtin::wordle::default_words(),
        }
    }
}

impl Config {
    pub fn parse(toml_str: &str) -> AshResult<Self> {
        toml::from_str(toml_str).map_err(|e| AshError::Config(e.to_string()))
    }

    fn read_file(name: &str) -> Result<Option<Self>> {
        let xdg_dir =
            xdg::BaseDirectories::with_prefix(APP_NAME).context("failed get xdg directory")?;
        let Some(file_path) = xdg_dir.find_config_file(name) else {
            return Ok(None);
        };
        let toml_str = std::fs::read_to_string(&file_path)
            .with_context(|| format!("failed to read {}", file_path.display()))?;
        Ok(Some(Config::parse(&toml_str)?))
    }

    /// Load the config file, falling back to defaults when it is missing or broken
    pub fn from_file(name: &str) -> Self {
        let config = match Config::read_file(name) {
            Ok(Some(conf)) => conf,
            Ok(None) => Config::default(),
            Err(err) => {
                warn!("ignoring config: {:#}", err);
                Config::default()
            }
        };
        debug!("config: {:?}", config);
        config
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_config() -> Result<()> {
        let config = Config::parse(
            r#"
            tips = ["one", "two"]
            tip_interval = 5
            words = ["apple"]
            "#,
        )?;
        assert_eq!(config.tips, vec!["one", "two"]);
        assert_eq!(config.tip_interval, 5);
        assert_eq!(config.words, vec!["apple"]);
        assert_eq!(config.http_timeout_secs, 10);
        Ok(())
    }

    #[test]
    fn empty_config_is_default() -> Result<()> {
        let config = Config::parse("")?;
        assert_eq!(config.tip_interval, 3);
        assert!(!config.tips.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_config_is_error() {
        let err = Config::parse("tip_interval = \"often\"").unwrap_err();
        assert!(matches!(err, AshError::Config(_)));
    }
}
