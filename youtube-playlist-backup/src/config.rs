//! The on-disk configuration file.
//!
//! The file lives at `<config dir>/youtube-playlist-backup/config.toml` and knows two optional
//! keys, `api_key` and `channel_id`. On first run the directory is created and a template with
//! both keys commented out is written in its place.

use crate::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory under the platform's configuration directory that holds our file.
pub const APP_DIR: &str = "youtube-playlist-backup";

pub const CONFIG_FILE: &str = "config.toml";

const TEMPLATE: &str = r#"# Configuration for youtube-playlist-backup.

# An API key is not strictly necessary. However, note that there is an upper
# limit on how many requests you can make without one.
# api_key = "..."

# The channel to back up when none is given on the command line.
# channel_id = "..."
"#;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// YouTube Data API key.
    pub api_key: Option<String>,
    /// Channel used when none is passed on the command line.
    pub channel_id: Option<String>,
}

impl Config {
    /// The default location of the configuration file.
    ///
    /// Falls back to the current directory on platforms without a configuration directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Reads the configuration at `path`, writing the template there first if nothing exists.
    ///
    /// A freshly written template has every key commented out, so it yields an empty
    /// configuration.
    pub async fn load_or_init(path: &Path) -> Result<Self, Error> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                write_template(path).await?;
                return Ok(Self::default());
            }
            Err(e) => return Err(config_error("read", path, e)),
        };
        let config = Self::parse(&contents).map_err(|e| config_error("parse", path, e))?;

        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(contents)?;
        Ok(Self {
            api_key: config.api_key.filter(|key| !key.is_empty()),
            channel_id: config.channel_id.filter(|id| !id.is_empty()),
        })
    }
}

async fn write_template(path: &Path) -> Result<(), Error> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| config_error("create configuration directory", dir, e))?;
    }

    tokio::fs::write(path, TEMPLATE)
        .await
        .map_err(|e| config_error("write configuration template", path, e))?;

    tracing::info!(path = %path.display(), "created configuration template");
    Ok(())
}

fn config_error(
    action: &'static str,
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> Error {
    Error::Config {
        action,
        path: path.to_path_buf(),
        source: source.into(),
    }
}
