//! Command-line interface.

use crate::config::Config;
use crate::{BackupOptions, Error};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Print every playlist of a YouTube channel, with links to all of its videos.
#[derive(Debug, Parser)]
#[command(name = "youtube-playlist-backup", version, about)]
pub struct Cli {
    /// ID of the channel to back up [default: `channel_id` from the config file]
    pub channel_id: Option<String>,

    /// Read settings from FILE instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The configuration file this invocation should use.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Combines the command line with the configuration file.
    ///
    /// A channel given on the command line takes precedence over the one in the file. An empty
    /// channel argument is rejected rather than treated as absent.
    pub fn resolve(self, config: Config) -> Result<BackupOptions, Error> {
        if self.channel_id.as_deref() == Some("") {
            return Err(Error::Usage("channel ID must not be empty".to_string()));
        }

        let channel_id = self
            .channel_id
            .or(config.channel_id)
            .ok_or_else(|| {
                Error::Usage(
                    "no channel given; pass a channel ID or set `channel_id` in the config file"
                        .to_string(),
                )
            })?;

        Ok(BackupOptions {
            channel_id,
            api_key: config.api_key,
        })
    }

    /// Reports an [`Error::Usage`] the way clap reports a missing argument: on stderr, with the
    /// usage line, and with exit code 2.
    pub fn usage_error(msg: impl std::fmt::Display) -> clap::Error {
        Cli::command().error(ErrorKind::MissingRequiredArgument, msg)
    }
}
