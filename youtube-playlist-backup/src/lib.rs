//! Back up the playlists of a YouTube channel as plain text.
//!
//! [`aggregate_all`] lists a channel's playlists and pairs each with a lazy listing of its
//! videos, and [`render::write_backup`] prints them as they arrive. Nothing is fetched ahead of
//! what has been printed, so output starts after the first page of playlists and memory use does
//! not grow with the size of the channel.

use crate::youtube_api::YouTubeClient;
use eyre::Context;
use std::io::Write;

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod youtube_api;

pub use backup::{PlaylistContents, aggregate_all};
pub use error::Error;

/// Everything one run needs, resolved from the command line and the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOptions {
    pub channel_id: String,
    pub api_key: Option<String>,
}

impl BackupOptions {
    /// Builds a client for the public YouTube API that sends this run's API key.
    pub fn client(&self) -> eyre::Result<YouTubeClient> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .context("build HTTP client")?;
        Ok(YouTubeClient::new(http, self.api_key.clone()))
    }
}

/// Writes the backup of `channel_id` to `out`, one playlist at a time.
#[tracing::instrument(skip(client, out))]
pub async fn backup_channel<W: Write>(
    client: &YouTubeClient,
    channel_id: &str,
    out: &mut W,
) -> eyre::Result<()> {
    render::write_backup(aggregate_all(client, channel_id), out)
        .await
        .with_context(|| format!("back up channel {channel_id}"))
}
