//! Failures that callers may want to tell apart.
//!
//! Everything in this crate returns [`eyre::Result`]; the variants below are carried inside the
//! [`eyre::Report`] and can be recovered with [`eyre::Report::downcast_ref`].

use crate::youtube_api::ResourceKind;
use http::StatusCode;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file could not be set up or read.
    #[error("could not {action} {}", .path.display())]
    Config {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The program was invoked in a way that leaves it nothing to do.
    #[error("{0}")]
    Usage(String),

    /// The YouTube API answered with a non-success status code.
    #[error("YouTube API request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// A page came back without the fields we asked for.
    #[error("malformed {kind} page")]
    Decode {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },
}
