//! Read-only client for the playlist endpoints of the YouTube Data API v3.
//!
//! Two list endpoints are used, and both paginate the same way: each response carries up to 50
//! entries in `items` and, unless it is the last page, a `nextPageToken` to pass back as
//! `pageToken` on the following request.
//!
//! - [`PlaylistRecord`]s come from `playlists.list`, selected by channel ID.
//! - [`PlaylistItemRecord`]s come from `playlistItems.list`, selected by playlist ID.
//!
//! [`YouTubeClient::paginate`] turns either endpoint into a [`Paginated`] stream that fetches
//! pages on demand.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tokio_stream::StreamExt;
//! use youtube_playlist_backup::youtube_api::YouTubeClient;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new(reqwest::Client::new(), None);
//!
//! let mut playlists = client.list_playlists("UC_x5XG1OV2P6uZZ5FSM9Ttw");
//! while let Some(playlist) = playlists.next().await {
//!     let playlist = playlist?;
//!     println!("{} ({})", playlist.title, playlist.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod playlist_items;
pub mod playlists;
pub mod types;

pub use client::{YOUTUBE_API_BASE, YouTubeClient};
pub use types::{PagedStream, Paginated, RawPage, Resource, ResourceKind, decode_page};

pub use playlist_items::{PlaylistItem, PlaylistItemRecord, PlaylistItemSnippet, ResourceId};
pub use playlists::{Playlist, PlaylistRecord, PlaylistSnippet};
