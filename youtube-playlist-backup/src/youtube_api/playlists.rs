//! YouTube Playlists API types.

use crate::youtube_api::types::{Resource, ResourceKind};
use serde::Deserialize;

/// A `playlist` resource, reduced to the parts requested through the `fields` filter.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists#resource>
#[derive(Debug, Deserialize)]
pub struct Playlist {
    /// The ID that YouTube uses to uniquely identify the playlist.
    pub id: String,
    pub snippet: PlaylistSnippet,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlists#snippet>
#[derive(Debug, Deserialize)]
pub struct PlaylistSnippet {
    /// The playlist's title.
    pub title: String,
}

/// One playlist of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRecord {
    pub title: String,
    pub id: String,
}

impl Resource for PlaylistRecord {
    const KIND: ResourceKind = ResourceKind::Playlists;
    type Wire = Playlist;

    fn from_wire(wire: Playlist) -> Self {
        Self {
            title: wire.snippet.title,
            id: wire.id,
        }
    }
}
