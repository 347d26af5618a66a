//! YouTube PlaylistItems API types.

use crate::youtube_api::types::{Resource, ResourceKind};
use serde::Deserialize;

/// A `playlistItem` resource, reduced to the parts requested through the `fields` filter.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet>
#[derive(Debug, Deserialize)]
pub struct PlaylistItemSnippet {
    /// The item's title.
    pub title: String,
    /// Identifies the resource (for us, always a video) that the item points to.
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// One video in a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItemRecord {
    pub title: String,
    pub video_id: String,
}

impl PlaylistItemRecord {
    pub fn watch_url(&self) -> String {
        format!("https://youtube.com/watch?v={}", self.video_id)
    }
}

impl Resource for PlaylistItemRecord {
    const KIND: ResourceKind = ResourceKind::PlaylistItems;
    type Wire = PlaylistItem;

    fn from_wire(wire: PlaylistItem) -> Self {
        Self {
            title: wire.snippet.title,
            video_id: wire.snippet.resource_id.video_id,
        }
    }
}
