//! Joins a channel's playlists with the videos in each of them.

use crate::youtube_api::{Paginated, PlaylistItemRecord, YouTubeClient};
use tokio_stream::{Stream, StreamExt};

/// One playlist and a not-yet-fetched listing of its videos.
pub struct PlaylistContents<'a> {
    pub title: String,
    /// Nothing is requested for this playlist until this stream is polled.
    pub items: Paginated<'a, PlaylistItemRecord>,
}

impl std::fmt::Debug for PlaylistContents<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistContents")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Lists every playlist of `channel_id`, each paired with a lazy listing of its items.
///
/// Playlists come out in the order the API returns them. Item listings are independent of one
/// another and of the playlist stream, so a consumer that drains each playlist's items before
/// asking for the next playlist keeps exactly one request in flight at a time, and never holds
/// more than one page of either listing in memory.
pub fn aggregate_all<'a>(
    client: &'a YouTubeClient,
    channel_id: &str,
) -> impl Stream<Item = eyre::Result<PlaylistContents<'a>>> + Send + use<'a> {
    client
        .list_playlists(channel_id)
        .map(move |playlist| -> eyre::Result<PlaylistContents<'a>> {
            let playlist = playlist?;
            tracing::trace!(playlist_id = playlist.id, title = playlist.title, "found playlist");
            Ok(PlaylistContents {
                items: client.list_playlist_items(playlist.id),
                title: playlist.title,
            })
        })
}
