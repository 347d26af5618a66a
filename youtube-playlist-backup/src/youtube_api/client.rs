//! Core YouTube API client functionality.

use crate::Error;
use crate::youtube_api::{
    playlist_items::PlaylistItemRecord,
    playlists::PlaylistRecord,
    types::{PagedStream, Paginated, RawPage, Resource, ResourceKind, decode_page},
};
use eyre::Context;
use tracing::instrument;

/// Where the YouTube Data API v3 lives.
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Records requested per page; the largest value the list endpoints accept.
const PAGE_SIZE: u32 = 50;

/// Read-only client for the list endpoints of the YouTube Data API v3.
///
/// Requests are sent with the optional API key as the `key` query parameter. Without a key, the
/// API still answers public listings, but the anonymous quota runs out quickly.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    /// HTTP client for API requests
    client: reqwest::Client,
    /// API key appended to every request, if any
    api_key: Option<String>,
    /// Base URL that endpoint paths are joined onto
    base_url: String,
}

impl YouTubeClient {
    /// Creates a new client that talks to the public YouTube API.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for every request
    /// * `api_key` - Optional API key sent along with each request
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: YOUTUBE_API_BASE.to_string(),
        }
    }

    /// Points the client at a different API root, such as a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends a GET request to the YouTube API and checks the status code.
    ///
    /// Any non-success status is turned into [`Error::Http`] carrying the status and the
    /// response body.
    ///
    /// # Returns
    ///
    /// The raw [`reqwest::Response`] for kind-specific decoding.
    #[instrument(skip(self, query_params), level = tracing::Level::TRACE)]
    async fn make_request(
        &self,
        url: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<reqwest::Response> {
        let mut request = self.client.get(url).query(query_params);

        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("send GET request to YouTube API: {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::Http { status, body }.into());
        }

        Ok(response)
    }

    /// Requests a single page of a list endpoint.
    ///
    /// Exactly one request is sent per call. The page comes back undecoded; see
    /// [`decode_page`](crate::youtube_api::decode_page) for turning it into records.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which list endpoint to call
    /// * `selector` - The channel ID for playlists, or the playlist ID for playlist items
    /// * `page_token` - Token from the previous page, or `None` for the first page
    ///
    /// # Errors
    ///
    /// [`Error::Http`] for a non-success response, [`Error::Decode`] if the body is not JSON.
    ///
    /// # API Reference
    ///
    /// * <https://developers.google.com/youtube/v3/docs/playlists/list>
    /// * <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self), level = tracing::Level::DEBUG)]
    pub async fn fetch_page(
        &self,
        kind: ResourceKind,
        selector: &str,
        page_token: Option<&str>,
    ) -> eyre::Result<RawPage> {
        eyre::ensure!(
            !selector.is_empty(),
            "cannot list {kind}s without a {}",
            kind.selector_param()
        );

        let url = format!("{}/{}", self.base_url, kind.endpoint());
        let max_results = PAGE_SIZE.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            (kind.selector_param(), selector),
            ("maxResults", max_results.as_str()),
            ("fields", kind.fields()),
        ];

        if let Some(token) = page_token {
            query_params.push(("pageToken", token));
        }

        let response = self.make_request(&url, &query_params).await?;

        let body = response
            .text()
            .await
            .with_context(|| format!("read {kind} page from YouTube API"))?;

        let page = serde_json::from_str(&body).map_err(|source| Error::Decode { kind, source })?;
        Ok(page)
    }

    /// Returns every record of one listing as a lazy stream.
    ///
    /// Pages are requested one at a time, in the order the server hands out page tokens, and only
    /// once the records of the previous page have all been consumed. Each call starts over from
    /// the first page. The first failing request or malformed page ends the stream with that
    /// error.
    pub fn paginate<R>(&self, selector: impl Into<String>) -> Paginated<'_, R>
    where
        R: Resource + Send + Unpin + 'static,
    {
        let selector = selector.into();
        Box::pin(PagedStream::new(move |page_token: Option<String>| {
            let selector = selector.clone();
            async move {
                let kind = R::KIND;
                let page = self
                    .fetch_page(kind, &selector, page_token.as_deref())
                    .await?;
                let (records, next_page_token) = decode_page::<R>(page)?;

                tracing::debug!(
                    %kind,
                    %selector,
                    returned_items = records.len(),
                    has_next_page = next_page_token.is_some(),
                    "fetched page"
                );

                Ok::<_, eyre::Report>((records, next_page_token))
            }
        }))
    }

    /// Returns a paginated stream of every playlist of a channel.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlists/list>
    pub fn list_playlists(&self, channel_id: impl Into<String>) -> Paginated<'_, PlaylistRecord> {
        self.paginate(channel_id)
    }

    /// Returns a paginated stream of every video in a playlist.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    pub fn list_playlist_items(
        &self,
        playlist_id: impl Into<String>,
    ) -> Paginated<'_, PlaylistItemRecord> {
        self.paginate(playlist_id)
    }
}
