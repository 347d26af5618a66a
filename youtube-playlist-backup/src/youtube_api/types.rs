//! Shared types and streaming infrastructure for the YouTube API client.

use crate::Error;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

/// An undecoded page, exactly as the API returned it.
pub type RawPage = serde_json::Value;

/// The decoded records of one page, in server order, plus the token for the page after it.
pub type Page<T> = (VecDeque<T>, Option<String>);

/// A lazily fetched, boxed listing of every record of one resource.
pub type Paginated<'a, T> = Pin<Box<dyn Stream<Item = eyre::Result<T>> + Send + 'a>>;

/// The paginated list endpoints this crate reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `playlists.list`, selected by channel.
    Playlists,
    /// `playlistItems.list`, selected by playlist.
    PlaylistItems,
}

impl ResourceKind {
    /// Path of the list endpoint, relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Playlists => "playlists",
            ResourceKind::PlaylistItems => "playlistItems",
        }
    }

    /// Name of the query parameter that carries the selector key.
    pub fn selector_param(self) -> &'static str {
        match self {
            ResourceKind::Playlists => "channelId",
            ResourceKind::PlaylistItems => "playlistId",
        }
    }

    /// Partial-response filter limiting each page to what the decoder reads.
    ///
    /// See: <https://developers.google.com/youtube/v3/getting-started#fields>
    pub fn fields(self) -> &'static str {
        match self {
            ResourceKind::Playlists => "items(id,snippet/title),nextPageToken",
            ResourceKind::PlaylistItems => {
                "items/snippet(title,resourceId/videoId),nextPageToken"
            }
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Playlists => "playlist",
            ResourceKind::PlaylistItems => "playlist item",
        })
    }
}

/// A record type that can be listed page by page.
///
/// Each implementor ties a [`ResourceKind`] to the wire shape of one entry in that endpoint's
/// `items` array and to the record it is reduced to.
pub trait Resource: Sized {
    const KIND: ResourceKind;

    /// One element of the response's `items` array.
    type Wire: DeserializeOwned;

    fn from_wire(wire: Self::Wire) -> Self;
}

/// The common envelope of every `*.list` response.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    items: VecDeque<T>,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

/// Extracts the records and the continuation token from one raw page.
///
/// The token is the only end-of-listing signal: a page with no items but with a token is not
/// the last one.
pub fn decode_page<R: Resource>(page: RawPage) -> Result<Page<R>, Error> {
    let page: ListResponse<R::Wire> =
        serde_json::from_value(page).map_err(|source| Error::Decode {
            kind: R::KIND,
            source,
        })?;
    let records = page.items.into_iter().map(R::from_wire).collect();
    Ok((records, page.next_page_token))
}

type OneFuturePage<'a, F, T> =
    Pin<Box<dyn Future<Output = eyre::Result<(F, Page<T>)>> + 'a + Send>>;

/// A paginated stream that automatically fetches subsequent pages from a YouTube API list endpoint.
///
/// This stream yields items one by one, and only asks for the next page once every item of the
/// current page has been handed out. Only supports forward pagination (no previous page support).
/// Once a page fails to load, the stream ends after yielding that error.
pub struct PagedStream<'a, T, F> {
    /// Current batch of items from the most recent API response
    current_items: VecDeque<T>,
    /// Future for the next page, not polled until `current_items` runs dry
    pending_request: Option<OneFuturePage<'a, F, T>>,
    /// Whether we've reached the end of all available data
    is_done: bool,
}

impl<'a, T, F> PagedStream<'a, T, F> {
    /// Create a new PagedStream that starts at the first page.
    ///
    /// `fetcher` is called with `None` for the first page and with the previous page's token for
    /// every page after that. Nothing is fetched until the stream is first polled.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<Page<T>>> + Send + 'a,
    {
        let first_page = async move {
            let results = fetcher(None).await?;
            Ok((fetcher, results))
        };
        Self {
            pending_request: Some(Box::pin(first_page)),
            current_items: VecDeque::new(),
            is_done: false,
        }
    }
}

impl<'a, T: Unpin, F> Unpin for PagedStream<'a, T, F> {}

impl<'a, T: Unpin, F, Fut> Stream for PagedStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = eyre::Result<Page<T>>> + Send + 'a,
{
    type Item = eyre::Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.is_done {
                return Poll::Ready(None);
            }

            let Some(pending) = self.pending_request.as_mut() else {
                self.is_done = true;
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                    self.current_items.extend(items);

                    if let Some(next_token) = next_token {
                        // set up the next request, but leave it unpolled until this page is drained
                        self.pending_request = Some(Box::pin(async move {
                            let results = fetcher(Some(next_token)).await?;
                            Ok((fetcher, results))
                        }));
                    } else {
                        self.is_done = true;
                        self.pending_request = None;
                    }

                    // an empty page with a token loops straight into the next request
                    continue;
                }
                Poll::Ready(Err(e)) => {
                    self.pending_request = None;
                    self.is_done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::{PlaylistItemRecord, PlaylistRecord};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio_stream::StreamExt;

    type Script = HashMap<Option<String>, Page<u32>>;

    fn page(items: &[u32], next: Option<&str>) -> Page<u32> {
        (items.iter().copied().collect(), next.map(String::from))
    }

    fn script(pages: &[(Option<&str>, Page<u32>)]) -> Script {
        pages
            .iter()
            .map(|(token, page)| (token.map(String::from), page.clone()))
            .collect()
    }

    /// A stream over `pages` that records every token it was asked for.
    fn scripted(
        pages: Script,
    ) -> (
        impl Stream<Item = eyre::Result<u32>>,
        Arc<Mutex<Vec<Option<String>>>>,
    ) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let stream = PagedStream::new(move |token: Option<String>| {
            log.lock().unwrap().push(token.clone());
            let page = pages.get(&token).cloned();
            async move { page.ok_or_else(|| eyre::eyre!("no page for token {token:?}")) }
        });
        (stream, requests)
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let (stream, requests) = scripted(script(&[
            (None, page(&[1, 2], Some("b"))),
            (Some("b"), page(&[3], Some("c"))),
            (Some("c"), page(&[4, 5], None)),
        ]));

        let items: Vec<u32> = stream.map(|r| r.unwrap()).collect().await;

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *requests.lock().unwrap(),
            vec![None, Some("b".to_string()), Some("c".to_string())]
        );
    }

    #[tokio::test]
    async fn single_page_without_token_is_one_request() {
        let (stream, requests) = scripted(script(&[(None, page(&[7, 8], None))]));

        let items: Vec<u32> = stream.map(|r| r.unwrap()).collect().await;

        assert_eq!(items, vec![7, 8]);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_page_with_token_keeps_going() {
        let (stream, requests) = scripted(script(&[
            (None, page(&[], Some("b"))),
            (Some("b"), page(&[], Some("c"))),
            (Some("c"), page(&[9], None)),
        ]));

        let items: Vec<u32> = stream.map(|r| r.unwrap()).collect().await;

        assert_eq!(items, vec![9]);
        assert_eq!(requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn nothing_is_fetched_until_polled_and_pages_load_on_demand() {
        let (stream, requests) = scripted(script(&[
            (None, page(&[1, 2], Some("b"))),
            (Some("b"), page(&[3], None)),
        ]));
        let mut stream = std::pin::pin!(stream);
        assert!(requests.lock().unwrap().is_empty());

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        assert_eq!(stream.next().await.unwrap().unwrap(), 2);
        assert_eq!(requests.lock().unwrap().len(), 1);

        assert_eq!(stream.next().await.unwrap().unwrap(), 3);
        assert_eq!(requests.lock().unwrap().len(), 2);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn failure_ends_the_stream() {
        // the script has no page for "b", so the second fetch fails
        let (stream, requests) = scripted(script(&[(None, page(&[1, 2], Some("b")))]));
        let mut stream = std::pin::pin!(stream);

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        assert_eq!(stream.next().await.unwrap().unwrap(), 2);
        let err = stream.next().await.unwrap().unwrap_err();
        assert!(err.to_string().contains("no page for token"));
        assert!(stream.next().await.is_none());
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn decodes_playlists() {
        let raw = json!({
            "items": [
                { "id": "PL1", "snippet": { "title": "Mix" } },
                { "id": "PL2", "snippet": { "title": "Live sets" } },
            ],
            "nextPageToken": "CAUQAA",
        });

        let (records, next) = decode_page::<PlaylistRecord>(raw).unwrap();

        assert_eq!(
            Vec::from(records),
            vec![
                PlaylistRecord {
                    title: "Mix".into(),
                    id: "PL1".into()
                },
                PlaylistRecord {
                    title: "Live sets".into(),
                    id: "PL2".into()
                },
            ]
        );
        assert_eq!(next.as_deref(), Some("CAUQAA"));
    }

    #[test]
    fn decodes_playlist_items_of_the_last_page() {
        let raw = json!({
            "items": [
                { "snippet": { "title": "A", "resourceId": { "videoId": "v1" } } },
            ],
        });

        let (records, next) = decode_page::<PlaylistItemRecord>(raw).unwrap();

        assert_eq!(
            Vec::from(records),
            vec![PlaylistItemRecord {
                title: "A".into(),
                video_id: "v1".into()
            }]
        );
        assert_eq!(next, None);
    }

    #[test]
    fn empty_page_keeps_its_token() {
        let raw = json!({ "items": [], "nextPageToken": "next" });

        let (records, next) = decode_page::<PlaylistRecord>(raw).unwrap();

        assert!(records.is_empty());
        assert_eq!(next.as_deref(), Some("next"));
    }

    #[test]
    fn missing_fields_are_decode_errors() {
        let raw = json!({ "items": [ { "snippet": { "title": "A" } } ] });

        let err = decode_page::<PlaylistItemRecord>(raw).unwrap_err();

        assert!(matches!(
            err,
            Error::Decode {
                kind: ResourceKind::PlaylistItems,
                ..
            }
        ));

        let err = decode_page::<PlaylistRecord>(json!({ "nextPageToken": "x" })).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                kind: ResourceKind::Playlists,
                ..
            }
        ));
    }

    #[test]
    fn field_hints_include_the_page_token() {
        for kind in [ResourceKind::Playlists, ResourceKind::PlaylistItems] {
            assert!(kind.fields().ends_with(",nextPageToken"), "{kind}");
        }
    }
}
