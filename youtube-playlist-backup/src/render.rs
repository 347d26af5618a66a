//! Plain-text output of a channel backup.

use crate::backup::PlaylistContents;
use eyre::Context;
use std::io::Write;
use tokio_stream::{Stream, StreamExt};

/// Writes each playlist as it arrives: a blank line, the title, a blank line, then one
/// `<title> - <url>` line per video.
///
/// Output is flushed after every playlist, so whatever was written before a failing request
/// stays visible.
pub async fn write_backup<'a, S, W>(playlists: S, out: &mut W) -> eyre::Result<()>
where
    S: Stream<Item = eyre::Result<PlaylistContents<'a>>>,
    W: Write,
{
    let mut playlists = std::pin::pin!(playlists);
    while let Some(playlist) = playlists.next().await {
        let PlaylistContents { title, mut items } = playlist.context("list playlists")?;

        writeln!(out)?;
        writeln!(out, "{title}")?;
        writeln!(out)?;

        while let Some(item) = items.next().await {
            let item = item.with_context(|| format!("list videos of playlist {title:?}"))?;
            writeln!(out, "{} - {}", item.title, item.watch_url())?;
        }

        out.flush().context("flush output")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::youtube_api::{Paginated, PlaylistItemRecord};
    use pretty_assertions::assert_eq;

    fn items(
        records: Vec<eyre::Result<PlaylistItemRecord>>,
    ) -> Paginated<'static, PlaylistItemRecord> {
        Box::pin(tokio_stream::iter(records))
    }

    fn video(title: &str, video_id: &str) -> eyre::Result<PlaylistItemRecord> {
        Ok(PlaylistItemRecord {
            title: title.into(),
            video_id: video_id.into(),
        })
    }

    fn playlist(
        title: &str,
        records: Vec<eyre::Result<PlaylistItemRecord>>,
    ) -> eyre::Result<PlaylistContents<'static>> {
        Ok(PlaylistContents {
            title: title.into(),
            items: items(records),
        })
    }

    #[tokio::test]
    async fn renders_each_playlist_with_its_videos() {
        let playlists = tokio_stream::iter(vec![
            playlist(
                "Mix",
                vec![video("A", "v1"), video("B", "v2"), video("C", "v3")],
            ),
            playlist("Empty", vec![]),
        ]);

        let mut out = Vec::new();
        write_backup(playlists, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nMix\n\n\
             A - https://youtube.com/watch?v=v1\n\
             B - https://youtube.com/watch?v=v2\n\
             C - https://youtube.com/watch?v=v3\n\
             \nEmpty\n\n"
        );
    }

    #[tokio::test]
    async fn keeps_earlier_output_when_a_listing_fails() {
        let failure = Err(eyre::Report::new(Error::Http {
            status: http::StatusCode::FORBIDDEN,
            body: "quotaExceeded".into(),
        }));
        let playlists = tokio_stream::iter(vec![
            playlist("First", vec![video("A", "v1")]),
            playlist("Second", vec![video("B", "v2"), failure]),
            playlist("Never", vec![video("C", "v3")]),
        ]);

        let mut out = Vec::new();
        let err = write_backup(playlists, &mut out).await.unwrap_err();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nFirst\n\nA - https://youtube.com/watch?v=v1\n\
             \nSecond\n\nB - https://youtube.com/watch?v=v2\n"
        );
        assert!(matches!(
            err.chain().find_map(|e| e.downcast_ref::<Error>()),
            Some(Error::Http { status, .. }) if *status == http::StatusCode::FORBIDDEN
        ));
    }
}
