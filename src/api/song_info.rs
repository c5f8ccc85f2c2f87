use crate::api::artwork::resolve_cover;
use crate::api::lyrics::{
    compact_whitespace, fetch_lrclib_lyrics, fetch_meting_lyrics, normalize_lyrics_provider_order,
    search_meting, LyricLine, LyricsProvider, MetingTrack,
};
use crate::api::{ApiError, Song};
use crate::cache::{cached_song_info, store_song_info};
use futures_util::future::join;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Cover and lyrics resolved for one song. Either may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SongInfo {
    pub cover: String,
    pub lyrics: Vec<LyricLine>,
}

const UNKNOWN_ARTIST_ZH: &str = "未知艺术家";
const UNKNOWN_ASCII: &str = "unknown";

/// `"{title} {artist}"` without placeholder artist names.
pub fn build_search_query(song: &Song) -> String {
    let combined = format!("{} {}", song.title, song.artist).replace(UNKNOWN_ARTIST_ZH, "");
    compact_whitespace(&remove_ascii_case_insensitive(&combined, UNKNOWN_ASCII))
}

fn remove_ascii_case_insensitive(haystack: &str, needle: &str) -> String {
    let bytes = haystack.as_bytes();
    let needle = needle.as_bytes();
    let mut output = String::with_capacity(haystack.len());
    let mut start = 0;
    let mut index = 0;

    // ASCII needles never match inside a multi-byte UTF-8 sequence, so byte
    // offsets found here are always char boundaries.
    while index + needle.len() <= bytes.len() {
        if bytes[index..index + needle.len()].eq_ignore_ascii_case(needle) {
            output.push_str(&haystack[start..index]);
            index += needle.len();
            start = index;
        } else {
            index += 1;
        }
    }
    output.push_str(&haystack[start..]);
    output
}

/// Resolve cover art and lyrics for `song`, consulting the cache first.
///
/// Network failures are logged and treated as "nothing found"; the result, empty or
/// not, is cached under the song id.
pub async fn resolve_song_info(
    song: &Song,
    provider_order: &[String],
    timeout_seconds: u32,
) -> SongInfo {
    if let Some(cached) = cached_song_info(&song.id) {
        debug!(song_id = %song.id, "song info cache hit");
        return cached;
    }

    let query = build_search_query(song);
    let (itunes_cover, meting) = join(
        resolve_cover(&query, &song.title, timeout_seconds),
        search_meting(&query, timeout_seconds),
    )
    .await;

    let meting = match meting {
        Ok(Some(track)) => {
            debug!(track = %track.name, artist = %track.artist, "meting match");
            Some(track)
        }
        Ok(None) => None,
        Err(error) => {
            debug!(%error, "meting search failed");
            None
        }
    };

    let lyrics = resolve_lyrics(song, meting.as_ref(), provider_order, timeout_seconds).await;
    let cover = combine_cover(itunes_cover, meting.as_ref());

    info!(
        song_id = %song.id,
        has_cover = !cover.is_empty(),
        lyric_lines = lyrics.len(),
        "song info resolved"
    );

    let info = SongInfo { cover, lyrics };
    store_song_info(&song.id, info.clone());
    info
}

async fn resolve_lyrics(
    song: &Song,
    meting: Option<&MetingTrack>,
    provider_order: &[String],
    timeout_seconds: u32,
) -> Vec<LyricLine> {
    let artist = remove_ascii_case_insensitive(&song.artist.replace(UNKNOWN_ARTIST_ZH, ""), UNKNOWN_ASCII);
    let artist = compact_whitespace(&artist);

    for provider in normalize_lyrics_provider_order(provider_order) {
        let result = match provider {
            LyricsProvider::Netease => match meting {
                Some(track) => fetch_meting_lyrics(track, timeout_seconds).await,
                None => Ok(Vec::new()),
            },
            LyricsProvider::Lrclib => fetch_lrclib_lyrics(&song.title, &artist, timeout_seconds).await,
        };

        if let Some(lines) = accept_lyrics(provider, result) {
            return lines;
        }
    }

    Vec::new()
}

/// The iTunes cover wins; the Meting picture only fills in when iTunes found nothing.
fn combine_cover(itunes_cover: Option<String>, meting: Option<&MetingTrack>) -> String {
    itunes_cover
        .filter(|cover| !cover.trim().is_empty())
        .or_else(|| meting.and_then(MetingTrack::cover_url).map(str::to_string))
        .unwrap_or_default()
}

/// Non-empty lyrics from one provider, or `None` so the next provider is tried.
fn accept_lyrics(
    provider: LyricsProvider,
    result: Result<Vec<LyricLine>, ApiError>,
) -> Option<Vec<LyricLine>> {
    match result {
        Ok(lines) if !lines.is_empty() => Some(lines),
        Ok(_) => {
            debug!(provider = provider.label(), "no lyrics");
            None
        }
        Err(error) => {
            warn!(provider = provider.label(), %error, "lyrics lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    fn line(time: f64, text: &str) -> LyricLine {
        LyricLine {
            time,
            text: text.to_string(),
        }
    }

    fn meting_with_pic(pic: Option<&str>) -> MetingTrack {
        MetingTrack {
            name: "晴天".to_string(),
            pic: pic.map(str::to_string),
            lrc: Some("https://lrc.example/1".to_string()),
            ..MetingTrack::default()
        }
    }

    fn song(title: &str, artist: &str) -> Song {
        Song {
            id: "1".to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            ..Song::default()
        }
    }

    #[test]
    fn query_joins_title_and_artist() {
        assert_eq!(build_search_query(&song("晴天", "周杰伦")), "晴天 周杰伦");
    }

    #[test]
    fn query_strips_placeholder_artists() {
        assert_eq!(build_search_query(&song("晴天", "未知艺术家")), "晴天");
        assert_eq!(build_search_query(&song("Track", "UNKNOWN")), "Track");
        assert_eq!(build_search_query(&song("Track", "Unknown Artist")), "Track Artist");
        assert_eq!(build_search_query(&song("  ", "unknown")), "");
    }

    #[test]
    fn removal_is_case_insensitive_and_utf8_safe() {
        assert_eq!(remove_ascii_case_insensitive("歌unKnown曲", "unknown"), "歌曲");
        assert_eq!(remove_ascii_case_insensitive("unknownunknown", "unknown"), "");
        assert_eq!(remove_ascii_case_insensitive("unknow", "unknown"), "unknow");
    }

    #[test]
    fn itunes_cover_wins_over_meting_pic() {
        let meting = meting_with_pic(Some("https://meting.example/pic.jpg"));
        assert_eq!(
            combine_cover(Some("https://itunes.example/1200x1200bb.jpg".to_string()), Some(&meting)),
            "https://itunes.example/1200x1200bb.jpg"
        );
    }

    #[test]
    fn meting_pic_fills_in_without_itunes_cover() {
        let meting = meting_with_pic(Some("https://meting.example/pic.jpg"));
        assert_eq!(combine_cover(None, Some(&meting)), "https://meting.example/pic.jpg");
        assert_eq!(combine_cover(Some("  ".to_string()), Some(&meting)), "https://meting.example/pic.jpg");
        assert_eq!(combine_cover(None, Some(&meting_with_pic(None))), "");
        assert_eq!(combine_cover(None, None), "");
    }

    #[test]
    fn lyrics_fall_through_empty_and_failed_providers() {
        let mut tried = Vec::new();
        let results = vec![
            (LyricsProvider::Netease, Ok(Vec::new())),
            (LyricsProvider::Lrclib, Err(ApiError::Status(503))),
            (LyricsProvider::Lrclib, Ok(vec![line(1.0, "found")])),
            (LyricsProvider::Netease, Ok(vec![line(2.0, "never reached")])),
        ];

        let lines = results
            .into_iter()
            .enumerate()
            .find_map(|(index, (provider, result))| {
                tried.push(index);
                accept_lyrics(provider, result)
            })
            .unwrap_or_default();

        assert_eq!(lines, vec![line(1.0, "found")]);
        assert_eq!(tried, vec![0, 1, 2]);
    }

    #[test]
    fn cached_info_is_returned_without_a_lookup() {
        let song = Song {
            id: "cached-song-info".to_string(),
            title: "Cached".to_string(),
            ..Song::default()
        };
        let info = SongInfo {
            cover: "https://cover.example/c.jpg".to_string(),
            lyrics: vec![line(0.5, "hello")],
        };
        store_song_info(&song.id, info.clone());

        let order = crate::api::default_lyrics_provider_order();
        let resolved = resolve_song_info(&song, &order, 6).now_or_never();
        assert_eq!(resolved, Some(info));
    }
}
