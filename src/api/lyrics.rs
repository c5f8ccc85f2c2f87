use crate::api::{request_timeout, ApiError, HTTP_CLIENT};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

const METING_ENDPOINT: &str = "https://api.injahow.cn/meting/";
const LRCLIB_SEARCH_ENDPOINT: &str = "https://lrclib.net/api/search";

pub const DEFAULT_LYRICS_PROVIDER_KEYS: [&str; 2] = ["netease", "lrclib"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsProvider {
    Netease,
    Lrclib,
}

impl LyricsProvider {
    pub fn label(self) -> &'static str {
        match self {
            Self::Netease => "Netease",
            Self::Lrclib => "LRCLIB",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "netease" | "meting" => Some(Self::Netease),
            "lrclib" | "lrc-lib" | "lrlib" => Some(Self::Lrclib),
            _ => None,
        }
    }
}

pub fn default_lyrics_provider_order() -> Vec<String> {
    DEFAULT_LYRICS_PROVIDER_KEYS
        .iter()
        .map(|provider| provider.to_string())
        .collect()
}

pub fn normalize_lyrics_provider_order(order: &[String]) -> Vec<LyricsProvider> {
    let mut normalized = Vec::new();

    for key in order {
        let Some(provider) = LyricsProvider::from_key(key) else {
            continue;
        };
        if !normalized.contains(&provider) {
            normalized.push(provider);
        }
    }

    for key in DEFAULT_LYRICS_PROVIDER_KEYS {
        if let Some(provider) = LyricsProvider::from_key(key) {
            if !normalized.contains(&provider) {
                normalized.push(provider);
            }
        }
    }

    normalized
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset from the start of the track, in seconds.
    pub time: f64,
    pub text: String,
}

/// First hit of a Meting search, kept only when it links to an LRC file.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct MetingTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub lrc: Option<String>,
}

impl MetingTrack {
    pub fn cover_url(&self) -> Option<&str> {
        self.pic.as_deref().map(str::trim).filter(|pic| !pic.is_empty())
    }

    fn lrc_url(&self) -> Option<&str> {
        self.lrc.as_deref().map(str::trim).filter(|lrc| !lrc.is_empty())
    }
}

pub async fn search_meting(query: &str, timeout_seconds: u32) -> Result<Option<MetingTrack>, ApiError> {
    let response = HTTP_CLIENT
        .get(METING_ENDPOINT)
        .query(&[("type", "search"), ("server", "netease"), ("content", query)])
        .timeout(request_timeout(timeout_seconds))
        .send()
        .await?;
    ApiError::check_status(&response)?;

    let body = response.text().await?;
    first_meting_track(&body)
}

fn first_meting_track(body: &str) -> Result<Option<MetingTrack>, ApiError> {
    let tracks: Vec<MetingTrack> = serde_json::from_str(body)?;
    Ok(tracks
        .into_iter()
        .next()
        .filter(|track| track.lrc_url().is_some()))
}

pub async fn fetch_meting_lyrics(
    track: &MetingTrack,
    timeout_seconds: u32,
) -> Result<Vec<LyricLine>, ApiError> {
    let Some(lrc_url) = track.lrc_url() else {
        return Ok(Vec::new());
    };

    let response = HTTP_CLIENT
        .get(lrc_url)
        .timeout(request_timeout(timeout_seconds))
        .send()
        .await?;
    if !response.status().is_success() {
        debug!(status = response.status().as_u16(), "meting lrc unavailable");
        return Ok(Vec::new());
    }

    let text = response.text().await?;
    Ok(parse_lrc(&text))
}

#[derive(Debug, Clone, Deserialize)]
struct LrclibResponse {
    #[serde(default, rename = "trackName")]
    track_name: String,
    #[serde(default, rename = "artistName")]
    artist_name: String,
    #[serde(default, rename = "syncedLyrics")]
    synced_lyrics: Option<String>,
}

pub async fn fetch_lrclib_lyrics(
    title: &str,
    artist: &str,
    timeout_seconds: u32,
) -> Result<Vec<LyricLine>, ApiError> {
    let mut params = vec![("track_name", title)];
    if !artist.trim().is_empty() {
        params.push(("artist_name", artist));
    }

    let response = HTTP_CLIENT
        .get(LRCLIB_SEARCH_ENDPOINT)
        .query(&params)
        .timeout(request_timeout(timeout_seconds))
        .send()
        .await?;
    ApiError::check_status(&response)?;

    let body = response.text().await?;
    best_lrclib_lyrics(&body, title, artist)
}

fn best_lrclib_lyrics(body: &str, title: &str, artist: &str) -> Result<Vec<LyricLine>, ApiError> {
    let candidates: Vec<LrclibResponse> = serde_json::from_str(body)?;
    let best = candidates
        .into_iter()
        .filter_map(|entry| {
            let lines = parse_lrc(entry.synced_lyrics.as_deref().unwrap_or_default());
            if lines.is_empty() {
                return None;
            }
            let score = score_match(&entry.track_name, &entry.artist_name, title, artist);
            Some((lines, score))
        })
        .max_by_key(|(_, score)| *score)
        .map(|(lines, _)| lines);

    Ok(best.unwrap_or_default())
}

fn score_match(found_title: &str, found_artist: &str, title: &str, artist: &str) -> i32 {
    let found_title = normalize_for_match(found_title);
    let found_artist = normalize_for_match(found_artist);
    let title = normalize_for_match(title);
    let artist = normalize_for_match(artist);

    let mut score = 0;

    if found_title == title {
        score += 10;
    } else if found_title.contains(&title) || title.contains(&found_title) {
        score += 6;
    }

    if !artist.is_empty() {
        if found_artist == artist {
            score += 8;
        } else if found_artist.contains(&artist) || artist.contains(&found_artist) {
            score += 4;
        }
    }

    score
}

/// Parse LRC text into time-ordered lines.
///
/// Every leading `[mm:ss.xx]` tag of a line yields an entry; lines without text or
/// without a timestamp (metadata such as `[ar:...]`) are skipped.
pub fn parse_lrc(raw_lrc: &str) -> Vec<LyricLine> {
    let mut lines = Vec::<LyricLine>::new();

    for raw_line in raw_lrc.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut timestamps = Vec::<f64>::new();
        let mut rest = trimmed;

        while rest.starts_with('[') {
            let Some(end_index) = rest.find(']') else {
                break;
            };
            let Some(value) = parse_lrc_timestamp(&rest[1..end_index]) else {
                break;
            };
            timestamps.push(value);
            rest = rest[end_index + 1..].trim_start();
        }

        if timestamps.is_empty() {
            continue;
        }

        let text = rest.trim();
        if text.is_empty() {
            continue;
        }

        for timestamp in timestamps {
            lines.push(LyricLine {
                time: timestamp,
                text: text.to_string(),
            });
        }
    }

    lines.sort_by(|left, right| left.time.partial_cmp(&right.time).unwrap_or(Ordering::Equal));

    lines
}

fn parse_lrc_timestamp(token: &str) -> Option<f64> {
    let mut segments = token.split(':').collect::<Vec<_>>();
    if segments.len() < 2 || segments.len() > 3 {
        return None;
    }

    let seconds_segment = segments.pop()?.trim().replace(',', ".");
    if seconds_segment.is_empty() || !seconds_segment.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let seconds = seconds_segment.parse::<f64>().ok()?;

    let minutes = segments.pop()?.trim().parse::<u32>().ok()? as f64;
    let hours = match segments.pop() {
        Some(hours_segment) => hours_segment.trim().parse::<u32>().ok()? as f64,
        None => 0.0,
    };

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

pub(crate) fn compact_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_for_match(value: &str) -> String {
    compact_whitespace(value)
        .to_lowercase()
        .replace("feat.", "")
        .replace("ft.", "")
        .replace(['(', ')', '[', ']'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(lines: &[LyricLine]) -> Vec<f64> {
        lines.iter().map(|line| line.time).collect()
    }

    #[test]
    fn parses_hundredths_and_milliseconds() {
        let lines = parse_lrc("[00:01.50]first\n[01:02.345]second");
        assert_eq!(times(&lines), vec![1.5, 62.345]);
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "second");
    }

    #[test]
    fn repeats_text_for_every_tag_and_sorts() {
        let lines = parse_lrc("[00:30.00][00:10.00]chorus\n[00:20.00]verse");
        assert_eq!(times(&lines), vec![10.0, 20.0, 30.0]);
        assert_eq!(lines[0].text, "chorus");
        assert_eq!(lines[1].text, "verse");
        assert_eq!(lines[2].text, "chorus");
    }

    #[test]
    fn skips_metadata_and_empty_lines() {
        let raw = "[ar:Someone]\n[ti:Song]\n[offset:500]\n[00:05.00]\n\n[00:06.00]  hello  \nno tag";
        let lines = parse_lrc(raw);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "hello");
        assert_eq!(lines[0].time, 6.0);
    }

    #[test]
    fn keeps_bracketed_text_after_timestamps() {
        let lines = parse_lrc("[00:12.00][Chorus] la la");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "[Chorus] la la");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_lrc("").is_empty());
    }

    #[test]
    fn provider_order_normalization() {
        let order = vec!["LRCLIB".to_string(), "bogus".to_string(), "lrclib".to_string()];
        assert_eq!(
            normalize_lyrics_provider_order(&order),
            vec![LyricsProvider::Lrclib, LyricsProvider::Netease]
        );
        assert_eq!(
            normalize_lyrics_provider_order(&[]),
            vec![LyricsProvider::Netease, LyricsProvider::Lrclib]
        );
    }

    #[test]
    fn meting_track_requires_lrc() {
        let with_lrc = r#"[{"name":"A","artist":"B","pic":"https://p/1.jpg","lrc":"https://l/1"},{"name":"C"}]"#;
        let track = first_meting_track(with_lrc).unwrap().unwrap();
        assert_eq!(track.name, "A");
        assert_eq!(track.cover_url(), Some("https://p/1.jpg"));

        let without_lrc = r#"[{"name":"A","pic":"https://p/1.jpg","lrc":""}]"#;
        assert_eq!(first_meting_track(without_lrc).unwrap(), None);
        assert_eq!(first_meting_track("[]").unwrap(), None);
        assert!(first_meting_track(r#"{"error":"limit"}"#).is_err());
    }

    #[test]
    fn lrclib_prefers_best_scored_synced_entry() {
        let body = r#"[
            {"trackName":"Other","artistName":"Nobody","syncedLyrics":"[00:01.00]wrong"},
            {"trackName":"Song","artistName":"Band","syncedLyrics":"[00:02.00]right"},
            {"trackName":"Song","artistName":"Band","syncedLyrics":null}
        ]"#;
        let lines = best_lrclib_lyrics(body, "Song", "Band").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "right");
    }
}
