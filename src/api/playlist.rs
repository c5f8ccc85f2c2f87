use crate::api::models::{PlaylistResponse, RawSong, Song};
use crate::api::{request_timeout, ApiError, HTTP_CLIENT};
use tracing::{debug, info};

/// Fetch the remote playlist and resolve every entry to a playable song.
pub async fn fetch_playlist(
    endpoint: &str,
    audio_base: &str,
    timeout_seconds: u32,
) -> Result<Vec<Song>, ApiError> {
    debug!(endpoint, "fetching playlist");
    let response = HTTP_CLIENT
        .get(endpoint)
        .timeout(request_timeout(timeout_seconds))
        .send()
        .await?;
    ApiError::check_status(&response)?;

    let body = response.text().await?;
    let songs = songs_from_response(&body, audio_base)?;
    info!(count = songs.len(), "playlist loaded");
    Ok(songs)
}

fn songs_from_response(body: &str, audio_base: &str) -> Result<Vec<Song>, ApiError> {
    let payload: PlaylistResponse = serde_json::from_str(body)?;
    if !payload.success {
        return Err(ApiError::Rejected("playlist endpoint reported failure".to_string()));
    }
    let Some(songs) = payload.songs else {
        return Err(ApiError::Rejected("playlist response has no songs".to_string()));
    };

    Ok(songs
        .into_iter()
        .filter_map(|raw| song_from_raw(raw, audio_base))
        .collect())
}

fn song_from_raw(raw: RawSong, audio_base: &str) -> Option<Song> {
    let title = raw.display_title().to_string();
    if title.is_empty() {
        return None;
    }

    let audio_url = match raw.absolute_url() {
        Some(url) => url.to_string(),
        None => raw
            .object_key()
            .map(|key| audio_url_for_key(audio_base, key))
            .unwrap_or_default(),
    };
    let id = if raw.id.trim().is_empty() {
        raw.object_key().unwrap_or(title.as_str()).to_string()
    } else {
        raw.id.trim().to_string()
    };

    Some(Song {
        id,
        title,
        artist: raw.artist.as_deref().map(str::trim).unwrap_or_default().to_string(),
        audio_url,
        cover: raw.cover.filter(|cover| !cover.trim().is_empty()),
    })
}

/// Join an object key onto the bucket URL, encoding each path segment.
pub fn audio_url_for_key(audio_base: &str, key: &str) -> String {
    let encoded = key
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", audio_base.trim_end_matches('/'), encoded)
}
