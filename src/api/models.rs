use serde::{Deserialize, Deserializer, Serialize};

/// A playable entry of the remote playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, alias = "audioUrl")]
    pub audio_url: String,
    #[serde(default)]
    pub cover: Option<String>,
}

impl Song {
    pub fn cover_url(&self) -> Option<&str> {
        self.cover.as_deref().filter(|cover| !cover.trim().is_empty())
    }
}

/// Envelope returned by the playlist endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PlaylistResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub songs: Option<Vec<RawSong>>,
}

/// One song as the playlist endpoint describes it, before its audio source is resolved.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSong {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub url: Option<String>,
    #[serde(default, rename = "audioUrl", deserialize_with = "text_or_none")]
    pub audio_url: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub file: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub cover: Option<String>,
}

impl RawSong {
    pub fn display_title(&self) -> &str {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            self.name.as_deref().map(str::trim).unwrap_or_default()
        } else {
            title
        }
    }

    /// Absolute URL supplied by the endpoint, if any.
    pub fn absolute_url(&self) -> Option<&str> {
        [self.url.as_deref(), self.audio_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| url.starts_with("http://") || url.starts_with("https://"))
    }

    /// Object key relative to the audio bucket.
    pub fn object_key(&self) -> Option<&str> {
        [
            self.key.as_deref(),
            self.file.as_deref(),
            self.filename.as_deref(),
            self.path.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(|key| key.trim().trim_start_matches('/'))
        .find(|key| !key.is_empty())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Number(number) => number.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Strings and numbers become text; null, booleans and nested values are ignored.
fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}
