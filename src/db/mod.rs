use crate::api::default_lyrics_provider_order;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

/// Error type for database operations on native platforms
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DbError(String);

#[cfg(not(target_arch = "wasm32"))]
impl DbError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "cadenza.app_settings";

pub const DEFAULT_PLAYLIST_ENDPOINT: &str = "https://patient-silence-131f.tokio-fb6.workers.dev";
pub const DEFAULT_AUDIO_BASE_URL: &str = "https://pub-4b0391c7b46a443783ccc235ddeb1669.r2.dev";

/// App settings stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_playlist_endpoint")]
    pub playlist_endpoint: String,
    #[serde(default = "default_audio_base_url")]
    pub audio_base_url: String,
    #[serde(default)]
    pub shuffle_enabled: bool,
    #[serde(default)]
    pub repeat_enabled: bool,
    #[serde(default)]
    pub liked_song_ids: Vec<String>,
    #[serde(default)]
    pub last_song_id: Option<String>,
    #[serde(default = "default_lyrics_provider_order")]
    pub lyrics_provider_order: Vec<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u32,
}

fn default_playlist_endpoint() -> String {
    DEFAULT_PLAYLIST_ENDPOINT.to_string()
}

fn default_audio_base_url() -> String {
    DEFAULT_AUDIO_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u32 {
    6
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            playlist_endpoint: default_playlist_endpoint(),
            audio_base_url: default_audio_base_url(),
            shuffle_enabled: false,
            repeat_enabled: false,
            liked_song_ids: Vec::new(),
            last_song_id: None,
            lyrics_provider_order: default_lyrics_provider_order(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppSettings {
    pub fn is_liked(&self, song_id: &str) -> bool {
        self.liked_song_ids.iter().any(|id| id == song_id)
    }

    /// Flip the liked flag of `song_id`, returning the new state.
    pub fn toggle_liked(&mut self, song_id: &str) -> bool {
        if let Some(pos) = self.liked_song_ids.iter().position(|id| id == song_id) {
            self.liked_song_ids.remove(pos);
            false
        } else {
            self.liked_song_ids.push(song_id.to_string());
            true
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    let conn = get_db_connection()?;

    let settings_json =
        serde_json::to_string(&settings).map_err(|e| DbError::new(e.to_string()))?;

    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('app_settings', ?1)",
        [&settings_json],
    )
    .map_err(|e| DbError::new(e.to_string()))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: AppSettings) -> Result<(), StorageError> {
    LocalStorage::set(SETTINGS_KEY, settings)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    let conn = get_db_connection()?;

    let result: Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM settings WHERE key = 'app_settings'",
        [],
        |row: &rusqlite::Row| row.get(0),
    );

    match result {
        Ok(json) => serde_json::from_str(&json).map_err(|e| DbError::new(e.to_string())),
        Err(_) => Ok(AppSettings::default()),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<AppSettings, StorageError> {
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(_) => Ok(AppSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    let conn = get_db_connection()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DbError::new(e.to_string()))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), StorageError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    use std::path::PathBuf;

    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("cadenza"))
        .unwrap_or_else(|| PathBuf::from(".cadenza"));
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| DbError::new(format!("Failed to create data directory: {}", e)))?;

    rusqlite::Connection::open(data_dir.join("cadenza.db"))
        .map_err(|e| DbError::new(format!("Failed to open database: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"shuffle_enabled": true}"#).unwrap();
        assert!(settings.shuffle_enabled);
        assert!(!settings.repeat_enabled);
        assert_eq!(settings.playlist_endpoint, DEFAULT_PLAYLIST_ENDPOINT);
        assert_eq!(settings.audio_base_url, DEFAULT_AUDIO_BASE_URL);
        assert_eq!(settings.lyrics_provider_order, vec!["netease", "lrclib"]);
        assert_eq!(settings.request_timeout_secs, 6);
    }

    #[test]
    fn toggling_liked_flips_membership() {
        let mut settings = AppSettings::default();
        assert!(settings.toggle_liked("a"));
        assert!(settings.is_liked("a"));
        assert!(settings.toggle_liked("b"));
        assert!(!settings.toggle_liked("a"));
        assert!(!settings.is_liked("a"));
        assert_eq!(settings.liked_song_ids, vec!["b"]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn db_error_displays_its_message() {
        let error = DbError::new("Failed to open database: locked");
        assert_eq!(error.to_string(), "Failed to open database: locked");

        let boxed: Box<dyn std::error::Error> = Box::new(error);
        assert_eq!(boxed.to_string(), "Failed to open database: locked");
    }
}
