//! Data layer: the playlist endpoint plus the public cover and lyrics services.

pub mod artwork;
pub mod error;
pub mod lyrics;
pub mod models;
pub mod playlist;
pub mod song_info;

pub use error::ApiError;
pub use lyrics::{default_lyrics_provider_order, LyricLine};
pub use models::*;
pub use playlist::fetch_playlist;
pub use song_info::{resolve_song_info, SongInfo};

use once_cell::sync::Lazy;
use std::time::Duration;

pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub(crate) fn request_timeout(timeout_seconds: u32) -> Duration {
    Duration::from_secs(timeout_seconds.clamp(1, 20) as u64)
}
