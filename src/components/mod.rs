//! The components module contains all shared components for our app.

mod app;
mod audio_manager;
mod background;
mod icons;
mod lyrics_view;
mod now_playing;
mod player;
mod playlist_sheet;
mod state;

pub use app::*;
pub use audio_manager::*;
pub use background::*;
pub use icons::*;
pub use lyrics_view::*;
pub use now_playing::*;
pub use player::*;
pub use playlist_sheet::*;
pub use state::*;
