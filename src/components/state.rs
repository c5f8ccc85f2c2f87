//! Shared player state handed down the tree through context.

use crate::api::{LyricLine, Song};
use crate::components::{pause, play, seek_to};
use crate::db::{save_settings, AppSettings};
use crate::playback::{next_index, position_of, previous_index};
use dioxus::prelude::*;
use tracing::warn;

/// Playlist, selection and transport flags.
#[derive(Clone, Copy)]
pub struct PlayerState {
    pub playlist: Signal<Vec<Song>>,
    pub current_song: Signal<Option<Song>>,
    pub is_playing: Signal<bool>,
    /// Set by next/previous/select; consumed by the audio controller.
    pub play_requested: Signal<bool>,
    pub shuffle: Signal<bool>,
    pub repeat: Signal<bool>,
    pub playlist_loading: Signal<bool>,
    pub settings: Signal<AppSettings>,
    pub settings_loaded: Signal<bool>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            playlist: Signal::new(Vec::new()),
            current_song: Signal::new(None),
            is_playing: Signal::new(false),
            play_requested: Signal::new(false),
            shuffle: Signal::new(false),
            repeat: Signal::new(false),
            playlist_loading: Signal::new(true),
            settings: Signal::new(AppSettings::default()),
            settings_loaded: Signal::new(false),
        }
    }

    fn current_index(&self) -> Option<usize> {
        let current = self.current_song.peek();
        position_of(&self.playlist.peek(), current.as_ref().map(|song| song.id.as_str()))
    }

    /// Make the song at `index` current and start it.
    pub fn play_index(&mut self, index: usize) {
        let song = self.playlist.peek().get(index).cloned();
        if let Some(song) = song {
            self.select(song);
        }
    }

    pub fn select(&mut self, song: Song) {
        self.current_song.set(Some(song));
        self.play_requested.set(true);
    }

    pub fn play_next(&mut self) {
        let len = self.playlist.peek().len();
        let shuffle = *self.shuffle.peek();
        if let Some(index) = next_index(len, self.current_index(), shuffle, &mut rand::thread_rng()) {
            self.play_index(index);
        }
    }

    pub fn play_previous(&mut self) {
        let len = self.playlist.peek().len();
        if let Some(index) = previous_index(len, self.current_index()) {
            self.play_index(index);
        }
    }

    pub fn toggle_play(&self) {
        if self.current_song.peek().is_none() {
            return;
        }
        if *self.is_playing.peek() {
            pause();
        } else {
            play();
        }
    }

    pub fn toggle_shuffle(&mut self) {
        let enabled = !*self.shuffle.peek();
        self.shuffle.set(enabled);
        self.update_settings(|settings| settings.shuffle_enabled = enabled);
    }

    pub fn toggle_repeat(&mut self) {
        let enabled = !*self.repeat.peek();
        self.repeat.set(enabled);
        self.update_settings(|settings| settings.repeat_enabled = enabled);
    }

    pub fn toggle_liked(&mut self) {
        let Some(song_id) = self.current_song.peek().as_ref().map(|song| song.id.clone()) else {
            return;
        };
        self.update_settings(|settings| {
            settings.toggle_liked(&song_id);
        });
    }

    pub fn is_current_liked(&self) -> bool {
        let current = self.current_song.read();
        current
            .as_ref()
            .map(|song| self.settings.read().is_liked(&song.id))
            .unwrap_or(false)
    }

    /// Apply `change` to the settings and persist them once they have been loaded.
    pub fn update_settings(&mut self, change: impl FnOnce(&mut AppSettings)) {
        let mut settings = self.settings.peek().clone();
        change(&mut settings);
        if *self.settings.peek() == settings {
            return;
        }
        self.settings.set(settings.clone());

        if !*self.settings_loaded.peek() {
            return;
        }
        spawn(async move {
            if let Err(error) = save_settings(settings).await {
                warn!(%error, "failed to save settings");
            }
        });
    }
}

/// Clock of the audio element.
#[derive(Clone, Copy)]
pub struct AudioState {
    pub current_time: Signal<f64>,
    pub duration: Signal<f64>,
}

impl AudioState {
    pub fn new() -> Self {
        Self {
            current_time: Signal::new(0.0),
            duration: Signal::new(0.0),
        }
    }

    /// Move the element to `position` and reflect it immediately.
    pub fn seek(&mut self, position: f64) {
        let position = position.max(0.0);
        seek_to(position);
        self.current_time.set(position);
    }
}

/// Cover and lyrics of the current song.
#[derive(Clone, Copy)]
pub struct SongInfoState {
    pub cover: Signal<String>,
    pub lyrics: Signal<Vec<LyricLine>>,
    pub loading: Signal<bool>,
}

impl SongInfoState {
    pub fn new() -> Self {
        Self {
            cover: Signal::new(String::new()),
            lyrics: Signal::new(Vec::new()),
            loading: Signal::new(false),
        }
    }
}
