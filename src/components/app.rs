use crate::api::{fetch_playlist, resolve_song_info};
use crate::cache::cached_song_info;
use crate::components::{
    AudioController, AudioState, Icon, ImmersiveBackground, LyricsView, NowPlayingCard,
    PlayerControls, PlayerState, PlaylistSheet, SongInfoState,
};
use crate::db::{initialize_database, load_settings, AppSettings};
use dioxus::prelude::*;
use tracing::warn;

/// Fetch the playlist and make a song current if none is yet.
async fn refresh_playlist(mut player: PlayerState) {
    player.playlist_loading.set(true);
    let settings = player.settings.peek().clone();

    match fetch_playlist(
        &settings.playlist_endpoint,
        &settings.audio_base_url,
        settings.request_timeout_secs,
    )
    .await
    {
        Ok(mut songs) => {
            for song in songs.iter_mut().filter(|song| song.cover.is_none()) {
                if let Some(cached) = cached_song_info(&song.id).filter(|info| !info.cover.is_empty()) {
                    song.cover = Some(cached.cover);
                }
            }
            if player.current_song.peek().is_none() {
                let first = settings
                    .last_song_id
                    .as_deref()
                    .and_then(|id| songs.iter().find(|song| song.id == id))
                    .or_else(|| songs.first())
                    .cloned();
                player.current_song.set(first);
            }
            player.playlist.set(songs);
        }
        Err(error) => warn!(%error, "failed to load playlist"),
    }

    player.playlist_loading.set(false);
}

#[component]
pub fn AppShell() -> Element {
    let mut player = use_context_provider(PlayerState::new);
    use_context_provider(AudioState::new);
    let song_info = use_context_provider(SongInfoState::new);
    let mut show_lyrics = use_signal(|| false);
    let mut show_playlist = use_signal(|| false);
    let mut last_info_song_id = use_signal(|| None::<String>);

    // Load settings, then the playlist
    use_effect(move || {
        spawn(async move {
            if let Err(error) = initialize_database().await {
                warn!(%error, "failed to initialize settings storage");
            }

            let settings = match load_settings().await {
                Ok(settings) => settings,
                Err(error) => {
                    warn!(%error, "failed to load settings");
                    AppSettings::default()
                }
            };
            player.shuffle.set(settings.shuffle_enabled);
            player.repeat.set(settings.repeat_enabled);
            player.settings.set(settings);
            player.settings_loaded.set(true);

            refresh_playlist(player).await;
        });
    });

    // Resolve cover and lyrics whenever the current song changes
    use_effect(move || {
        let Some(song) = player.current_song.read().clone() else {
            return;
        };
        if last_info_song_id.peek().as_deref() == Some(song.id.as_str()) {
            return;
        }
        last_info_song_id.set(Some(song.id.clone()));
        player.update_settings(|settings| settings.last_song_id = Some(song.id.clone()));

        let mut cover = song_info.cover;
        let mut lyrics = song_info.lyrics;
        let mut loading = song_info.loading;

        if let Some(cached) = cached_song_info(&song.id) {
            cover.set(cached.cover);
            lyrics.set(cached.lyrics);
            loading.set(false);
            return;
        }

        cover.set(String::new());
        lyrics.set(Vec::new());
        loading.set(true);

        let settings = player.settings.peek().clone();
        let mut playlist = player.playlist;
        let current_song = player.current_song;
        spawn(async move {
            let info = resolve_song_info(
                &song,
                &settings.lyrics_provider_order,
                settings.request_timeout_secs,
            )
            .await;

            if !info.cover.is_empty() {
                playlist.with_mut(|songs| {
                    for entry in songs.iter_mut().filter(|entry| entry.id == song.id) {
                        entry.cover = Some(info.cover.clone());
                    }
                });
            }

            let still_current = current_song
                .peek()
                .as_ref()
                .is_some_and(|current| current.id == song.id);
            if still_current {
                cover.set(info.cover);
                lyrics.set(info.lyrics);
                loading.set(false);
            }
        });
    });

    let cover = song_info.cover.read().clone();
    let current = player.current_song.read().clone();

    rsx! {
        div { class: "app",
            ImmersiveBackground { cover }

            div { class: "shell",
                header { class: "app-header",
                    button {
                        class: "icon-button",
                        aria_label: "Open playlist",
                        onclick: move |_| show_playlist.set(true),
                        Icon { name: "list".to_string(), class: "icon-md".to_string() }
                    }
                    span { class: "header-label", "Now Playing" }
                    button { class: "icon-button", aria_label: "More",
                        Icon { name: "more".to_string(), class: "icon-md".to_string() }
                    }
                }

                main { class: "stage",
                    if show_lyrics() {
                        div { class: "lyrics-mode",
                            if let Some(song) = current.as_ref() {
                                div { class: "lyrics-heading",
                                    p { class: "track-title", "{song.title}" }
                                    p { class: "track-artist", "{song.artist}" }
                                }
                            }
                            LyricsView {}
                            button {
                                class: "pill-button",
                                onclick: move |_| show_lyrics.set(false),
                                Icon { name: "image".to_string(), class: "icon-sm".to_string() }
                                "View Art"
                            }
                        }
                    } else {
                        NowPlayingCard { on_show_lyrics: move |_| show_lyrics.set(true) }
                    }
                }

                footer { class: "app-footer", PlayerControls {} }
            }

            PlaylistSheet {
                open: show_playlist(),
                on_close: move |_| show_playlist.set(false),
                on_refresh: move |_| {
                    spawn(refresh_playlist(player));
                },
            }
        }

        // Audio controller - manages playback separately from UI
        AudioController {}
    }
}
