//! Playlist navigation and display rules shared by the player components.

use crate::api::{LyricLine, Song};
use rand::Rng;

/// Lyrics are highlighted slightly ahead of the audio clock.
pub const LYRIC_LEAD_SECONDS: f64 = 0.3;

pub fn position_of(playlist: &[Song], song_id: Option<&str>) -> Option<usize> {
    let song_id = song_id?;
    playlist.iter().position(|song| song.id == song_id)
}

/// Index of the song after `current`. Shuffle may pick the current song again.
pub fn next_index<R: Rng>(
    len: usize,
    current: Option<usize>,
    shuffle: bool,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if shuffle {
        return Some(rng.gen_range(0..len));
    }
    Some(current.map(|index| (index + 1) % len).unwrap_or(0))
}

/// Index of the song before `current`, wrapping from the first to the last.
pub fn previous_index(len: usize, current: Option<usize>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        Some(index) if index > 0 && index < len => Some(index - 1),
        _ => Some(len - 1),
    }
}

/// What to do when the audio element reports the end of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedAction {
    Restart,
    Advance,
}

pub fn on_track_ended(repeat: bool) -> EndedAction {
    if repeat {
        EndedAction::Restart
    } else {
        EndedAction::Advance
    }
}

/// Songs whose title or artist contains `term`, ignoring case.
pub fn filter_songs<'a>(playlist: &'a [Song], term: &str) -> Vec<&'a Song> {
    if term.is_empty() {
        return playlist.iter().collect();
    }
    let needle = term.to_lowercase();
    playlist
        .iter()
        .filter(|song| {
            song.title.to_lowercase().contains(&needle) || song.artist.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn active_lyric_index(lines: &[LyricLine], current_time: f64) -> Option<usize> {
    let target = current_time + LYRIC_LEAD_SECONDS;
    lines.iter().enumerate().position(|(index, line)| {
        line.time <= target
            && lines
                .get(index + 1)
                .map(|next| next.time > target)
                .unwrap_or(true)
    })
}

/// Line that still needs scrolling into view, given the line last centered and its song.
pub fn lyric_to_center(
    last_centered: Option<&(String, usize)>,
    song_id: &str,
    active: Option<usize>,
) -> Option<usize> {
    let index = active?;
    match last_centered {
        Some((centered_song, centered_index)) if centered_song == song_id && *centered_index == index => None,
        _ => Some(index),
    }
}

pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
        return 0.0;
    }
    (current_time / duration * 100.0).clamp(0.0, 100.0)
}

pub const NO_SONG_TITLE: &str = "Not Playing";
pub const NO_SONG_ARTIST: &str = "Select a song";

/// Title and artist shown on the now-playing card, with placeholders for blanks.
pub fn now_playing_labels(song: Option<&Song>) -> (String, String) {
    let pick = |value: Option<&str>, placeholder: &str| {
        value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(placeholder)
            .to_string()
    };
    (
        pick(song.map(|song| song.title.as_str()), NO_SONG_TITLE),
        pick(song.map(|song| song.artist.as_str()), NO_SONG_ARTIST),
    )
}

pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn song(id: &str, title: &str, artist: &str) -> Song {
        Song {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            ..Song::default()
        }
    }

    fn line(time: f64, text: &str) -> LyricLine {
        LyricLine {
            time,
            text: text.to_string(),
        }
    }

    #[test]
    fn next_wraps_and_starts_from_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(next_index(3, Some(0), false, &mut rng), Some(1));
        assert_eq!(next_index(3, Some(2), false, &mut rng), Some(0));
        assert_eq!(next_index(3, None, false, &mut rng), Some(0));
        assert_eq!(next_index(0, None, false, &mut rng), None);
        assert_eq!(next_index(0, None, true, &mut rng), None);
    }

    #[test]
    fn shuffle_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let index = next_index(4, Some(1), true, &mut rng).unwrap();
            assert!(index < 4);
        }
        assert_eq!(next_index(1, Some(0), true, &mut rng), Some(0));
    }

    #[test]
    fn previous_wraps_to_last() {
        assert_eq!(previous_index(3, Some(2)), Some(1));
        assert_eq!(previous_index(3, Some(0)), Some(2));
        assert_eq!(previous_index(3, None), Some(2));
        assert_eq!(previous_index(0, None), None);
    }

    #[test]
    fn ended_restarts_only_with_repeat() {
        assert_eq!(on_track_ended(true), EndedAction::Restart);
        assert_eq!(on_track_ended(false), EndedAction::Advance);
    }

    #[test]
    fn position_lookup() {
        let playlist = vec![song("a", "A", ""), song("b", "B", "")];
        assert_eq!(position_of(&playlist, Some("b")), Some(1));
        assert_eq!(position_of(&playlist, Some("z")), None);
        assert_eq!(position_of(&playlist, None), None);
    }

    #[test]
    fn filter_matches_title_or_artist_case_insensitively() {
        let playlist = vec![
            song("1", "Blue Sky", "Alpha"),
            song("2", "Night", "BLUEBIRD"),
            song("3", "Rain", "Gamma"),
        ];
        let ids = |term: &str| {
            filter_songs(&playlist, term)
                .into_iter()
                .map(|song| song.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids("blue"), vec!["1", "2"]);
        assert_eq!(ids("GAMMA"), vec!["3"]);
        assert_eq!(ids(""), vec!["1", "2", "3"]);
        assert!(ids("zzz").is_empty());
    }

    #[test]
    fn active_line_uses_lead() {
        let lines = vec![line(1.0, "a"), line(5.0, "b"), line(9.0, "c")];
        assert_eq!(active_lyric_index(&lines, 0.0), None);
        assert_eq!(active_lyric_index(&lines, 0.75), Some(0));
        assert_eq!(active_lyric_index(&lines, 4.69), Some(0));
        assert_eq!(active_lyric_index(&lines, 4.71), Some(1));
        assert_eq!(active_lyric_index(&lines, 100.0), Some(2));
        assert_eq!(active_lyric_index(&[], 3.0), None);
    }

    #[test]
    fn progress_handles_unknown_duration() {
        assert_eq!(progress_percent(30.0, 0.0), 0.0);
        assert_eq!(progress_percent(30.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(500.0, 120.0), 100.0);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn now_playing_labels_fall_back_to_placeholders() {
        assert_eq!(
            now_playing_labels(None),
            ("Not Playing".to_string(), "Select a song".to_string())
        );
        let untitled = song("1", "", "");
        assert_eq!(
            now_playing_labels(Some(&untitled)),
            ("Not Playing".to_string(), "Select a song".to_string())
        );
        let known = song("2", "晴天", "周杰伦");
        assert_eq!(
            now_playing_labels(Some(&known)),
            ("晴天".to_string(), "周杰伦".to_string())
        );
    }

    #[test]
    fn recenters_when_the_song_changes_at_the_same_index() {
        let last = ("a".to_string(), 0);
        assert_eq!(lyric_to_center(Some(&last), "a", Some(0)), None);
        assert_eq!(lyric_to_center(Some(&last), "a", Some(1)), Some(1));
        assert_eq!(lyric_to_center(Some(&last), "b", Some(0)), Some(0));
        assert_eq!(lyric_to_center(None, "a", Some(0)), Some(0));
        assert_eq!(lyric_to_center(Some(&last), "a", None), None);
    }
}
