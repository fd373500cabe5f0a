use crate::model::{Difficulty, NoteEvent, Song, SongId};
use starlane_ports::types::{Millis, Pitch};

/// How many catalog songs the simplified game offers.
pub const CHALLENGE_SONG_COUNT: usize = 15;

const DEFAULT_STEP_MS: Millis = 500;

/// Lays the pitches out back to back, one every `step_ms`.
pub fn even_pattern(pitches: &[Pitch], step_ms: Millis) -> Vec<NoteEvent> {
    pitches
        .iter()
        .enumerate()
        .map(|(i, &pitch)| NoteEvent {
            pitch,
            onset_ms: i as Millis * step_ms,
            duration_ms: step_ms,
        })
        .collect()
}

fn base_song(id: &str, title: &str, difficulty: Difficulty, pitches: &[Pitch], step_ms: Millis) -> Song {
    Song {
        id: SongId::new(id),
        title: title.to_string(),
        difficulty,
        notes: even_pattern(pitches, step_ms),
        description: None,
    }
}

pub fn base_songs() -> Vec<Song> {
    use Pitch::*;

    vec![
        base_song(
            "twinkle",
            "Twinkle Little Unicorn",
            Difficulty::Easy,
            &[C4, C4, G4, G4, A4, A4, G4],
            DEFAULT_STEP_MS,
        ),
        base_song(
            "happy_birthday",
            "Princess Birthday",
            Difficulty::Medium,
            &[C4, C4, D4, C4, F4, E4],
            400,
        ),
        base_song(
            "mary_lamb",
            "The Magic Little Lamb",
            Difficulty::Easy,
            &[E4, D4, C4, D4, E4, E4, E4],
            DEFAULT_STEP_MS,
        ),
        base_song(
            "jingle_bells",
            "Christmas Bells",
            Difficulty::Easy,
            &[E4, E4, E4, E4, E4, E4, E4, G4, C4, D4, E4],
            300,
        ),
        base_song(
            "baby_shark",
            "Little Shark",
            Difficulty::Easy,
            &[D4, E4, G4, G4, G4, G4, G4, G4, D4, E4, G4],
            250,
        ),
        base_song(
            "ode_joy",
            "Ode to Joy",
            Difficulty::Medium,
            &[E4, E4, F4, G4, G4, F4, E4, D4, C4, C4, D4, E4, E4, D4, D4],
            350,
        ),
        base_song(
            "row_boat",
            "Row the Little Boat",
            Difficulty::Easy,
            &[C4, C4, C4, D4, E4, E4, D4, E4, F4, G4],
            400,
        ),
        base_song(
            "london_bridge",
            "London Bridge",
            Difficulty::Medium,
            &[G4, A4, G4, F4, E4, F4, G4, D4, E4, F4, E4, F4, G4],
            350,
        ),
        base_song(
            "itsy_bitsy",
            "Itsy Bitsy Spider",
            Difficulty::Medium,
            &[G3, C4, C4, C4, D4, E4, E4, E4, D4, C4, D4, E4, C4],
            300,
        ),
        base_song(
            "old_macdonald",
            "Unicorn Farm",
            Difficulty::Medium,
            &[G4, G4, G4, D4, E4, E4, D4, B4, B4, A4, A4, G4],
            350,
        ),
    ]
}

/// Faster, harder take: onsets compressed by 1.5x (rounded up to the next
/// millisecond so no note moves earlier than the ratio allows) and durations halved.
pub fn remix(song: &Song) -> Song {
    Song {
        id: SongId::new(format!("{}_remix", song.id)),
        title: format!("{} Remix", song.title),
        difficulty: Difficulty::Hard,
        notes: song
            .notes
            .iter()
            .map(|note| NoteEvent {
                pitch: note.pitch,
                onset_ms: (note.onset_ms * 2).div_ceil(3),
                duration_ms: note.duration_ms / 2,
            })
            .collect(),
        description: song.description.clone(),
    }
}

/// Same rhythm with every odd-indexed note lifted to the C5 cap.
pub fn magic(song: &Song) -> Song {
    Song {
        id: SongId::new(format!("{}_magic", song.id)),
        title: format!("{} Magic", song.title),
        difficulty: Difficulty::Medium,
        notes: song
            .notes
            .iter()
            .enumerate()
            .map(|(i, note)| NoteEvent {
                pitch: if i % 2 == 0 { note.pitch } else { Pitch::C5 },
                ..*note
            })
            .collect(),
        description: song.description.clone(),
    }
}

/// The full song list: base songs followed by a remix and a magic variant of each.
pub fn all_songs() -> Vec<Song> {
    let base = base_songs();
    let variants: Vec<Song> = base
        .iter()
        .flat_map(|song| [remix(song), magic(song)])
        .collect();
    base.into_iter().chain(variants).collect()
}

pub fn challenge_songs() -> Vec<Song> {
    all_songs().into_iter().take(CHALLENGE_SONG_COUNT).collect()
}

pub fn find_song(id: &str) -> Option<Song> {
    all_songs().into_iter().find(|song| song.id.as_str() == id)
}
