use crate::model::{Difficulty, NoteEvent, Song, SongError, SongId};
use log::warn;
use starlane_ports::songgen::{GeneratedNoteDto, GeneratedSongDto};
use starlane_ports::types::{Millis, Pitch};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum SongImportError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("note {index}: unknown pitch {name}")]
    UnknownPitch { index: usize, name: String },
    #[error("note {index}: invalid {field} {value}")]
    InvalidTime {
        index: usize,
        field: &'static str,
        value: f64,
    },
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("invalid song: {0}")]
    Invalid(#[from] SongError),
}

pub fn generated_song_id(epoch_ms: i64) -> SongId {
    SongId::new(format!("gen-{epoch_ms}"))
}

pub fn parse_difficulty(raw: &str) -> Result<Difficulty, SongImportError> {
    match raw.trim().to_lowercase().as_str() {
        "easy" | "fácil" | "facil" => Ok(Difficulty::Easy),
        "medium" | "médio" | "medio" => Ok(Difficulty::Medium),
        "hard" | "difícil" | "dificil" => Ok(Difficulty::Hard),
        _ => Err(SongImportError::UnknownDifficulty(raw.to_string())),
    }
}

fn parse_millis(index: usize, field: &'static str, value: f64) -> Result<Millis, SongImportError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SongImportError::InvalidTime {
            index,
            field,
            value,
        });
    }
    Ok(value.round() as Millis)
}

fn note_from_generated(index: usize, note: &GeneratedNoteDto) -> Result<NoteEvent, SongImportError> {
    let pitch: Pitch = note
        .note
        .parse()
        .map_err(|_| SongImportError::UnknownPitch {
            index,
            name: note.note.clone(),
        })?;
    Ok(NoteEvent {
        pitch,
        onset_ms: parse_millis(index, "time", note.time)?,
        duration_ms: parse_millis(index, "duration", note.duration)?,
    })
}

/// Turns an untrusted generator payload into a song that is safe to schedule.
///
/// Nothing is repaired: an unknown pitch, a negative or non-finite time, or a
/// timeline that runs backwards rejects the whole song.
pub fn song_from_generated(dto: GeneratedSongDto, id: SongId) -> Result<Song, SongImportError> {
    let difficulty = parse_difficulty(&dto.difficulty)?;
    let notes = dto
        .notes
        .iter()
        .enumerate()
        .map(|(index, note)| note_from_generated(index, note))
        .collect::<Result<Vec<_>, _>>()?;

    let song = Song {
        id,
        title: dto.title,
        difficulty,
        notes,
        description: dto.description.filter(|d| !d.trim().is_empty()),
    };

    if let Err(err) = song.validate() {
        warn!("rejecting generated song {}: {}", song.id, err);
        return Err(err.into());
    }
    Ok(song)
}

pub fn import_song_json(data: &[u8], id: SongId) -> Result<Song, SongImportError> {
    let dto: GeneratedSongDto =
        serde_json::from_slice(data).map_err(|e| SongImportError::Parse(e.to_string()))?;
    song_from_generated(dto, id)
}

pub fn import_song_path(path: &Path, id: SongId) -> Result<Song, SongImportError> {
    let data = std::fs::read(path).map_err(|e| SongImportError::Io(e.to_string()))?;
    import_song_json(&data, id)
}
