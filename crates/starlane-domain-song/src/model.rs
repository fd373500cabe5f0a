use serde::{Deserialize, Serialize};
use starlane_ports::types::{Millis, Pitch};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongId(pub String);

impl SongId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub onset_ms: Millis,
    /// Advisory only, never used for hit timing.
    pub duration_ms: Millis,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub difficulty: Difficulty,
    pub notes: Vec<NoteEvent>,
    pub description: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SongError {
    #[error("song {0} has no notes")]
    Empty(SongId),
    #[error("song {song}: note {index} starts at {onset_ms}ms, before the previous note at {previous_ms}ms")]
    OutOfOrder {
        song: SongId,
        index: usize,
        onset_ms: Millis,
        previous_ms: Millis,
    },
}

impl Song {
    /// Checks the invariants the scheduler relies on: at least one note and
    /// onsets that never go backwards.
    pub fn validate(&self) -> Result<(), SongError> {
        if self.notes.is_empty() {
            return Err(SongError::Empty(self.id.clone()));
        }
        for (index, pair) in self.notes.windows(2).enumerate() {
            if pair[1].onset_ms < pair[0].onset_ms {
                return Err(SongError::OutOfOrder {
                    song: self.id.clone(),
                    index: index + 1,
                    onset_ms: pair[1].onset_ms,
                    previous_ms: pair[0].onset_ms,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
