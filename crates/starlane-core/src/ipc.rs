use crate::highscore::HighScoreEntry;
use crate::recorder::RecordedNote;
use crate::session::Phase;
use serde::{Deserialize, Serialize};
use starlane_domain_eval::{Grade, VisualVariant};
use starlane_domain_song::{Song, SongId};
use starlane_ports::storage::SettingsDto;
use starlane_ports::types::{Instrument, Millis, Pitch, Volume01};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    SelectSong { song_id: String },
    SelectCustomSong { song: Song },
    GenerateSong { theme: String },
    Confirm,
    NotePlayed { pitch: Pitch },
    Dismiss,
    Back,
    LoadHighScores { song_id: String },
    StartRecording,
    StopRecording,
    PlayRecording,
    StopPlayback,
    SetVolume { volume: Volume01 },
    SetInstrument { instrument: Instrument },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    PhaseChanged { phase: Phase },
    NoteSpawned { instance_id: u64, pitch: Pitch, visual: VisualVariant },
    HitFeedback {
        instance_id: u64,
        pitch: Pitch,
        grade: Grade,
        points: u64,
        multiplier: u32,
        lane_x: f64,
        text: String,
    },
    Missed { instance_id: u64, pitch: Pitch },
    ScoreUpdated { score: u64, combo: u32, multiplier: u32, health: Option<u32> },
    FeverChanged { active: bool },
    SessionWon { song_id: SongId, score: u64 },
    HighScoresUpdated { song_id: SongId, entries: Vec<HighScoreEntry> },
    GenerationFailed { reason: String, retryable: bool },
    RecordingChanged { recording: bool, notes: usize },
    PlaybackStarted { notes: usize },
    PlaybackFinished,
    SettingsUpdated { settings: SettingsDto },
}

/// Short judgement text shown over the playfield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
    /// True for a moment right after a hit.
    pub emphasized: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitEffect {
    pub pitch: Pitch,
    pub lane_x: f64,
    pub at_ms: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteView {
    pub instance_id: u64,
    pub pitch: Pitch,
    pub progress: f64,
    pub lane_x: f64,
    pub visual: VisualVariant,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub song_id: Option<SongId>,
    pub score: u64,
    pub combo: u32,
    pub multiplier: u32,
    pub health: Option<u32>,
    pub fever: bool,
    pub notes: Vec<NoteView>,
    pub hit_effects: Vec<HitEffect>,
    pub feedback: Option<Feedback>,
    pub recording: Vec<RecordedNote>,
}
