use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

pub type Millis = u64; // monotonic host time or offset since song start

/// The 25 pitches the keyboard can produce: two chromatic octaves plus the C5 cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pitch {
    C3,
    #[serde(rename = "C#3")]
    Cs3,
    D3,
    #[serde(rename = "D#3")]
    Ds3,
    E3,
    F3,
    #[serde(rename = "F#3")]
    Fs3,
    G3,
    #[serde(rename = "G#3")]
    Gs3,
    A3,
    #[serde(rename = "A#3")]
    As3,
    B3,
    C4,
    #[serde(rename = "C#4")]
    Cs4,
    D4,
    #[serde(rename = "D#4")]
    Ds4,
    E4,
    F4,
    #[serde(rename = "F#4")]
    Fs4,
    G4,
    #[serde(rename = "G#4")]
    Gs4,
    A4,
    #[serde(rename = "A#4")]
    As4,
    B4,
    C5,
}

impl Pitch {
    pub const ALL: [Pitch; 25] = [
        Pitch::C3,
        Pitch::Cs3,
        Pitch::D3,
        Pitch::Ds3,
        Pitch::E3,
        Pitch::F3,
        Pitch::Fs3,
        Pitch::G3,
        Pitch::Gs3,
        Pitch::A3,
        Pitch::As3,
        Pitch::B3,
        Pitch::C4,
        Pitch::Cs4,
        Pitch::D4,
        Pitch::Ds4,
        Pitch::E4,
        Pitch::F4,
        Pitch::Fs4,
        Pitch::G4,
        Pitch::Gs4,
        Pitch::A4,
        Pitch::As4,
        Pitch::B4,
        Pitch::C5,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pitch::C3 => "C3",
            Pitch::Cs3 => "C#3",
            Pitch::D3 => "D3",
            Pitch::Ds3 => "D#3",
            Pitch::E3 => "E3",
            Pitch::F3 => "F3",
            Pitch::Fs3 => "F#3",
            Pitch::G3 => "G3",
            Pitch::Gs3 => "G#3",
            Pitch::A3 => "A3",
            Pitch::As3 => "A#3",
            Pitch::B3 => "B3",
            Pitch::C4 => "C4",
            Pitch::Cs4 => "C#4",
            Pitch::D4 => "D4",
            Pitch::Ds4 => "D#4",
            Pitch::E4 => "E4",
            Pitch::F4 => "F4",
            Pitch::Fs4 => "F#4",
            Pitch::G4 => "G4",
            Pitch::Gs4 => "G#4",
            Pitch::A4 => "A4",
            Pitch::As4 => "A#4",
            Pitch::B4 => "B4",
            Pitch::C5 => "C5",
        }
    }

    /// Position in the chromatic layout, 0 for C3 up to 24 for C5.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_sharp(self) -> bool {
        self.name().contains('#')
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pitch: {0}")]
pub struct PitchParseError(pub String);

impl FromStr for Pitch {
    type Err = PitchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Pitch::ALL
            .iter()
            .copied()
            .find(|pitch| pitch.name() == trimmed)
            .ok_or_else(|| PitchParseError(s.to_string()))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    #[default]
    Piano,
    Xylophone,
    Synth,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Volume01(pub f32);

impl Volume01 {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

pub type Shared<T> = Arc<T>;
