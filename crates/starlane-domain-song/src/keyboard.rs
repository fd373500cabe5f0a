use serde::{Deserialize, Serialize};
use starlane_ports::types::Pitch;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyColor {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KeyDef {
    pub pitch: Pitch,
    pub frequency_hz: f32,
    pub color: KeyColor,
    pub label: &'static str,
}

const fn white(pitch: Pitch, frequency_hz: f32, label: &'static str) -> KeyDef {
    KeyDef {
        pitch,
        frequency_hz,
        color: KeyColor::White,
        label,
    }
}

const fn black(pitch: Pitch, frequency_hz: f32) -> KeyDef {
    KeyDef {
        pitch,
        frequency_hz,
        color: KeyColor::Black,
        label: "",
    }
}

pub const KEYBOARD: [KeyDef; 25] = [
    white(Pitch::C3, 130.81, "Do"),
    black(Pitch::Cs3, 138.59),
    white(Pitch::D3, 146.83, "Re"),
    black(Pitch::Ds3, 155.56),
    white(Pitch::E3, 164.81, "Mi"),
    white(Pitch::F3, 174.61, "Fa"),
    black(Pitch::Fs3, 185.00),
    white(Pitch::G3, 196.00, "Sol"),
    black(Pitch::Gs3, 207.65),
    white(Pitch::A3, 220.00, "La"),
    black(Pitch::As3, 233.08),
    white(Pitch::B3, 246.94, "Si"),
    white(Pitch::C4, 261.63, "Do"),
    black(Pitch::Cs4, 277.18),
    white(Pitch::D4, 293.66, "Re"),
    black(Pitch::Ds4, 311.13),
    white(Pitch::E4, 329.63, "Mi"),
    white(Pitch::F4, 349.23, "Fa"),
    black(Pitch::Fs4, 369.99),
    white(Pitch::G4, 392.00, "Sol"),
    black(Pitch::Gs4, 415.30),
    white(Pitch::A4, 440.00, "La"),
    black(Pitch::As4, 466.16),
    white(Pitch::B4, 493.88, "Si"),
    white(Pitch::C5, 523.25, "Do"),
];

pub fn key_def(pitch: Pitch) -> &'static KeyDef {
    &KEYBOARD[pitch.index()]
}

pub fn white_key_count() -> usize {
    KEYBOARD
        .iter()
        .filter(|key| key.color == KeyColor::White)
        .count()
}

/// Horizontal center of a pitch's lane as a percentage of the keyboard width.
///
/// White keys split the span evenly and a note sits in the middle of its key.
/// A black key straddles the boundary between the white key before it and the
/// one after it.
pub fn lane_position(pitch: Pitch) -> f64 {
    let width = 100.0 / white_key_count() as f64;
    let whites_before = KEYBOARD[..pitch.index()]
        .iter()
        .filter(|key| key.color == KeyColor::White)
        .count() as f64;

    match key_def(pitch).color {
        KeyColor::White => whites_before * width + width / 2.0,
        KeyColor::Black => whites_before * width,
    }
}
