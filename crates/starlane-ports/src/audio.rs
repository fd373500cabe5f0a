use crate::types::*;

/// Fire-and-forget sound output. Nothing the core does depends on what happens here.
pub trait AudioCuePort: Send {
    fn play_pitch(&self, pitch: Pitch);

    /// The distinguished "successful hit" cue.
    fn play_accent(&self);

    fn set_volume(&self, volume: Volume01);
    fn set_instrument(&self, instrument: Instrument);
}

/// Audio port that drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioCuePort for SilentAudio {
    fn play_pitch(&self, _pitch: Pitch) {}
    fn play_accent(&self) {}
    fn set_volume(&self, _volume: Volume01) {}
    fn set_instrument(&self, _instrument: Instrument) {}
}
