use log::{debug, info};
use starlane_ports::audio::AudioCuePort;
use starlane_ports::types::{Instrument, Pitch, Volume01};

/// Prints cues instead of sounding them.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleAudio;

impl AudioCuePort for ConsoleAudio {
    fn play_pitch(&self, pitch: Pitch) {
        debug!("♪ {}", pitch);
    }

    fn play_accent(&self) {
        debug!("♪ ding");
    }

    fn set_volume(&self, volume: Volume01) {
        info!("volume {:.2}", volume.get());
    }

    fn set_instrument(&self, instrument: Instrument) {
        info!("instrument {:?}", instrument);
    }
}
