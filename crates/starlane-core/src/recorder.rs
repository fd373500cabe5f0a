use crate::frame_loop::{FrameLoop, Task, TaskHandle};
use serde::{Deserialize, Serialize};
use starlane_ports::types::{Millis, Pitch};

/// Quiet time after the last recorded note before playback counts as finished.
pub const PLAYBACK_TAIL_MS: Millis = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedNote {
    pub pitch: Pitch,
    pub offset_ms: Millis,
}

#[derive(Debug, Default)]
enum RecorderState {
    #[default]
    Idle,
    Recording {
        started_at_ms: Millis,
    },
    Playing {
        handles: Vec<TaskHandle>,
    },
}

/// Free-play take: records key presses and replays them through the frame loop.
#[derive(Debug, Default)]
pub struct Recorder {
    state: RecorderState,
    notes: Vec<RecordedNote>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh take, dropping the previous one. Refused during playback.
    pub fn start_recording(&mut self, now_ms: Millis) -> bool {
        match self.state {
            RecorderState::Playing { .. } => false,
            _ => {
                self.notes.clear();
                self.state = RecorderState::Recording {
                    started_at_ms: now_ms,
                };
                true
            }
        }
    }

    pub fn stop_recording(&mut self) -> bool {
        if !self.is_recording() {
            return false;
        }
        self.state = RecorderState::Idle;
        true
    }

    pub fn record(&mut self, pitch: Pitch, now_ms: Millis) -> bool {
        let RecorderState::Recording { started_at_ms } = self.state else {
            return false;
        };
        self.notes.push(RecordedNote {
            pitch,
            offset_ms: now_ms.saturating_sub(started_at_ms),
        });
        true
    }

    /// Queues one task per recorded note plus an end sentinel.
    pub fn start_playback(&mut self, frame_loop: &mut FrameLoop, now_ms: Millis) -> bool {
        if !matches!(self.state, RecorderState::Idle) {
            return false;
        }
        let Some(last) = self.notes.last() else {
            return false;
        };
        let end_ms = now_ms + last.offset_ms + PLAYBACK_TAIL_MS;

        let mut handles: Vec<TaskHandle> = self
            .notes
            .iter()
            .map(|note| {
                frame_loop.schedule_at(now_ms + note.offset_ms, Task::PlaybackNote { pitch: note.pitch })
            })
            .collect();
        handles.push(frame_loop.schedule_at(end_ms, Task::PlaybackEnd));

        self.state = RecorderState::Playing { handles };
        true
    }

    /// Cancels every queued note and the sentinel together.
    pub fn stop_playback(&mut self, frame_loop: &mut FrameLoop) -> usize {
        if !self.is_playing() {
            return 0;
        }
        match std::mem::take(&mut self.state) {
            RecorderState::Playing { handles } => frame_loop.cancel_all(handles),
            _ => 0,
        }
    }

    /// Called when the end sentinel fires.
    pub fn finish_playback(&mut self) {
        if self.is_playing() {
            self.state = RecorderState::Idle;
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, RecorderState::Playing { .. })
    }

    pub fn notes(&self) -> &[RecordedNote] {
        &self.notes
    }
}
