use starlane_domain_song::NoteEvent;
use starlane_ports::types::Millis;

/// Forward-only cursor over a song timeline.
///
/// The timeline must already be in onset order (`Song::validate`); the scheduler
/// never looks back, so an out-of-order event would stall everything after it.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    events: Vec<NoteEvent>,
    cursor: usize,
}

impl Scheduler {
    pub fn new(events: Vec<NoteEvent>) -> Self {
        Self { events, cursor: 0 }
    }

    /// Emits every event whose onset is at or before `elapsed_ms` and that has
    /// not been emitted yet. Driven by elapsed time rather than tick counts, so
    /// a late call catches up on everything it missed.
    pub fn advance(&mut self, elapsed_ms: Millis) -> Vec<NoteEvent> {
        let mut emitted = Vec::new();
        while let Some(event) = self.events.get(self.cursor) {
            if event.onset_ms > elapsed_ms {
                break;
            }
            emitted.push(*event);
            self.cursor += 1;
        }
        emitted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }
}
