use serde::{Deserialize, Serialize};
use starlane_ports::types::{Millis, Pitch};

/// Vertical travel of spawned notes. Progress grows linearly with time from
/// `spawn_progress`; once it passes `despawn_progress` the note leaves the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    pub spawn_progress: f64,
    pub despawn_progress: f64,
    pub units_per_second: f64,
}

impl MotionConfig {
    pub fn progress_after(&self, elapsed_ms: Millis) -> f64 {
        self.spawn_progress + self.units_per_second * elapsed_ms as f64 / 1000.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualVariant {
    Star,
    Diamond,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveNote {
    pub instance_id: u64,
    pub pitch: Pitch,
    pub progress: f64,
    pub hit: bool,
    pub visual: VisualVariant,
    spawned_at_ms: Millis,
}

impl ActiveNote {
    pub fn spawned_at_ms(&self) -> Millis {
        self.spawned_at_ms
    }
}

/// The live set of notes in flight.
#[derive(Clone, Debug)]
pub struct Playfield {
    cfg: MotionConfig,
    notes: Vec<ActiveNote>,
}

impl Playfield {
    pub fn new(cfg: MotionConfig) -> Self {
        Self {
            cfg,
            notes: Vec::new(),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.cfg
    }

    pub fn spawn(&mut self, instance_id: u64, pitch: Pitch, visual: VisualVariant, now_ms: Millis) {
        self.notes.push(ActiveNote {
            instance_id,
            pitch,
            progress: self.cfg.spawn_progress,
            hit: false,
            visual,
            spawned_at_ms: now_ms,
        });
    }

    /// Moves every note to where it should be at `now_ms` and drops the ones
    /// past the despawn threshold. The dropped notes that were never hit are
    /// returned in spawn order; each of them is a miss.
    pub fn advance(&mut self, now_ms: Millis) -> Vec<ActiveNote> {
        for note in &mut self.notes {
            let elapsed = now_ms.saturating_sub(note.spawned_at_ms);
            let progress = self.cfg.progress_after(elapsed);
            if progress > note.progress {
                note.progress = progress;
            }
        }

        let despawn = self.cfg.despawn_progress;
        let (gone, live): (Vec<_>, Vec<_>) = self
            .notes
            .drain(..)
            .partition(|note| note.progress > despawn);
        self.notes = live;
        gone.into_iter().filter(|note| !note.hit).collect()
    }

    /// Marks the note as hit and takes it out of the field.
    pub fn take_hit(&mut self, instance_id: u64) -> Option<ActiveNote> {
        let idx = self
            .notes
            .iter()
            .position(|note| note.instance_id == instance_id && !note.hit)?;
        let mut note = self.notes.remove(idx);
        note.hit = true;
        Some(note)
    }

    pub fn notes(&self) -> &[ActiveNote] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
