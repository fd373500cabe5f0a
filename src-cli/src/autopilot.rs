use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starlane_core::Snapshot;
use starlane_domain_eval::HitWindow;
use starlane_ports::types::Pitch;
use std::collections::HashSet;

/// Simulated player. Each note gets one decision when it comes close to the
/// hit line: press it with probability `skill`, or let it go.
pub struct Autopilot {
    window: HitWindow,
    skill: f64,
    rng: StdRng,
    decided: HashSet<u64>,
}

impl Autopilot {
    pub fn new(window: HitWindow, skill: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            window,
            skill: if skill.is_nan() { 0.0 } else { skill.clamp(0.0, 1.0) },
            rng,
            decided: HashSet::new(),
        }
    }

    pub fn presses(&mut self, snapshot: &Snapshot) -> Vec<Pitch> {
        // a third of the window keeps the hits in the upper grades
        let reach = self.window.half_width / 3.0;
        let mut presses = Vec::new();
        for note in &snapshot.notes {
            if self.window.distance(note.progress) >= reach || !self.decided.insert(note.instance_id) {
                continue;
            }
            if self.rng.random_bool(self.skill) {
                presses.push(note.pitch);
            }
        }
        presses
    }
}
