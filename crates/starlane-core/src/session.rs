use crate::rules::SessionRules;
use crate::scheduler::Scheduler;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use starlane_domain_eval::{
    ActiveNote, Health, HitDetector, Judgement, Playfield, VisualVariant,
};
use starlane_domain_song::{lane_position, Song, SongError, SongId};
use starlane_ports::types::{Millis, Pitch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Select,
    Ready,
    Playing,
    Won,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    PhaseChanged {
        phase: Phase,
    },
    Spawned {
        instance_id: u64,
        pitch: Pitch,
        visual: VisualVariant,
    },
    Hit {
        instance_id: u64,
        pitch: Pitch,
        judgement: Judgement,
        lane_x: f64,
    },
    Missed {
        instance_id: u64,
        pitch: Pitch,
    },
    Stats {
        score: u64,
        combo: u32,
        multiplier: u32,
        health: Option<u32>,
    },
    FeverChanged {
        active: bool,
    },
    Won {
        song_id: SongId,
        score: u64,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {action} while in {phase:?}")]
    WrongPhase { action: &'static str, phase: Phase },
    #[error("invalid song: {0}")]
    InvalidSong(#[from] SongError),
}

/// Everything that changes while one song is being played. Only `Session`
/// mutates it, which keeps health clamped and the cursor monotone.
#[derive(Clone, Debug)]
pub struct SessionState {
    score: u64,
    combo: u32,
    health: Option<Health>,
    fever: bool,
    field: Playfield,
    scheduler: Scheduler,
    started_at_ms: Option<Millis>,
}

impl SessionState {
    fn new(song: &Song, rules: &SessionRules) -> Self {
        Self {
            score: 0,
            combo: 0,
            health: rules.health.map(|h| h.start()),
            fever: false,
            field: Playfield::new(rules.motion),
            scheduler: Scheduler::new(song.notes.clone()),
            started_at_ms: None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn health(&self) -> Option<u32> {
        self.health.map(Health::get)
    }

    pub fn is_fever(&self) -> bool {
        self.fever
    }

    pub fn active_notes(&self) -> &[ActiveNote] {
        self.field.notes()
    }

    pub fn schedule_cursor(&self) -> usize {
        self.scheduler.cursor()
    }

    pub fn is_timeline_finished(&self) -> bool {
        self.scheduler.is_finished()
    }

    pub fn started_at_ms(&self) -> Option<Millis> {
        self.started_at_ms
    }
}

pub struct Session {
    rules: SessionRules,
    detector: HitDetector,
    phase: Phase,
    song: Option<Song>,
    state: Option<SessionState>,
    next_instance_id: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(rules: SessionRules) -> Self {
        Self::with_rng(rules, StdRng::from_os_rng())
    }

    /// Fixes the cosmetic randomness; gameplay is deterministic either way.
    pub fn with_seed(rules: SessionRules, seed: u64) -> Self {
        Self::with_rng(rules, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rules: SessionRules, rng: StdRng) -> Self {
        let detector = HitDetector::new(rules.window, rules.scoring.clone());
        Self {
            rules,
            detector,
            phase: Phase::Select,
            song: None,
            state: None,
            next_instance_id: 1,
            rng,
        }
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn multiplier(&self) -> u32 {
        let combo = self.state.as_ref().map(|s| s.combo).unwrap_or(0);
        self.rules.scoring.multiplier(combo)
    }

    /// Picks a song and resets the session around it. The song is validated
    /// first; a malformed one leaves the session exactly as it was.
    pub fn select_song(&mut self, song: Song, now_ms: Millis) -> Result<Vec<SessionEvent>, SessionError> {
        if !matches!(self.phase, Phase::Select | Phase::Ready) {
            return Err(SessionError::WrongPhase {
                action: "select a song",
                phase: self.phase,
            });
        }
        song.validate()?;

        info!("selected song {} ({} notes)", song.id, song.notes.len());
        self.state = Some(SessionState::new(&song, &self.rules));
        self.song = Some(song);

        let mut events = Vec::new();
        if self.rules.confirm_before_play {
            self.set_phase(Phase::Ready, &mut events);
        } else {
            self.start(now_ms, &mut events);
        }
        Ok(events)
    }

    pub fn confirm(&mut self, now_ms: Millis) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase != Phase::Ready {
            return Err(SessionError::WrongPhase {
                action: "confirm",
                phase: self.phase,
            });
        }
        let mut events = Vec::new();
        self.start(now_ms, &mut events);
        Ok(events)
    }

    /// Leaves the result screen.
    pub fn dismiss(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.phase != Phase::Won {
            return Err(SessionError::WrongPhase {
                action: "dismiss",
                phase: self.phase,
            });
        }
        Ok(self.back())
    }

    /// Abandons whatever is going on and returns to song selection.
    pub fn back(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.state = None;
        self.song = None;
        if self.phase != Phase::Select {
            self.set_phase(Phase::Select, &mut events);
        }
        events
    }

    /// One simulation step: spawn, move, resolve misses, then check for the win.
    pub fn tick(&mut self, now_ms: Millis) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }
        let Some(state) = self.state.as_mut() else {
            return events;
        };

        let started = state.started_at_ms.unwrap_or(now_ms);
        let elapsed = now_ms.saturating_sub(started);
        for note in state.scheduler.advance(elapsed) {
            let instance_id = self.next_instance_id;
            self.next_instance_id += 1;
            let visual = if self.rng.random_bool(0.5) {
                VisualVariant::Star
            } else {
                VisualVariant::Diamond
            };
            state.field.spawn(instance_id, note.pitch, visual, now_ms);
            debug!("spawned {} as #{} at {}ms", note.pitch, instance_id, elapsed);
            events.push(SessionEvent::Spawned {
                instance_id,
                pitch: note.pitch,
                visual,
            });
        }

        let missed = state.field.advance(now_ms);
        if !missed.is_empty() {
            state.combo = 0;
            if let (Some(rules), Some(health)) = (self.rules.health, state.health) {
                state.health = Some(rules.on_misses(health, missed.len() as u32));
            }
            for note in &missed {
                debug!("missed {} #{}", note.pitch, note.instance_id);
                events.push(SessionEvent::Missed {
                    instance_id: note.instance_id,
                    pitch: note.pitch,
                });
            }
            self.push_stats(&mut events);
        }

        self.check_won(&mut events);
        events
    }

    /// Resolves one key press. Input that matches nothing is ignored.
    pub fn on_note_played(&mut self, pitch: Pitch) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }
        let Some(state) = self.state.as_mut() else {
            return events;
        };
        let Some(hit) = self.detector.detect(&mut state.field, pitch, state.combo) else {
            return events;
        };

        state.score += hit.judgement.points;
        state.combo += 1;
        if let (Some(rules), Some(health)) = (self.rules.health, state.health) {
            state.health = Some(rules.on_hit(health));
        }
        debug!(
            "hit {} #{} {:?} for {} points",
            pitch, hit.note.instance_id, hit.judgement.grade, hit.judgement.points
        );
        events.push(SessionEvent::Hit {
            instance_id: hit.note.instance_id,
            pitch,
            judgement: hit.judgement,
            lane_x: lane_position(pitch),
        });
        self.push_stats(&mut events);
        self.check_won(&mut events);
        events
    }

    fn start(&mut self, now_ms: Millis, events: &mut Vec<SessionEvent>) {
        if let Some(state) = self.state.as_mut() {
            state.started_at_ms = Some(now_ms);
        }
        self.set_phase(Phase::Playing, events);
    }

    fn set_phase(&mut self, phase: Phase, events: &mut Vec<SessionEvent>) {
        info!("session phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        events.push(SessionEvent::PhaseChanged { phase });
    }

    fn push_stats(&mut self, events: &mut Vec<SessionEvent>) {
        let multiplier = self.multiplier();
        let Some(state) = self.state.as_mut() else {
            return;
        };
        events.push(SessionEvent::Stats {
            score: state.score,
            combo: state.combo,
            multiplier,
            health: state.health.map(Health::get),
        });

        if let (Some(rules), Some(health)) = (self.rules.health, state.health) {
            let fever = rules.is_fever(health);
            if fever != state.fever {
                state.fever = fever;
                events.push(SessionEvent::FeverChanged { active: fever });
            }
        }
    }

    fn check_won(&mut self, events: &mut Vec<SessionEvent>) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if !state.scheduler.is_finished() || !state.field.is_empty() {
            return;
        }

        let score = state.score;
        let song_id = self.song.as_ref().map(|s| s.id.clone());
        self.set_phase(Phase::Won, events);
        if let Some(song_id) = song_id {
            info!("won {} with {} points", song_id, score);
            events.push(SessionEvent::Won { song_id, score });
        }
    }
}
