use crate::frame_loop::{FrameLoop, Task, TaskHandle};
use crate::highscore::{HighScoreEntry, HighScoreStore};
use crate::ipc::{Command, Event, Feedback, HitEffect, NoteView, Snapshot};
use crate::recorder::Recorder;
use crate::rules::{SessionRules, Variant};
use crate::session::{Phase, Session, SessionError, SessionEvent};
use log::{info, warn};
use starlane_domain_song::{
    all_songs, challenge_songs, generated_song_id, lane_position, song_from_generated,
    Song, SongId, SongImportError,
};
use starlane_ports::audio::AudioCuePort;
use starlane_ports::songgen::SongGeneratorPort;
use starlane_ports::storage::{SettingsDto, StorageError, StoragePort};
use starlane_ports::types::{Millis, Shared};
use std::collections::VecDeque;

/// How long the judgement text stays emphasized.
pub const FEEDBACK_SETTLE_MS: Millis = 200;
/// Lifetime of a hit effect in snapshots.
pub const HIT_EFFECT_MS: Millis = 1000;
pub const MISS_TEXT: &str = "Miss!";
/// Accepted range for the stored frame interval.
pub const FRAME_INTERVAL_RANGE_MS: (Millis, Millis) = (1, 1000);

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("session error: {0}")]
    Session(SessionError),
    #[error("invalid song: {0}")]
    InvalidSong(#[from] SongImportError),
    #[error("unknown song: {0}")]
    UnknownSong(String),
}

impl From<SessionError> for CoreError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidSong(e) => CoreError::InvalidSong(SongImportError::Invalid(e)),
            other => CoreError::Session(other),
        }
    }
}

/// Owns one session and everything around it: the frame loop, the recorder,
/// settings and the ports. Hosts talk to it through `Command`s, drive it with
/// `pump`, and read back `Event`s and `Snapshot`s.
pub struct GameCore {
    session: Session,
    audio: Box<dyn AudioCuePort>,
    storage: Shared<dyn StoragePort>,
    generator: Option<Box<dyn SongGeneratorPort>>,
    scores: HighScoreStore,
    settings: SettingsDto,
    catalog: Vec<Song>,
    frame_loop: FrameLoop,
    tick_task: Option<TaskHandle>,
    settle_task: Option<TaskHandle>,
    recorder: Recorder,
    feedback: Option<Feedback>,
    hit_effects: Vec<HitEffect>,
    events: VecDeque<Event>,
}

impl GameCore {
    pub fn new(
        rules: SessionRules,
        audio: Box<dyn AudioCuePort>,
        storage: Shared<dyn StoragePort>,
        generator: Option<Box<dyn SongGeneratorPort>>,
    ) -> Self {
        Self::with_session(Session::new(rules), audio, storage, generator)
    }

    pub fn with_session(
        session: Session,
        audio: Box<dyn AudioCuePort>,
        storage: Shared<dyn StoragePort>,
        generator: Option<Box<dyn SongGeneratorPort>>,
    ) -> Self {
        let mut settings = match storage.load_settings() {
            Ok(settings) => settings,
            Err(err) => {
                warn!("using default settings: {}", err);
                SettingsDto::default()
            }
        };
        let (min_frame, max_frame) = FRAME_INTERVAL_RANGE_MS;
        let frame = settings.frame_interval_ms.clamp(min_frame, max_frame);
        if frame != settings.frame_interval_ms {
            warn!(
                "frame interval {}ms out of range, using {}ms",
                settings.frame_interval_ms, frame
            );
            settings.frame_interval_ms = frame;
        }
        audio.set_volume(settings.master_volume);
        audio.set_instrument(settings.instrument);

        let catalog = match session.rules().variant {
            Variant::Arcade => all_songs(),
            Variant::Challenge => challenge_songs(),
        };

        Self {
            session,
            audio,
            scores: HighScoreStore::new(storage.clone()),
            storage,
            generator,
            settings,
            catalog,
            frame_loop: FrameLoop::new(),
            tick_task: None,
            settle_task: None,
            recorder: Recorder::new(),
            feedback: None,
            hit_effects: Vec::new(),
            events: VecDeque::new(),
        }
    }

    pub fn handle_command(&mut self, cmd: Command, now_ms: Millis) -> Result<(), CoreError> {
        match cmd {
            Command::SelectSong { song_id } => {
                let song = self
                    .catalog
                    .iter()
                    .find(|song| song.id.as_str() == song_id)
                    .cloned()
                    .ok_or(CoreError::UnknownSong(song_id))?;
                self.select(song, now_ms)?;
            }
            Command::SelectCustomSong { song } => {
                self.select(song, now_ms)?;
            }
            Command::GenerateSong { theme } => {
                self.generate(theme.trim(), now_ms)?;
            }
            Command::Confirm => {
                let events = self.session.confirm(now_ms)?;
                self.apply(events, now_ms);
            }
            Command::NotePlayed { pitch } => {
                self.audio.play_pitch(pitch);
                self.recorder.record(pitch, now_ms);
                let events = self.session.on_note_played(pitch);
                self.apply(events, now_ms);
            }
            Command::Dismiss => {
                let events = self.session.dismiss()?;
                self.apply(events, now_ms);
            }
            Command::Back => {
                let events = self.session.back();
                self.apply(events, now_ms);
            }
            Command::LoadHighScores { song_id } => {
                let song_id = SongId::new(song_id);
                let entries = self.scores.load(&song_id);
                self.events
                    .push_back(Event::HighScoresUpdated { song_id, entries });
            }
            Command::StartRecording => {
                self.stop_playback();
                if self.recorder.start_recording(now_ms) {
                    self.emit_recording();
                }
            }
            Command::StopRecording => {
                if self.recorder.stop_recording() {
                    self.emit_recording();
                }
            }
            Command::PlayRecording => {
                if self.recorder.start_playback(&mut self.frame_loop, now_ms) {
                    let notes = self.recorder.notes().len();
                    self.events.push_back(Event::PlaybackStarted { notes });
                }
            }
            Command::StopPlayback => {
                self.stop_playback();
            }
            Command::SetVolume { volume } => {
                self.settings.master_volume = volume;
                self.audio.set_volume(volume);
                self.save_settings();
            }
            Command::SetInstrument { instrument } => {
                self.settings.instrument = instrument;
                self.audio.set_instrument(instrument);
                self.save_settings();
            }
        }
        Ok(())
    }

    /// Runs every task due at `now_ms` and returns how many ran.
    pub fn pump(&mut self, now_ms: Millis) -> usize {
        let mut ran = 0;
        while let Some((handle, task)) = self.frame_loop.pop_due(now_ms) {
            ran += 1;
            match task {
                Task::SessionTick => {
                    if self.tick_task == Some(handle) {
                        self.tick_task = None;
                    }
                    let events = self.session.tick(now_ms);
                    self.apply(events, now_ms);
                    if self.session.phase() == Phase::Playing && self.tick_task.is_none() {
                        self.arm_tick(now_ms.saturating_add(self.settings.frame_interval_ms));
                    }
                }
                Task::SettleFeedback => {
                    if self.settle_task == Some(handle) {
                        self.settle_task = None;
                    }
                    if let Some(feedback) = self.feedback.as_mut() {
                        feedback.emphasized = false;
                    }
                }
                Task::PlaybackNote { pitch } => {
                    self.audio.play_pitch(pitch);
                }
                Task::PlaybackEnd => {
                    self.recorder.finish_playback();
                    self.events.push_back(Event::PlaybackFinished);
                }
            }
        }
        self.hit_effects
            .retain(|effect| now_ms.saturating_sub(effect.at_ms) < HIT_EFFECT_MS);
        ran
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// Earliest time at which `pump` has something to do.
    pub fn next_due_ms(&self) -> Option<Millis> {
        self.frame_loop.next_due_ms()
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.session.state();
        let notes = state
            .map(|state| {
                state
                    .active_notes()
                    .iter()
                    .map(|note| NoteView {
                        instance_id: note.instance_id,
                        pitch: note.pitch,
                        progress: note.progress,
                        lane_x: lane_position(note.pitch),
                        visual: note.visual,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Snapshot {
            phase: self.session.phase(),
            song_id: self.session.song().map(|song| song.id.clone()),
            score: state.map(|s| s.score()).unwrap_or(0),
            combo: state.map(|s| s.combo()).unwrap_or(0),
            multiplier: self.session.multiplier(),
            health: state.and_then(|s| s.health()),
            fever: state.map(|s| s.is_fever()).unwrap_or(false),
            notes,
            hit_effects: self.hit_effects.clone(),
            feedback: self.feedback.clone(),
            recording: self.recorder.notes().to_vec(),
        }
    }

    /// Cancels every pending task. The core stays usable afterwards, but
    /// nothing runs until a new session or playback is started.
    pub fn shutdown(&mut self) {
        self.recorder.stop_playback(&mut self.frame_loop);
        self.tick_task = None;
        self.settle_task = None;
        self.frame_loop.clear();
        info!("game core shut down");
    }

    pub fn catalog(&self) -> &[Song] {
        &self.catalog
    }

    pub fn high_scores_for(&self, song_id: &SongId) -> Vec<HighScoreEntry> {
        self.scores.load(song_id)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &SettingsDto {
        &self.settings
    }

    pub fn is_tick_armed(&self) -> bool {
        self.tick_task
            .is_some_and(|handle| self.frame_loop.is_pending(handle))
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn is_playing_back(&self) -> bool {
        self.recorder.is_playing()
    }

    fn select(&mut self, song: Song, now_ms: Millis) -> Result<(), CoreError> {
        let events = self.session.select_song(song, now_ms)?;
        self.feedback = None;
        self.hit_effects.clear();
        self.apply(events, now_ms);
        Ok(())
    }

    fn generate(&mut self, theme: &str, now_ms: Millis) -> Result<(), CoreError> {
        if theme.is_empty() {
            return Ok(());
        }
        let phase = self.session.phase();
        if !matches!(phase, Phase::Select | Phase::Ready) {
            return Err(SessionError::WrongPhase {
                action: "generate a song",
                phase,
            }
            .into());
        }

        let Some(generator) = self.generator.as_ref() else {
            self.generation_failed("no song generator available".to_string());
            return Ok(());
        };
        let song = generator
            .generate(theme)
            .map_err(|err| err.to_string())
            .and_then(|dto| {
                let id = generated_song_id(chrono::Utc::now().timestamp_millis());
                song_from_generated(dto, id).map_err(|err| err.to_string())
            });

        match song {
            Ok(song) => {
                info!("generated {} for theme {:?}", song.id, theme);
                self.select(song, now_ms)
            }
            Err(reason) => {
                self.generation_failed(reason);
                Ok(())
            }
        }
    }

    fn generation_failed(&mut self, reason: String) {
        warn!("song generation failed: {}", reason);
        self.events.push_back(Event::GenerationFailed {
            reason,
            retryable: true,
        });
    }

    fn apply(&mut self, events: Vec<SessionEvent>, now_ms: Millis) {
        for event in events {
            match event {
                SessionEvent::PhaseChanged { phase } => {
                    if phase == Phase::Playing {
                        self.arm_tick(now_ms);
                    } else {
                        self.disarm_tick();
                    }
                    if phase == Phase::Select {
                        self.feedback = None;
                        self.hit_effects.clear();
                    }
                    self.events.push_back(Event::PhaseChanged { phase });
                }
                SessionEvent::Spawned {
                    instance_id,
                    pitch,
                    visual,
                } => {
                    self.events.push_back(Event::NoteSpawned {
                        instance_id,
                        pitch,
                        visual,
                    });
                }
                SessionEvent::Hit {
                    instance_id,
                    pitch,
                    judgement,
                    lane_x,
                } => {
                    if self.session.rules().accent_on_hit {
                        self.audio.play_accent();
                    }
                    let text = judgement.grade.label().to_string();
                    self.show_feedback(text.clone(), now_ms);
                    self.hit_effects.push(HitEffect {
                        pitch,
                        lane_x,
                        at_ms: now_ms,
                    });
                    self.events.push_back(Event::HitFeedback {
                        instance_id,
                        pitch,
                        grade: judgement.grade,
                        points: judgement.points,
                        multiplier: judgement.multiplier,
                        lane_x,
                        text,
                    });
                }
                SessionEvent::Missed { instance_id, pitch } => {
                    self.show_feedback(MISS_TEXT.to_string(), now_ms);
                    self.events.push_back(Event::Missed { instance_id, pitch });
                }
                SessionEvent::Stats {
                    score,
                    combo,
                    multiplier,
                    health,
                } => {
                    self.events.push_back(Event::ScoreUpdated {
                        score,
                        combo,
                        multiplier,
                        health,
                    });
                }
                SessionEvent::FeverChanged { active } => {
                    self.events.push_back(Event::FeverChanged { active });
                }
                SessionEvent::Won { song_id, score } => {
                    self.on_won(song_id, score);
                }
            }
        }
    }

    fn on_won(&mut self, song_id: SongId, score: u64) {
        for &pitch in &self.session.rules().fanfare {
            self.audio.play_pitch(pitch);
        }
        if self.session.rules().keep_high_scores {
            let entries = self.scores.record(&song_id, score);
            self.events.push_back(Event::HighScoresUpdated {
                song_id: song_id.clone(),
                entries,
            });
        }
        self.events.push_back(Event::SessionWon { song_id, score });
    }

    fn show_feedback(&mut self, text: String, now_ms: Millis) {
        self.feedback = Some(Feedback {
            text,
            emphasized: true,
        });
        if let Some(handle) = self.settle_task.take() {
            self.frame_loop.cancel(handle);
        }
        self.settle_task = Some(
            self.frame_loop
                .schedule_at(now_ms.saturating_add(FEEDBACK_SETTLE_MS), Task::SettleFeedback),
        );
    }

    fn arm_tick(&mut self, due_ms: Millis) {
        self.disarm_tick();
        self.tick_task = Some(self.frame_loop.schedule_at(due_ms, Task::SessionTick));
    }

    fn disarm_tick(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            self.frame_loop.cancel(handle);
        }
    }

    fn stop_playback(&mut self) {
        if self.recorder.stop_playback(&mut self.frame_loop) > 0 {
            self.events.push_back(Event::PlaybackFinished);
        }
    }

    fn emit_recording(&mut self) {
        self.events.push_back(Event::RecordingChanged {
            recording: self.recorder.is_recording(),
            notes: self.recorder.notes().len(),
        });
    }

    fn save_settings(&mut self) {
        if let Err(err) = self.storage.save_settings(&self.settings) {
            warn!("could not save settings: {}", err);
        }
        self.events.push_back(Event::SettingsUpdated {
            settings: self.settings.clone(),
        });
    }
}
