mod autopilot;
mod cli;
mod console_audio;
mod json_generator;

use anyhow::{bail, Context, Result};
use autopilot::Autopilot;
use clap::Parser;
use cli::{Args, Cmd, PilotArgs};
use console_audio::ConsoleAudio;
use json_generator::JsonFileGenerator;
use log::{debug, info, warn};
use starlane_core::{
    Command, Event, GameCore, Phase, Session, SessionRules, Variant, MISS_TEXT,
};
use starlane_domain_song::{import_song_path, SongId};
use starlane_infra_storage_fs::FsStorage;
use starlane_ports::songgen::SongGeneratorPort;
use starlane_ports::storage::StoragePort;
use starlane_ports::types::Shared;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let storage: Shared<dyn StoragePort> = match args.data_dir.clone() {
        Some(dir) => Arc::new(FsStorage::new(dir)),
        None => Arc::new(FsStorage::default()),
    };
    let rules = SessionRules::for_variant(Variant::from(args.variant));

    match args.command {
        Cmd::List => {
            let core = build_core(rules, storage, None, None);
            for song in core.catalog() {
                println!(
                    "{:<28} {:<32} {:<6} {:>3} notes",
                    song.id,
                    song.title,
                    song.difficulty.label(),
                    song.notes.len()
                );
            }
        }
        Cmd::Scores { song_id } => {
            let core = build_core(rules, storage, None, None);
            let entries = core.high_scores_for(&SongId::new(song_id.clone()));
            if entries.is_empty() {
                println!("no scores for {}", song_id);
            }
            for (rank, entry) in entries.iter().enumerate() {
                println!("{}. {:>8}  (at {})", rank + 1, entry.score, entry.achieved_at);
            }
        }
        Cmd::Play {
            song_id,
            file,
            pilot,
        } => {
            let mut core = build_core(rules, storage, None, pilot.seed);
            let command = match (song_id, file) {
                (_, Some(path)) => Command::SelectCustomSong {
                    song: import_song_path(&path, file_song_id(&path))?,
                },
                (Some(song_id), None) => Command::SelectSong { song_id },
                (None, None) => bail!("name a song id or pass --file"),
            };
            core.handle_command(command, 0)?;
            run_session(&mut core, pilot)?;
        }
        Cmd::Generate {
            theme,
            source,
            pilot,
        } => {
            let generator: Box<dyn SongGeneratorPort> = Box::new(JsonFileGenerator::new(source));
            let mut core = build_core(rules, storage, Some(generator), pilot.seed);
            core.handle_command(Command::GenerateSong { theme }, 0)?;
            for event in core.drain_events() {
                if let Event::GenerationFailed { reason, .. } = event {
                    bail!("generation failed: {}", reason);
                }
            }
            run_session(&mut core, pilot)?;
        }
    }
    Ok(())
}

fn build_core(
    rules: SessionRules,
    storage: Shared<dyn StoragePort>,
    generator: Option<Box<dyn SongGeneratorPort>>,
    seed: Option<u64>,
) -> GameCore {
    let session = match seed {
        Some(seed) => Session::with_seed(rules, seed),
        None => Session::new(rules),
    };
    GameCore::with_session(session, Box::new(ConsoleAudio), storage, generator)
}

fn file_song_id(path: &Path) -> SongId {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "custom".to_string());
    SongId::new(format!("file-{}", stem))
}

fn run_session(core: &mut GameCore, pilot: PilotArgs) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_for_handler = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        warn!("Ctrl-C received, leaving the session");
        stop_for_handler.store(true, Ordering::SeqCst);
    })
    .context("setting the Ctrl-C handler")?;

    let song = core
        .session()
        .song()
        .context("no song selected")?
        .clone();
    info!("playing {} ({}, {} notes)", song.title, song.difficulty.label(), song.len());

    let mut pilot = Autopilot::new(core.session().rules().window, pilot.skill, pilot.seed);
    let frame = Duration::from_millis(core.settings().frame_interval_ms.max(1));
    let start = Instant::now();
    if core.session().phase() == Phase::Ready {
        core.handle_command(Command::Confirm, 0)?;
    }

    let mut finished = false;
    while !finished {
        let now = start.elapsed().as_millis() as u64;
        if stop.load(Ordering::SeqCst) {
            core.handle_command(Command::Back, now)?;
            break;
        }

        core.pump(now);
        for pitch in pilot.presses(&core.snapshot()) {
            core.handle_command(Command::NotePlayed { pitch }, now)?;
        }
        for event in core.drain_events() {
            finished |= report(&event);
        }
        spin_sleep::sleep(frame);
    }

    let snapshot = core.snapshot();
    if finished {
        println!("cleared {} with {} points", song.title, snapshot.score);
        for (rank, entry) in core.high_scores_for(&song.id).iter().enumerate() {
            println!("  {}. {}", rank + 1, entry.score);
        }
        core.handle_command(Command::Dismiss, start.elapsed().as_millis() as u64)?;
    }
    core.shutdown();
    Ok(())
}

/// Prints one event. Returns true once the session is won.
fn report(event: &Event) -> bool {
    match event {
        Event::HitFeedback {
            pitch,
            text,
            points,
            multiplier,
            ..
        } => {
            println!("{:<4} {:<9} +{} (x{})", pitch, text, points, multiplier);
        }
        Event::Missed { pitch, .. } => println!("{:<4} {}", pitch, MISS_TEXT),
        Event::FeverChanged { active: true } => println!("** fever **"),
        Event::FeverChanged { active: false } => println!("fever over"),
        Event::ScoreUpdated {
            score,
            combo,
            health,
            ..
        } => match health {
            Some(health) => debug!("score {} combo {} health {}", score, combo, health),
            None => debug!("score {} combo {}", score, combo),
        },
        Event::SessionWon { .. } => return true,
        other => debug!("{:?}", other),
    }
    false
}
