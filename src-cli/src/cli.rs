use clap::{Parser, Subcommand, ValueEnum};
use starlane_core::Variant;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "starlane", about = "Rhythm sessions in the terminal, played by an autopilot.")]
pub struct Args {
    /// Game rules: arcade (graded hits, health, high scores) or challenge (flat points).
    #[arg(short, long, value_enum, default_value_t = VariantArg::Arcade)]
    pub variant: VariantArg,

    /// Where settings and high scores live. Defaults to the user config dir.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List the songs available for the chosen variant.
    List,

    /// Show the saved top scores of a song.
    Scores { song_id: String },

    /// Play a catalog song, or a song JSON file with --file.
    Play {
        song_id: Option<String>,

        #[arg(short, long, conflicts_with = "song_id")]
        file: Option<PathBuf>,

        #[command(flatten)]
        pilot: PilotArgs,
    },

    /// Build a song for a theme with a JSON-backed generator, then play it.
    Generate {
        theme: String,

        /// JSON document the generator hands back.
        #[arg(long)]
        source: PathBuf,

        #[command(flatten)]
        pilot: PilotArgs,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
pub struct PilotArgs {
    /// Chance that the autopilot presses a note it sees coming (0.0..=1.0).
    #[arg(long, default_value_t = 0.9, value_parser = parse_skill)]
    pub skill: f64,

    /// Seed for the autopilot and the note visuals.
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_skill(raw: &str) -> Result<f64, String> {
    let skill: f64 = raw.parse().map_err(|_| format!("`{}` is not a number", raw))?;
    if !(0.0..=1.0).contains(&skill) {
        return Err(format!("skill must be within 0.0..=1.0, got {}", raw));
    }
    Ok(skill)
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantArg {
    Arcade,
    Challenge,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Arcade => Variant::Arcade,
            VariantArg::Challenge => Variant::Challenge,
        }
    }
}
