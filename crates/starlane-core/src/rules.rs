use serde::{Deserialize, Serialize};
use starlane_domain_eval::{HealthRules, HitWindow, MotionConfig, ScoringRule};
use starlane_ports::types::Pitch;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Full game: confirmation screen, graded hits, combo multiplier, health, high scores.
    Arcade,
    /// Two-state game: flat points per hit, nothing persisted.
    Challenge,
}

#[derive(Clone, Debug)]
pub struct SessionRules {
    pub variant: Variant,
    pub motion: MotionConfig,
    pub window: HitWindow,
    pub scoring: ScoringRule,
    pub health: Option<HealthRules>,
    pub confirm_before_play: bool,
    pub keep_high_scores: bool,
    pub accent_on_hit: bool,
    pub fanfare: Vec<Pitch>,
}

impl SessionRules {
    pub fn arcade() -> Self {
        Self {
            variant: Variant::Arcade,
            // 0.75 units per 60Hz frame
            motion: MotionConfig {
                spawn_progress: -15.0,
                despawn_progress: 105.0,
                units_per_second: 45.0,
            },
            window: HitWindow {
                hit_line: 82.0,
                half_width: 12.0,
            },
            scoring: ScoringRule::tiered(),
            health: Some(HealthRules::arcade()),
            confirm_before_play: true,
            keep_high_scores: true,
            accent_on_hit: true,
            fanfare: vec![Pitch::C5, Pitch::E4, Pitch::G4],
        }
    }

    pub fn challenge() -> Self {
        // hittable strictly between 60 and 95
        let window = HitWindow {
            hit_line: 77.5,
            half_width: 17.5,
        };
        Self {
            variant: Variant::Challenge,
            // 1.5 units per 60Hz frame
            motion: MotionConfig {
                spawn_progress: 0.0,
                despawn_progress: 110.0,
                units_per_second: 90.0,
            },
            window,
            scoring: ScoringRule::flat(10, window),
            health: None,
            confirm_before_play: false,
            keep_high_scores: false,
            accent_on_hit: false,
            fanfare: Vec::new(),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Arcade => Self::arcade(),
            Variant::Challenge => Self::challenge(),
        }
    }
}
