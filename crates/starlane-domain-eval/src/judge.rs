use crate::motion::{ActiveNote, Playfield};
use serde::{Deserialize, Serialize};
use starlane_ports::types::Pitch;

/// Tolerance band around the hit line. A note is hittable while
/// `|progress - hit_line| < half_width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitWindow {
    pub hit_line: f64,
    pub half_width: f64,
}

impl HitWindow {
    pub fn distance(&self, progress: f64) -> f64 {
        (progress - self.hit_line).abs()
    }

    pub fn contains(&self, progress: f64) -> bool {
        self.distance(progress) < self.half_width
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Perfect,
    Great,
    Good,
}

impl Grade {
    pub fn label(self) -> &'static str {
        match self {
            Grade::Perfect => "Perfect!",
            Grade::Great => "Great!",
            Grade::Good => "Good!",
        }
    }
}

/// One accuracy band: everything strictly below `max_accuracy` that a tighter
/// tier did not claim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradeTier {
    pub grade: Grade,
    pub max_accuracy: f64,
    pub points: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultiplierPolicy {
    /// One extra multiplier step for every `step` consecutive hits.
    Combo { step: u32 },
    Fixed,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("scoring needs at least one tier")]
    NoTiers,
    #[error("tier {0} is not looser than the tier before it")]
    UnorderedTiers(usize),
    #[error("combo multiplier step must be positive")]
    ZeroComboStep,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoringRule {
    tiers: Vec<GradeTier>,
    multiplier: MultiplierPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Judgement {
    pub grade: Grade,
    pub accuracy: f64,
    pub base_points: u32,
    pub multiplier: u32,
    pub points: u64,
}

impl ScoringRule {
    /// Tiers must be listed tightest first with strictly growing bounds, which
    /// keeps the bands disjoint.
    pub fn new(tiers: Vec<GradeTier>, multiplier: MultiplierPolicy) -> Result<Self, RuleError> {
        if tiers.is_empty() {
            return Err(RuleError::NoTiers);
        }
        if let Some(idx) = tiers
            .windows(2)
            .position(|pair| pair[1].max_accuracy <= pair[0].max_accuracy)
        {
            return Err(RuleError::UnorderedTiers(idx + 1));
        }
        if multiplier == (MultiplierPolicy::Combo { step: 0 }) {
            return Err(RuleError::ZeroComboStep);
        }
        Ok(Self { tiers, multiplier })
    }

    /// Three tiers with a combo multiplier.
    pub fn tiered() -> Self {
        Self {
            tiers: vec![
                GradeTier {
                    grade: Grade::Perfect,
                    max_accuracy: 4.0,
                    points: 300,
                },
                GradeTier {
                    grade: Grade::Great,
                    max_accuracy: 8.0,
                    points: 200,
                },
                GradeTier {
                    grade: Grade::Good,
                    max_accuracy: 12.0,
                    points: 100,
                },
            ],
            multiplier: MultiplierPolicy::Combo { step: 10 },
        }
    }

    /// Same points for any hit inside the window, no multiplier.
    pub fn flat(points: u32, window: HitWindow) -> Self {
        Self {
            tiers: vec![GradeTier {
                grade: Grade::Good,
                max_accuracy: window.half_width,
                points,
            }],
            multiplier: MultiplierPolicy::Fixed,
        }
    }

    pub fn tiers(&self) -> &[GradeTier] {
        &self.tiers
    }

    pub fn multiplier(&self, combo: u32) -> u32 {
        match self.multiplier {
            MultiplierPolicy::Combo { step } => combo / step.max(1) + 1,
            MultiplierPolicy::Fixed => 1,
        }
    }

    pub fn tier_for(&self, accuracy: f64) -> Option<&GradeTier> {
        self.tiers.iter().find(|tier| accuracy < tier.max_accuracy)
    }

    pub fn judge(&self, accuracy: f64, combo: u32) -> Option<Judgement> {
        let tier = self.tier_for(accuracy)?;
        let multiplier = self.multiplier(combo);
        Some(Judgement {
            grade: tier.grade,
            accuracy,
            base_points: tier.points,
            multiplier,
            points: tier.points as u64 * multiplier as u64,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub instance_id: u64,
    pub accuracy: f64,
}

/// Picks the unhit note of `pitch` inside the window that is closest to the
/// hit line. Equal distances go to the note spawned first.
pub fn find_candidate(notes: &[ActiveNote], pitch: Pitch, window: &HitWindow) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for note in notes {
        if note.pitch != pitch || note.hit || !window.contains(note.progress) {
            continue;
        }
        let accuracy = window.distance(note.progress);
        let closer = match best {
            None => true,
            Some(current) => {
                accuracy < current.accuracy
                    || (accuracy == current.accuracy && note.instance_id < current.instance_id)
            }
        };
        if closer {
            best = Some(Candidate {
                instance_id: note.instance_id,
                accuracy,
            });
        }
    }
    best
}

#[derive(Clone, Debug)]
pub struct HitDetector {
    window: HitWindow,
    scoring: ScoringRule,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetectedHit {
    pub note: ActiveNote,
    pub judgement: Judgement,
}

impl HitDetector {
    pub fn new(window: HitWindow, scoring: ScoringRule) -> Self {
        Self { window, scoring }
    }

    pub fn window(&self) -> &HitWindow {
        &self.window
    }

    pub fn scoring(&self) -> &ScoringRule {
        &self.scoring
    }

    /// Resolves one player input against the field. On a match the note is
    /// removed from `field`; with no match nothing changes.
    pub fn detect(&self, field: &mut Playfield, pitch: Pitch, combo: u32) -> Option<DetectedHit> {
        let candidate = find_candidate(field.notes(), pitch, &self.window)?;
        let judgement = self.scoring.judge(candidate.accuracy, combo)?;
        let note = field.take_hit(candidate.instance_id)?;
        Some(DetectedHit { note, judgement })
    }
}
