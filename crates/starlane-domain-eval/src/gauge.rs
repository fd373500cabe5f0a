use serde::{Deserialize, Serialize};

pub const HEALTH_MAX: u32 = 100;

/// Health clamped to `0..=100`. Hitting the floor has no consequence of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Health(u32);

impl Health {
    pub fn new(value: u32) -> Self {
        Self(value.min(HEALTH_MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn raised(self, amount: u32) -> Self {
        Self::new(self.0.saturating_add(amount))
    }

    pub fn lowered(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthRules {
    pub initial: u32,
    pub gain_on_hit: u32,
    pub loss_per_miss: u32,
    /// Fever is purely cosmetic; it lights up at or above this value.
    pub fever_threshold: u32,
}

impl HealthRules {
    pub fn arcade() -> Self {
        Self {
            initial: 50,
            gain_on_hit: 3,
            loss_per_miss: 5,
            fever_threshold: 90,
        }
    }

    pub fn start(&self) -> Health {
        Health::new(self.initial)
    }

    pub fn on_hit(&self, health: Health) -> Health {
        health.raised(self.gain_on_hit)
    }

    pub fn on_misses(&self, health: Health, misses: u32) -> Health {
        health.lowered(self.loss_per_miss.saturating_mul(misses))
    }

    pub fn is_fever(&self, health: Health) -> bool {
        health.get() >= self.fever_threshold
    }
}
