//! Data-driven game timings
//!
//! Every interval, weight and pour amount the stations use. Defaults match the
//! shipped game; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{0}` must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub bowl_grams: u32,
    pub egg_grams: u32,
    pub pour_tick_ms: u64,
    pub pour_initial_max_grams: u32,
    pub pour_ramp_ms: u64,
    pub pour_max_grams: u32,
    pub egg_cooldown_ms: u64,
    pub mix_duration_ms: u64,
    pub mix_tick_ms: u64,
    pub mix_progress_hide_ms: u64,
    pub heat_duration_ms: u64,
    pub toast_ms: u64,
    pub oven_deposit_ms: u64,
    pub oven_tick_ms: u64,
    pub oven_bake_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bowl_grams: BOWL_GRAMS,
            egg_grams: EGG_GRAMS,
            pour_tick_ms: POUR_TICK_MS,
            pour_initial_max_grams: POUR_INITIAL_MAX_GRAMS,
            pour_ramp_ms: POUR_RAMP_MS,
            pour_max_grams: POUR_MAX_GRAMS,
            egg_cooldown_ms: EGG_COOLDOWN_MS,
            mix_duration_ms: MIX_DURATION_MS,
            mix_tick_ms: MIX_TICK_MS,
            mix_progress_hide_ms: MIX_PROGRESS_HIDE_MS,
            heat_duration_ms: HEAT_DURATION_MS,
            toast_ms: TOAST_MS,
            oven_deposit_ms: OVEN_DEPOSIT_MS,
            oven_tick_ms: OVEN_TICK_MS,
            oven_bake_ticks: OVEN_BAKE_TICKS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()
    }

    /// Reject values that would stall or spin the scheduler
    pub fn validate(self) -> Result<Self, TuningError> {
        let checks = [
            ("egg_grams", u64::from(self.egg_grams)),
            ("pour_tick_ms", self.pour_tick_ms),
            ("pour_initial_max_grams", u64::from(self.pour_initial_max_grams)),
            ("pour_ramp_ms", self.pour_ramp_ms),
            ("pour_max_grams", u64::from(self.pour_max_grams)),
            ("mix_duration_ms", self.mix_duration_ms),
            ("mix_tick_ms", self.mix_tick_ms),
            ("oven_tick_ms", self.oven_tick_ms),
            ("oven_bake_ticks", u64::from(self.oven_bake_ticks)),
        ];
        match checks.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(TuningError::Zero(*field)),
            None => Ok(self),
        }
    }

    /// Progress updates in one mixing cycle
    pub fn mix_updates(&self) -> u32 {
        (self.mix_duration_ms / self.mix_tick_ms.max(1)).max(1) as u32
    }

    /// Per-tick pour cap after holding for `held_ms`
    pub fn pour_cap(&self, held_ms: u64) -> u32 {
        let ramp = (held_ms / self.pour_ramp_ms.max(1)).min(u64::from(self.pour_max_grams)) as u32;
        (1 + ramp).min(self.pour_max_grams)
    }
}
