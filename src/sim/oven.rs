//! Oven bake
//!
//! The final step. The bowl is tipped into the tin, a fake clock runs to
//! 0:35 and the result is revealed. Results alternate between success and
//! failure across bakes in a session, starting with success.

use serde::{Deserialize, Serialize};

use super::recipe::RecipeState;
use super::timer::Scheduler;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BakeOutcome {
    Success,
    TryAgain,
}

impl BakeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BakeOutcome::Success => "Success!",
            BakeOutcome::TryAgain => "Try Again!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BakeOutcome::Success)
    }
}

/// Session-wide alternation of bake results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeToggle {
    last_was_success: bool,
}

impl OutcomeToggle {
    pub fn next(&mut self) -> BakeOutcome {
        self.last_was_success = !self.last_was_success;
        if self.last_was_success {
            BakeOutcome::Success
        } else {
            BakeOutcome::TryAgain
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenPhase {
    /// Batter going into the tin
    Depositing,
    Baking { elapsed_secs: u32 },
    Revealed(BakeOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OvenTimer {
    Deposited,
    BakeTick,
}

#[derive(Debug, Clone)]
pub struct OvenBake {
    phase: OvenPhase,
    timers: Scheduler<OvenTimer>,
    tick_ms: u64,
    bake_ticks: u32,
}

impl OvenBake {
    pub fn start(tuning: &Tuning) -> Self {
        let mut timers = Scheduler::new();
        timers.after(tuning.oven_deposit_ms, OvenTimer::Deposited);
        log::info!("Oven scene loaded");
        Self {
            phase: OvenPhase::Depositing,
            timers,
            tick_ms: tuning.oven_tick_ms,
            bake_ticks: tuning.oven_bake_ticks,
        }
    }

    pub fn phase(&self) -> OvenPhase {
        self.phase
    }

    /// Fake seconds shown on the oven clock
    pub fn clock_secs(&self) -> u32 {
        match self.phase {
            OvenPhase::Depositing => 0,
            OvenPhase::Baking { elapsed_secs } => elapsed_secs,
            OvenPhase::Revealed(_) => self.bake_ticks,
        }
    }

    pub fn outcome(&self) -> Option<BakeOutcome> {
        match self.phase {
            OvenPhase::Revealed(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn advance(&mut self, recipe: &mut RecipeState, toggle: &mut OutcomeToggle, dt_ms: u64) {
        let target = self.timers.now() + dt_ms;
        while let Some((_, timer)) = self.timers.next_due(target) {
            match timer {
                OvenTimer::Deposited => {
                    self.phase = OvenPhase::Baking { elapsed_secs: 0 };
                    self.timers
                        .repeat(self.tick_ms, self.bake_ticks, OvenTimer::BakeTick);
                }
                OvenTimer::BakeTick => self.tick(recipe, toggle),
            }
        }
        self.timers.settle(target);
    }

    fn tick(&mut self, recipe: &mut RecipeState, toggle: &mut OutcomeToggle) {
        let OvenPhase::Baking { elapsed_secs } = self.phase else {
            return;
        };
        let elapsed_secs = elapsed_secs + 1;
        log::debug!("Oven clock {}s", elapsed_secs);
        if elapsed_secs < self.bake_ticks {
            self.phase = OvenPhase::Baking { elapsed_secs };
            return;
        }

        let outcome = toggle.next();
        self.phase = OvenPhase::Revealed(outcome);
        recipe.add_player_action(format!("Baked brownies: {}", outcome.as_str()));
        log::info!("Bake finished: {}", outcome.as_str());
    }

    /// Leaving the oven abandons the bake
    pub fn teardown(&mut self) {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            log::info!("Oven teardown cancelled {} timers", cancelled);
        }
    }
}
