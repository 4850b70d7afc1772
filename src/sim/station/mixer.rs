//! Stand mixer
//!
//! A mixing cycle runs for a fixed duration with evenly spaced progress
//! updates. Stopping early keeps whatever progress was reached.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Appliance, Ctx, EquipmentKind, Outcome, Readout, Rejection, Timer, Zone};
use crate::layout::{MIXER_BODY, MIXER_BOWL};
use crate::sim::recipe::{BowlLocation, BowlState, RecipeState};
use crate::sim::timer::{Scheduler, TaskHandle};

/// Read model for the mixer UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixingStatus {
    pub has_bowl: bool,
    pub is_running: bool,
    /// 0..=100
    pub mixing_level: u8,
    pub is_fully_mixed: bool,
    pub progress_visible: bool,
}

#[derive(Debug, Clone, Copy)]
struct MixRun {
    tick: TaskHandle,
    done: TaskHandle,
    updates: u32,
}

#[derive(Debug, Clone)]
pub struct Mixer {
    bowl_present: bool,
    level: u8,
    run: Option<MixRun>,
    progress_visible: bool,
    hide: Option<TaskHandle>,
}

impl Mixer {
    pub fn enter(recipe: &RecipeState) -> Self {
        Self {
            bowl_present: recipe.location() == BowlLocation::InMixer,
            level: 0,
            run: None,
            progress_visible: false,
            hide: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn status(&self) -> MixingStatus {
        MixingStatus {
            has_bowl: self.bowl_present,
            is_running: self.is_running(),
            mixing_level: self.level,
            is_fully_mixed: self.level >= 100,
            progress_visible: self.progress_visible,
        }
    }

    pub fn start_mixing(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if self.run.is_some() {
            return Err(Rejection::MixerRunning);
        }
        if !self.bowl_present {
            return Err(Rejection::NoBowlInMixer);
        }
        if let Some(hide) = self.hide.take() {
            ctx.timers.cancel(hide);
        }

        let updates = ctx.tuning.mix_updates();
        let tick = ctx.timers.repeat(ctx.tuning.mix_tick_ms, updates, Timer::MixTick);
        let done = ctx.timers.after(ctx.tuning.mix_duration_ms, Timer::MixDone);
        self.run = Some(MixRun {
            tick,
            done,
            updates: 0,
        });
        self.level = 0;
        self.progress_visible = true;
        log::info!("Mixing started ({} updates)", updates);
        Ok(Some("Mixing started!".to_string()))
    }

    /// Abort the cycle, keeping the level reached so far
    pub fn stop_mixing(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        let Some(run) = self.run.take() else {
            return Ok(None);
        };
        ctx.timers.cancel(run.tick);
        ctx.timers.cancel(run.done);
        log::info!("Mixing stopped at {}%", self.level);
        Ok(Some("Mixing stopped.".to_string()))
    }

    fn progress(&mut self, ctx: &mut Ctx<'_>) {
        let total = ctx.tuning.mix_updates();
        if let Some(run) = &mut self.run {
            run.updates += 1;
            self.level = ((run.updates * 100 + total / 2) / total).min(100) as u8;
        }
    }

    fn finish(&mut self, ctx: &mut Ctx<'_>) -> Option<String> {
        let run = self.run.take()?;
        ctx.timers.cancel(run.tick);
        self.level = 100;
        ctx.recipe
            .set_bowl_state(BowlState::Mixed, Some("Mixed ingredients in mixer"));
        self.hide = Some(
            ctx.timers
                .after(ctx.tuning.mix_progress_hide_ms, Timer::MixProgressHide),
        );
        log::info!("Mixing complete");
        Some("Mixing complete! Ingredients are well combined.".to_string())
    }
}

impl Appliance for Mixer {
    fn kind(&self) -> EquipmentKind {
        EquipmentKind::Mixer
    }

    fn has_bowl(&self) -> bool {
        self.bowl_present
    }

    fn place_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if self.bowl_present {
            return Err(Rejection::AlreadyHasBowl(EquipmentKind::Mixer));
        }
        if !ctx.carry.is_holding_bowl() {
            return Err(Rejection::NotHoldingBowl);
        }
        ctx.carry.release();
        self.bowl_present = true;
        self.level = 0;
        ctx.recipe
            .set_bowl_location(BowlLocation::InMixer, Some("Placed bowl in mixer"));
        Ok(Some("Bowl placed in mixer!".to_string()))
    }

    fn remove_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if !self.bowl_present {
            return Err(Rejection::NoBowl(EquipmentKind::Mixer));
        }
        if self.run.is_some() {
            return Err(Rejection::RemoveWhileMixing);
        }
        if ctx.carry.is_holding() {
            return Err(Rejection::RemoveWhileHolding);
        }
        if let Some(hide) = self.hide.take() {
            ctx.timers.cancel(hide);
        }
        self.bowl_present = false;
        self.progress_visible = false;
        ctx.recipe
            .set_bowl_location(BowlLocation::Inventory, Some("Took bowl out of mixer"));
        ctx.shelf.restock_bowl();
        Ok(Some("Removed bowl from mixer.".to_string()))
    }

    fn primary_action(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        self.start_mixing(ctx)
    }

    fn zone_at(&self, pos: Vec2) -> Option<Zone> {
        if self.bowl_present && MIXER_BOWL.contains(pos) {
            Some(Zone::MixerBowl)
        } else if MIXER_BODY.contains(pos) {
            Some(Zone::MixerBody)
        } else {
            None
        }
    }

    fn press(&mut self, ctx: &mut Ctx<'_>, zone: Zone) -> Outcome {
        if ctx.carry.is_holding_bowl() {
            return self.place_bowl(ctx);
        }
        match zone {
            Zone::MixerBowl => self.remove_bowl(ctx),
            _ => self.start_mixing(ctx),
        }
    }

    fn on_timer(&mut self, ctx: &mut Ctx<'_>, timer: Timer) -> Option<String> {
        match timer {
            Timer::MixTick => {
                self.progress(ctx);
                None
            }
            Timer::MixDone => self.finish(ctx),
            Timer::MixProgressHide => {
                self.hide = None;
                self.progress_visible = false;
                None
            }
            _ => None,
        }
    }

    fn teardown(&mut self, ctx: &mut Ctx<'_>) {
        let _ = self.stop_mixing(ctx);
        if let Some(hide) = self.hide.take() {
            ctx.timers.cancel(hide);
        }
    }

    fn readout(&self, _timers: &Scheduler<Timer>) -> Readout {
        Readout::Mixer(self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{PointerButton, Station};
    use super::*;
    use crate::sim::Ingredient;

    fn mixer(station: &Station) -> &Mixer {
        station.mixer().unwrap()
    }

    fn loaded(recipe: &mut RecipeState) -> Station {
        let mut station = station(EquipmentKind::Mixer, recipe);
        station.pick_up(Ingredient::Bowl);
        station.pointer_down(recipe, MIXER_BODY.center(), PointerButton::Primary);
        station
    }

    #[test]
    fn test_place_bowl() {
        let mut recipe = RecipeState::new();
        let station = loaded(&mut recipe);
        assert!(mixer(&station).status().has_bowl);
        assert_eq!(recipe.location(), BowlLocation::InMixer);
        assert_eq!(station.message(), Some("Bowl placed in mixer!"));
    }

    #[test]
    fn test_full_cycle_completes_at_duration() {
        let mut recipe = RecipeState::new();
        let mut station = loaded(&mut recipe);
        station.primary_action(&mut recipe).unwrap();
        assert!(mixer(&station).is_running());

        station.advance(&mut recipe, 1500);
        assert_eq!(mixer(&station).level(), 50);

        station.advance(&mut recipe, 1500);
        let status = mixer(&station).status();
        assert!(!status.is_running);
        assert!(status.is_fully_mixed);
        assert_eq!(status.mixing_level, 100);
        assert!(status.progress_visible);
        assert_eq!(recipe.state(), &BowlState::Mixed);
        assert_eq!(station.message(), Some("Mixing complete! Ingredients are well combined."));

        station.advance(&mut recipe, 2000);
        assert!(!mixer(&station).status().progress_visible);
        assert_eq!(station.pending_timers(), 0);
    }

    #[test]
    fn test_stop_early_keeps_level() {
        let mut recipe = RecipeState::new();
        let mut station = loaded(&mut recipe);
        station.primary_action(&mut recipe).unwrap();
        station.advance(&mut recipe, 600);
        station.stop_mixing(&mut recipe).unwrap();

        let status = mixer(&station).status();
        assert!(!status.is_running);
        assert_eq!(status.mixing_level, 20);
        assert!(!status.is_fully_mixed);
        assert_eq!(station.pending_timers(), 0);
        assert_ne!(recipe.state(), &BowlState::Mixed);
    }

    #[test]
    fn test_start_rejections() {
        let mut recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Mixer, &recipe);
        assert_eq!(station.primary_action(&mut recipe), Err(Rejection::NoBowlInMixer));

        let mut station = loaded(&mut recipe);
        station.primary_action(&mut recipe).unwrap();
        assert_eq!(station.primary_action(&mut recipe), Err(Rejection::MixerRunning));
    }

    #[test]
    fn test_remove_waits_for_mixing() {
        let mut recipe = RecipeState::new();
        let mut station = loaded(&mut recipe);
        station.primary_action(&mut recipe).unwrap();
        station.pointer_down(&mut recipe, MIXER_BOWL.center(), PointerButton::Primary);
        assert_eq!(rejections(&mut station), vec![Rejection::RemoveWhileMixing]);
        assert_eq!(station.message(), Some("Wait for mixing to finish!"));

        station.advance(&mut recipe, 3000);
        station.pointer_down(&mut recipe, MIXER_BOWL.center(), PointerButton::Primary);
        assert!(!mixer(&station).status().has_bowl);
        assert_eq!(recipe.location(), BowlLocation::Inventory);
        assert!(station.shelf().is_stocked(Ingredient::Bowl));
    }

    #[test]
    fn test_remove_while_holding_rejected() {
        let mut recipe = RecipeState::new();
        let mut station = loaded(&mut recipe);
        station.pick_up(Ingredient::Vanilla);
        station.pointer_down(&mut recipe, MIXER_BOWL.center(), PointerButton::Primary);
        assert_eq!(rejections(&mut station), vec![Rejection::RemoveWhileHolding]);
        assert!(mixer(&station).status().has_bowl);
    }

    #[test]
    fn test_leaving_mid_cycle_cancels() {
        let mut recipe = RecipeState::new();
        let mut station = loaded(&mut recipe);
        station.primary_action(&mut recipe).unwrap();
        station.advance(&mut recipe, 1000);
        station.teardown(&mut recipe);

        assert_eq!(station.pending_timers(), 0);
        station.advance(&mut recipe, 10_000);
        assert_ne!(recipe.state(), &BowlState::Mixed);
    }
}
