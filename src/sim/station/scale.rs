//! Kitchen scale
//!
//! Weighs the bowl and its contents. Holding an ingredient over the bowl
//! pours it in continuously; eggs go in one at a time.

use glam::Vec2;

use super::{Appliance, Ctx, EquipmentKind, Outcome, Readout, Rejection, Timer, Zone};
use crate::layout::{SCALE_BODY, SCALE_BOWL};
use crate::sim::ingredient::Ingredient;
use crate::sim::recipe::{BowlLocation, RecipeState};
use crate::sim::timer::{Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy)]
struct Pour {
    ingredient: Ingredient,
    started_at: u64,
    last_egg_at: u64,
    tick: TaskHandle,
}

#[derive(Debug, Clone)]
pub struct Scale {
    bowl_present: bool,
    raw_grams: u32,
    tare_grams: u32,
    pour: Option<Pour>,
}

impl Scale {
    pub fn enter(recipe: &RecipeState, bowl_grams: u32) -> Self {
        let bowl_present = recipe.location() == BowlLocation::OnScale;
        let raw_grams = if bowl_present {
            bowl_grams.saturating_add(recipe.total_grams())
        } else {
            0
        };
        Self {
            bowl_present,
            raw_grams,
            tare_grams: 0,
            pour: None,
        }
    }

    pub fn bowl_present(&self) -> bool {
        self.bowl_present
    }

    pub fn raw_grams(&self) -> u32 {
        self.raw_grams
    }

    pub fn tare_grams(&self) -> u32 {
        self.tare_grams
    }

    /// Raw weight minus the tare offset; negative once the load is lifted
    pub fn display_grams(&self) -> i64 {
        i64::from(self.raw_grams) - i64::from(self.tare_grams)
    }

    pub fn is_pouring(&self) -> bool {
        self.pour.is_some()
    }

    /// Zero the display at the current load
    pub fn tare(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if ctx.carry.is_holding() {
            return Err(Rejection::TareWhileHolding);
        }
        self.tare_grams = self.raw_grams;
        log::info!("Scale tared at {}g", self.raw_grams);
        Ok(Some("Scale tared!".to_string()))
    }

    /// Begin pouring the carried ingredient into the bowl
    pub fn start_pour(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        let Some(ingredient) = ctx.carry.holding() else {
            return Ok(None);
        };
        if self.pour.is_some() || ingredient.is_bowl() || !self.bowl_present {
            return Ok(None);
        }

        let now = ctx.timers.now();
        let tick = ctx.timers.every(ctx.tuning.pour_tick_ms, Timer::PourTick);
        self.pour = Some(Pour {
            ingredient,
            started_at: now,
            last_egg_at: now,
            tick,
        });
        log::info!("Started adding {} to bowl", ingredient);

        if ingredient.is_egg() {
            return Ok(None);
        }
        let grams = ctx.dispenser.roll_grams(ctx.tuning.pour_initial_max_grams);
        Ok(Some(self.add(ctx, ingredient, grams)))
    }

    /// End the pour; true if one was running
    pub fn stop_pour(&mut self, ctx: &mut Ctx<'_>) -> bool {
        let Some(pour) = self.pour.take() else {
            return false;
        };
        ctx.timers.cancel(pour.tick);
        log::info!(
            "Stopped adding {}. Bowl: {}",
            pour.ingredient,
            crate::ui::contents_summary(ctx.recipe)
        );
        true
    }

    fn add(&mut self, ctx: &mut Ctx<'_>, ingredient: Ingredient, grams: u32) -> String {
        ctx.recipe.add_ingredient(ingredient, grams);
        self.raw_grams = self.raw_grams.saturating_add(grams);
        if ingredient.is_egg() {
            "+1 egg".to_string()
        } else {
            format!("+{}g {}", grams, ingredient)
        }
    }

    fn pour_tick(&mut self, ctx: &mut Ctx<'_>) -> Option<String> {
        let pour = self.pour?;
        let now = ctx.timers.now();

        if pour.ingredient.is_egg() {
            if now.saturating_sub(pour.last_egg_at) < ctx.tuning.egg_cooldown_ms {
                return None;
            }
            if let Some(p) = &mut self.pour {
                p.last_egg_at = now;
            }
            let egg_grams = ctx.tuning.egg_grams;
            return Some(self.add(ctx, Ingredient::Egg, egg_grams));
        }

        let cap = ctx.tuning.pour_cap(now - pour.started_at);
        let grams = ctx.dispenser.roll_grams(cap);
        log::debug!("Pour tick: {}g {} (cap {}g)", grams, pour.ingredient, cap);
        Some(self.add(ctx, pour.ingredient, grams))
    }
}

impl Appliance for Scale {
    fn kind(&self) -> EquipmentKind {
        EquipmentKind::Scale
    }

    fn has_bowl(&self) -> bool {
        self.bowl_present
    }

    fn place_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if self.bowl_present {
            return Err(Rejection::AlreadyHasBowl(EquipmentKind::Scale));
        }
        if !ctx.carry.is_holding_bowl() {
            return Err(Rejection::NotHoldingBowl);
        }
        ctx.carry.release();
        // A bowl put on the scale starts out empty
        ctx.recipe.clear_bowl();
        ctx.recipe
            .set_bowl_location(BowlLocation::OnScale, Some("Placed bowl on scale"));
        self.bowl_present = true;
        self.raw_grams = self.raw_grams.saturating_add(ctx.tuning.bowl_grams);
        Ok(Some("Bowl placed on scale!".to_string()))
    }

    fn remove_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if !self.bowl_present {
            return Err(Rejection::NoBowl(EquipmentKind::Scale));
        }
        if ctx.carry.is_holding() {
            return Err(Rejection::RemoveWhileHolding);
        }
        self.stop_pour(ctx);
        self.bowl_present = false;
        self.raw_grams = self
            .raw_grams
            .saturating_sub(ctx.tuning.bowl_grams.saturating_add(ctx.recipe.total_grams()));
        ctx.recipe
            .set_bowl_location(BowlLocation::Inventory, Some("Took bowl off the scale"));
        ctx.shelf.restock_bowl();
        Ok(Some("Returned bowl to inventory.".to_string()))
    }

    fn primary_action(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        self.tare(ctx)
    }

    fn zone_at(&self, pos: Vec2) -> Option<Zone> {
        if self.bowl_present && SCALE_BOWL.contains(pos) {
            Some(Zone::ScaleBowl)
        } else if SCALE_BODY.contains(pos) {
            Some(Zone::ScaleBody)
        } else {
            None
        }
    }

    fn press(&mut self, ctx: &mut Ctx<'_>, zone: Zone) -> Outcome {
        match (ctx.carry.holding(), zone) {
            (Some(held), _) if held.is_bowl() => self.place_bowl(ctx),
            (Some(_), Zone::ScaleBowl) => self.start_pour(ctx),
            (Some(_), _) => Err(Rejection::TareWhileHolding),
            (None, Zone::ScaleBowl) => self.remove_bowl(ctx),
            (None, _) => self.tare(ctx),
        }
    }

    fn release(&mut self, ctx: &mut Ctx<'_>) {
        self.stop_pour(ctx);
    }

    fn on_timer(&mut self, ctx: &mut Ctx<'_>, timer: Timer) -> Option<String> {
        match timer {
            Timer::PourTick => self.pour_tick(ctx),
            _ => None,
        }
    }

    fn teardown(&mut self, ctx: &mut Ctx<'_>) {
        self.stop_pour(ctx);
    }

    fn readout(&self, _timers: &Scheduler<Timer>) -> Readout {
        Readout::Scale {
            display_grams: self.display_grams(),
            bowl_present: self.bowl_present,
            pouring: self.is_pouring(),
        }
    }
}
