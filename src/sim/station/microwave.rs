//! Microwave
//!
//! The bowl goes in through the open door. Closing the door with the bowl
//! inside runs a heating cycle; opening it again interrupts the cycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Appliance, Ctx, EquipmentKind, Outcome, Readout, Rejection, Timer, Zone};
use crate::layout::{MICROWAVE_BODY, MICROWAVE_BOWL, MICROWAVE_DOOR};
use crate::sim::recipe::{BowlLocation, BowlState, RecipeState};
use crate::sim::timer::{Scheduler, TaskHandle};

/// How the bowl should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BowlVisibility {
    Absent,
    Visible,
    /// Inside, behind the closed door
    Hidden,
}

#[derive(Debug, Clone)]
pub struct Microwave {
    door_open: bool,
    bowl_inside: bool,
    heating: Option<TaskHandle>,
}

impl Microwave {
    pub fn enter(recipe: &RecipeState) -> Self {
        Self {
            door_open: false,
            bowl_inside: recipe.location() == BowlLocation::InMicrowave,
            heating: None,
        }
    }

    pub fn door_open(&self) -> bool {
        self.door_open
    }

    pub fn bowl_inside(&self) -> bool {
        self.bowl_inside
    }

    pub fn is_heating(&self) -> bool {
        self.heating.is_some()
    }

    pub fn bowl_visibility(&self) -> BowlVisibility {
        match (self.bowl_inside, self.door_open) {
            (false, _) => BowlVisibility::Absent,
            (true, true) => BowlVisibility::Visible,
            (true, false) => BowlVisibility::Hidden,
        }
    }

    pub fn open_door(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if self.door_open {
            return Ok(None);
        }
        self.door_open = true;
        if let Some(heating) = self.heating.take() {
            ctx.timers.cancel(heating);
            log::info!("Microwave opened mid-cycle, heating interrupted");
            return Ok(Some("Microwave door opened! Heating stopped.".to_string()));
        }
        Ok(Some("Microwave door opened!".to_string()))
    }

    pub fn close_door(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if !self.door_open {
            return Ok(None);
        }
        if ctx.carry.is_holding_bowl() {
            return Err(Rejection::CloseWithBowlInHand);
        }
        self.door_open = false;
        if !self.bowl_inside {
            return Ok(Some("Microwave door closed!".to_string()));
        }
        self.heating = Some(ctx.timers.after(ctx.tuning.heat_duration_ms, Timer::HeatDone));
        log::info!("Microwave heating for {}ms", ctx.tuning.heat_duration_ms);
        Ok(Some("Microwave started! 2 minutes remaining.".to_string()))
    }

    pub fn toggle_door(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if self.door_open {
            self.close_door(ctx)
        } else {
            self.open_door(ctx)
        }
    }

    fn finish_heating(&mut self, ctx: &mut Ctx<'_>) -> Option<String> {
        self.heating = None;
        if !self.bowl_inside {
            return None;
        }
        ctx.recipe
            .set_bowl_state(BowlState::Heated, Some("Heated bowl in microwave"));
        Some("Microwave finished! Food is heated.".to_string())
    }
}

impl Appliance for Microwave {
    fn kind(&self) -> EquipmentKind {
        EquipmentKind::Microwave
    }

    fn has_bowl(&self) -> bool {
        self.bowl_inside
    }

    fn place_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if !self.door_open {
            return Err(Rejection::DoorClosed);
        }
        if self.bowl_inside {
            return Err(Rejection::AlreadyHasBowl(EquipmentKind::Microwave));
        }
        if !ctx.carry.is_holding_bowl() {
            return Err(Rejection::NotHoldingBowl);
        }
        ctx.carry.release();
        self.bowl_inside = true;
        ctx.recipe
            .set_bowl_location(BowlLocation::InMicrowave, Some("Placed bowl in microwave"));
        Ok(Some("Bowl placed in microwave!".to_string()))
    }

    fn remove_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        if !self.bowl_inside {
            return Err(Rejection::NoBowl(EquipmentKind::Microwave));
        }
        if !self.door_open {
            return Err(Rejection::DoorClosed);
        }
        if ctx.carry.is_holding() {
            return Err(Rejection::RemoveWhileHolding);
        }
        self.bowl_inside = false;
        ctx.recipe
            .set_bowl_location(BowlLocation::Inventory, Some("Took bowl out of microwave"));
        ctx.shelf.restock_bowl();
        Ok(Some("Removed bowl from microwave.".to_string()))
    }

    fn primary_action(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        self.toggle_door(ctx)
    }

    fn zone_at(&self, pos: Vec2) -> Option<Zone> {
        if self.door_open {
            if self.bowl_inside && MICROWAVE_BOWL.contains(pos) {
                return Some(Zone::MicrowaveBowl);
            }
            if MICROWAVE_DOOR.contains(pos) {
                return Some(Zone::MicrowaveDoor);
            }
        }
        MICROWAVE_BODY.contains(pos).then_some(Zone::MicrowaveBody)
    }

    fn press(&mut self, ctx: &mut Ctx<'_>, zone: Zone) -> Outcome {
        let holding_bowl = ctx.carry.is_holding_bowl();
        match zone {
            Zone::MicrowaveBowl | Zone::MicrowaveDoor if holding_bowl => self.place_bowl(ctx),
            Zone::MicrowaveBowl if ctx.carry.is_holding() => Err(Rejection::RemoveWhileHolding),
            Zone::MicrowaveBowl => self.remove_bowl(ctx),
            _ => self.toggle_door(ctx),
        }
    }

    fn on_timer(&mut self, ctx: &mut Ctx<'_>, timer: Timer) -> Option<String> {
        match timer {
            Timer::HeatDone => self.finish_heating(ctx),
            _ => None,
        }
    }

    fn teardown(&mut self, ctx: &mut Ctx<'_>) {
        if let Some(heating) = self.heating.take() {
            ctx.timers.cancel(heating);
        }
    }

    fn readout(&self, timers: &Scheduler<Timer>) -> Readout {
        Readout::Microwave {
            door_open: self.door_open,
            bowl: self.bowl_visibility(),
            countdown_ms: self.heating.and_then(|h| timers.remaining_ms(h)),
        }
    }
}
