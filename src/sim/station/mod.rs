//! Equipment stations
//!
//! One engine drives every countertop station: it owns the shelf, the carry
//! controller, the station's timers and its message toast, and routes
//! pointer input to the equipment. Equipment differs only in how it
//! implements [`Appliance`].
//!
//! Station state is transient. Everything that must outlive the scene goes
//! through the [`RecipeState`] passed into each call.

pub mod microwave;
pub mod mixer;
pub mod scale;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use microwave::{BowlVisibility, Microwave};
pub use mixer::{Mixer, MixingStatus};
pub use scale::Scale;

use super::carry::CarryController;
use super::dispenser::Dispenser;
use super::ingredient::Ingredient;
use super::recipe::{BowlLocation, RecipeState};
use super::shelf::Shelf;
use super::timer::Scheduler;
use crate::layout::{BACK_BUTTON, HINT_BUTTON};
use crate::tuning::Tuning;

/// Which piece of equipment a station holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentKind {
    Scale,
    Microwave,
    Mixer,
}

impl EquipmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentKind::Scale => "scale",
            EquipmentKind::Microwave => "microwave",
            EquipmentKind::Mixer => "mixer",
        }
    }

    /// Where the bowl is when this equipment holds it
    pub fn bowl_location(&self) -> BowlLocation {
        match self {
            EquipmentKind::Scale => BowlLocation::OnScale,
            EquipmentKind::Microwave => BowlLocation::InMicrowave,
            EquipmentKind::Mixer => BowlLocation::InMixer,
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EquipmentKind::Scale => "Scale",
            EquipmentKind::Microwave => "Microwave",
            EquipmentKind::Mixer => "Mixer",
        })
    }
}

/// A player action the current state doesn't allow. Shown as a message,
/// never fatal; the station is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{0} already has a bowl!")]
    AlreadyHasBowl(EquipmentKind),
    #[error("The {} has no bowl!", .0.as_str())]
    NoBowl(EquipmentKind),
    #[error("Pick up the bowl first!")]
    NotHoldingBowl,
    #[error("Can't tare while holding an item!")]
    TareWhileHolding,
    #[error("Can't remove bowl while holding an item!")]
    RemoveWhileHolding,
    #[error("You can't close the microwave while holding the bowl!")]
    CloseWithBowlInHand,
    #[error("Open the microwave first!")]
    DoorClosed,
    #[error("Mixer is already running!")]
    MixerRunning,
    #[error("Wait for mixing to finish!")]
    RemoveWhileMixing,
    #[error("Need a bowl in the mixer first!")]
    NoBowlInMixer,
    #[error("Left-clicked with {0} - no function yet!")]
    NoFunction(Ingredient),
}

/// Result of an equipment operation: an optional message, or a rejection
pub type Outcome = Result<Option<String>, Rejection>;

/// Clickable part of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    ScaleBody,
    ScaleBowl,
    MicrowaveBody,
    MicrowaveDoor,
    MicrowaveBowl,
    MixerBody,
    MixerBowl,
}

/// Scheduled station work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    PourTick,
    MixTick,
    MixDone,
    MixProgressHide,
    HeatDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Things the rendering layer should react to
#[derive(Debug, Clone, PartialEq)]
pub enum StationEvent {
    Message(String),
    Rejected(Rejection),
    PickedUp(Ingredient),
    Dropped(Ingredient),
    HintToggled(bool),
    LeaveRequested,
}

/// Numeric display values for the current equipment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Readout {
    Scale {
        display_grams: i64,
        bowl_present: bool,
        pouring: bool,
    },
    Microwave {
        door_open: bool,
        bowl: BowlVisibility,
        countdown_ms: Option<u64>,
    },
    Mixer(MixingStatus),
}

/// Everything an appliance may touch while handling an action
pub struct Ctx<'a> {
    pub recipe: &'a mut RecipeState,
    pub carry: &'a mut CarryController,
    pub shelf: &'a mut Shelf,
    pub timers: &'a mut Scheduler<Timer>,
    pub tuning: &'a Tuning,
    pub dispenser: &'a mut dyn Dispenser,
}

/// Capabilities shared by all countertop equipment
pub trait Appliance {
    fn kind(&self) -> EquipmentKind;

    fn has_bowl(&self) -> bool;

    /// Put the carried bowl into the equipment
    fn place_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome;

    /// Take the bowl out and return it to the shelf
    fn remove_bowl(&mut self, ctx: &mut Ctx<'_>) -> Outcome;

    /// Tare / toggle door / start mixing
    fn primary_action(&mut self, ctx: &mut Ctx<'_>) -> Outcome;

    /// Zone under the pointer, topmost first
    fn zone_at(&self, pos: Vec2) -> Option<Zone>;

    /// Primary press on one of this equipment's zones
    fn press(&mut self, ctx: &mut Ctx<'_>, zone: Zone) -> Outcome;

    /// Primary button released anywhere
    fn release(&mut self, _ctx: &mut Ctx<'_>) {}

    fn on_timer(&mut self, ctx: &mut Ctx<'_>, timer: Timer) -> Option<String>;

    /// Stop anything in flight before the scene goes away
    fn teardown(&mut self, ctx: &mut Ctx<'_>);

    fn readout(&self, timers: &Scheduler<Timer>) -> Readout;
}

/// Per-equipment state
#[derive(Debug, Clone)]
pub enum Equipment {
    Scale(Scale),
    Microwave(Microwave),
    Mixer(Mixer),
}

impl Equipment {
    /// Fresh equipment state, picking the bowl back up if it was left here
    pub fn enter(kind: EquipmentKind, recipe: &RecipeState, tuning: &Tuning) -> Self {
        match kind {
            EquipmentKind::Scale => Equipment::Scale(Scale::enter(recipe, tuning.bowl_grams)),
            EquipmentKind::Microwave => Equipment::Microwave(Microwave::enter(recipe)),
            EquipmentKind::Mixer => Equipment::Mixer(Mixer::enter(recipe)),
        }
    }

    pub fn appliance(&self) -> &dyn Appliance {
        match self {
            Equipment::Scale(s) => s,
            Equipment::Microwave(m) => m,
            Equipment::Mixer(m) => m,
        }
    }

    pub fn appliance_mut(&mut self) -> &mut dyn Appliance {
        match self {
            Equipment::Scale(s) => s,
            Equipment::Microwave(m) => m,
            Equipment::Mixer(m) => m,
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    text: String,
    expires_at: u64,
}

/// A running countertop scene
pub struct Station {
    equipment: Equipment,
    carry: CarryController,
    shelf: Shelf,
    timers: Scheduler<Timer>,
    tuning: Tuning,
    dispenser: Box<dyn Dispenser>,
    toast: Option<Toast>,
    hint_open: bool,
    events: Vec<StationEvent>,
}

impl Station {
    pub fn enter(
        kind: EquipmentKind,
        recipe: &RecipeState,
        tuning: Tuning,
        dispenser: Box<dyn Dispenser>,
    ) -> Self {
        log::info!("{} scene loaded (bowl in {})", kind.as_str(), recipe.location());
        Self {
            equipment: Equipment::enter(kind, recipe, &tuning),
            carry: CarryController::new(),
            shelf: Shelf::new(recipe.location() == BowlLocation::Inventory),
            timers: Scheduler::new(),
            tuning,
            dispenser,
            toast: None,
            hint_open: false,
            events: Vec::new(),
        }
    }

    pub fn kind(&self) -> EquipmentKind {
        self.equipment.appliance().kind()
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn scale(&self) -> Option<&Scale> {
        match &self.equipment {
            Equipment::Scale(s) => Some(s),
            _ => None,
        }
    }

    pub fn microwave(&self) -> Option<&Microwave> {
        match &self.equipment {
            Equipment::Microwave(m) => Some(m),
            _ => None,
        }
    }

    pub fn mixer(&self) -> Option<&Mixer> {
        match &self.equipment {
            Equipment::Mixer(m) => Some(m),
            _ => None,
        }
    }

    pub fn carry(&self) -> &CarryController {
        &self.carry
    }

    pub fn shelf(&self) -> &Shelf {
        &self.shelf
    }

    pub fn shelf_mut(&mut self) -> &mut Shelf {
        &mut self.shelf
    }

    pub fn readout(&self) -> Readout {
        self.equipment.appliance().readout(&self.timers)
    }

    /// Message currently on screen
    pub fn message(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.text.as_str())
    }

    pub fn hint_open(&self) -> bool {
        self.hint_open
    }

    /// Station clock (ms since the scene was entered)
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn drain_events(&mut self) -> Vec<StationEvent> {
        std::mem::take(&mut self.events)
    }

    fn with_ctx<R>(
        &mut self,
        recipe: &mut RecipeState,
        f: impl FnOnce(&mut Equipment, &mut Ctx<'_>) -> R,
    ) -> R {
        let mut ctx = Ctx {
            recipe,
            carry: &mut self.carry,
            shelf: &mut self.shelf,
            timers: &mut self.timers,
            tuning: &self.tuning,
            dispenser: self.dispenser.as_mut(),
        };
        f(&mut self.equipment, &mut ctx)
    }

    fn say(&mut self, text: String) {
        self.toast = Some(Toast {
            text: text.clone(),
            expires_at: self.timers.now() + self.tuning.toast_ms,
        });
        self.events.push(StationEvent::Message(text));
    }

    fn report(&mut self, outcome: Outcome) -> Outcome {
        match &outcome {
            Ok(Some(text)) => self.say(text.clone()),
            Ok(None) => {}
            Err(rejection) => {
                log::warn!("{} rejected: {}", self.kind().as_str(), rejection);
                self.say(rejection.to_string());
                self.events.push(StationEvent::Rejected(*rejection));
            }
        }
        outcome
    }

    pub fn place_bowl(&mut self, recipe: &mut RecipeState) -> Outcome {
        let outcome = self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().place_bowl(ctx));
        self.report(outcome)
    }

    pub fn remove_bowl(&mut self, recipe: &mut RecipeState) -> Outcome {
        let outcome = self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().remove_bowl(ctx));
        self.report(outcome)
    }

    pub fn primary_action(&mut self, recipe: &mut RecipeState) -> Outcome {
        let outcome = self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().primary_action(ctx));
        self.report(outcome)
    }

    /// Open the microwave door (no-op elsewhere)
    pub fn open_door(&mut self, recipe: &mut RecipeState) -> Outcome {
        let outcome = self.with_ctx(recipe, |eq, ctx| match eq {
            Equipment::Microwave(m) => m.open_door(ctx),
            _ => Ok(None),
        });
        self.report(outcome)
    }

    /// Close the microwave door (no-op elsewhere)
    pub fn close_door(&mut self, recipe: &mut RecipeState) -> Outcome {
        let outcome = self.with_ctx(recipe, |eq, ctx| match eq {
            Equipment::Microwave(m) => m.close_door(ctx),
            _ => Ok(None),
        });
        self.report(outcome)
    }

    /// Abort a mixing cycle, keeping the progress reached (no-op elsewhere)
    pub fn stop_mixing(&mut self, recipe: &mut RecipeState) -> Outcome {
        let outcome = self.with_ctx(recipe, |eq, ctx| match eq {
            Equipment::Mixer(m) => m.stop_mixing(ctx),
            _ => Ok(None),
        });
        self.report(outcome)
    }

    /// Pick `ingredient` off the shelf. Silently ignored when already
    /// carrying something or the slot is empty.
    pub fn pick_up(&mut self, ingredient: Ingredient) -> Option<Ingredient> {
        let slot = self.shelf.slot_of(ingredient)?;
        let pos = self.shelf.slots()[slot].rect.center();
        self.pick_up_slot(slot, pos)
    }

    fn pick_up_slot(&mut self, slot: usize, pos: Vec2) -> Option<Ingredient> {
        let ingredient = self.carry.pick_up(&mut self.shelf, slot, pos)?;
        self.events.push(StationEvent::PickedUp(ingredient));
        self.say(format!(
            "Picked up {}! Hold left-click on bowl to add. Right-click to drop.",
            ingredient
        ));
        Some(ingredient)
    }

    /// Discard the carried item; the shelf restocks
    pub fn drop_carried(&mut self, recipe: &mut RecipeState) -> Option<Ingredient> {
        self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().release(ctx));
        let bowl_available = recipe.location() == BowlLocation::Inventory;
        let dropped = self.carry.drop_item(&mut self.shelf, bowl_available)?;
        self.events.push(StationEvent::Dropped(dropped));
        self.say("Dropped item!".to_string());
        Some(dropped)
    }

    /// Use the carried item at `pos`: hand it to whatever equipment zone is
    /// there, or say there's nothing to do with it yet.
    pub fn interact(&mut self, recipe: &mut RecipeState, pos: Vec2) -> Outcome {
        let Some(held) = self.carry.holding() else {
            return Ok(None);
        };
        self.carry.move_to(pos);
        let outcome = match self.equipment.appliance().zone_at(pos) {
            Some(zone) => self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().press(ctx, zone)),
            None => Err(Rejection::NoFunction(held)),
        };
        self.report(outcome)
    }

    pub fn toggle_hint(&mut self) -> bool {
        self.hint_open = !self.hint_open;
        self.events.push(StationEvent::HintToggled(self.hint_open));
        self.hint_open
    }

    pub fn pointer_down(&mut self, recipe: &mut RecipeState, pos: Vec2, button: PointerButton) {
        self.carry.move_to(pos);

        if button == PointerButton::Secondary {
            if self.carry.is_holding() {
                self.drop_carried(recipe);
            }
            return;
        }

        if BACK_BUTTON.contains(pos) {
            self.events.push(StationEvent::LeaveRequested);
            return;
        }
        if HINT_BUTTON.contains(pos) {
            self.toggle_hint();
            return;
        }
        if let Some(slot) = self.shelf.slot_at(pos) {
            if !self.carry.is_holding() {
                self.pick_up_slot(slot, pos);
            }
            return;
        }

        if self.carry.is_holding() {
            let _ = self.interact(recipe, pos);
        } else if let Some(zone) = self.equipment.appliance().zone_at(pos) {
            let outcome = self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().press(ctx, zone));
            let _ = self.report(outcome);
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.carry.move_to(pos);
    }

    pub fn pointer_up(&mut self, recipe: &mut RecipeState) {
        self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().release(ctx));
    }

    /// Advance the station clock, firing every task that falls due
    pub fn advance(&mut self, recipe: &mut RecipeState, dt_ms: u64) {
        let target = self.timers.now() + dt_ms;
        while let Some((_, timer)) = self.timers.next_due(target) {
            let note = self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().on_timer(ctx, timer));
            if let Some(text) = note {
                self.say(text);
            }
        }
        self.timers.settle(target);

        let now = self.timers.now();
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
        }
    }

    /// Leave the scene: stop pours and cycles, put back anything in hand and
    /// cancel every outstanding timer.
    pub fn teardown(&mut self, recipe: &mut RecipeState) {
        self.with_ctx(recipe, |eq, ctx| eq.appliance_mut().teardown(ctx));
        if let Some(item) = self.carry.return_to_inventory(&mut self.shelf) {
            log::debug!("Returned carried {} to the shelf", item);
        }
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            log::info!("{} teardown cancelled {} timers", self.kind().as_str(), cancelled);
        }
        self.toast = None;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_no_function_placeholder() {
        let mut recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Scale, &recipe);
        station.pick_up(Ingredient::Sugar);

        let outcome = station.interact(&mut recipe, Vec2::new(850.0, 150.0));
        assert_eq!(outcome, Err(Rejection::NoFunction(Ingredient::Sugar)));
        assert_eq!(station.message(), Some("Left-clicked with sugar - no function yet!"));
        assert_eq!(station.carry().holding(), Some(Ingredient::Sugar));
    }

    #[test]
    fn test_redundant_pickup_is_silent() {
        let recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Mixer, &recipe);
        assert_eq!(station.pick_up(Ingredient::Flour), Some(Ingredient::Flour));
        station.drain_events();

        assert_eq!(station.pick_up(Ingredient::Butter), None);
        assert!(station.drain_events().is_empty());
        assert_eq!(station.carry().holding(), Some(Ingredient::Flour));
    }

    #[test]
    fn test_secondary_click_drops_and_restocks() {
        let mut recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Microwave, &recipe);
        station.pick_up(Ingredient::Milk);
        assert!(!station.shelf().is_stocked(Ingredient::Milk));

        station.pointer_down(&mut recipe, Vec2::new(600.0, 100.0), PointerButton::Secondary);
        assert!(!station.carry().is_holding());
        assert!(station.shelf().is_stocked(Ingredient::Milk));
        assert_eq!(station.message(), Some("Dropped item!"));
    }

    #[test]
    fn test_shelf_click_picks_up() {
        let mut recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Scale, &recipe);
        let egg = station.shelf().slot_of(Ingredient::Egg).unwrap();
        let pos = station.shelf().slots()[egg].rect.center();

        station.pointer_down(&mut recipe, pos, PointerButton::Primary);
        assert_eq!(station.carry().holding(), Some(Ingredient::Egg));
        assert!(station.drain_events().contains(&StationEvent::PickedUp(Ingredient::Egg)));
    }

    #[test]
    fn test_back_and_hint_buttons() {
        let mut recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Scale, &recipe);
        station.pointer_down(&mut recipe, HINT_BUTTON.center(), PointerButton::Primary);
        assert!(station.hint_open());
        station.pointer_down(&mut recipe, BACK_BUTTON.center(), PointerButton::Primary);
        let events = station.drain_events();
        assert_eq!(events, vec![StationEvent::HintToggled(true), StationEvent::LeaveRequested]);
    }

    #[test]
    fn test_toast_expires() {
        let mut recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Scale, &recipe);
        station.primary_action(&mut recipe).unwrap();
        assert_eq!(station.message(), Some("Scale tared!"));
        station.advance(&mut recipe, 1999);
        assert!(station.message().is_some());
        station.advance(&mut recipe, 1);
        assert_eq!(station.message(), None);
    }

    #[test]
    fn test_rejection_leaves_message_and_event() {
        let mut recipe = RecipeState::new();
        let mut station = station(EquipmentKind::Mixer, &recipe);
        assert_eq!(station.primary_action(&mut recipe), Err(Rejection::NoBowlInMixer));
        assert_eq!(rejections(&mut station), vec![Rejection::NoBowlInMixer]);
        assert_eq!(station.message(), Some("Need a bowl in the mixer first!"));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::AlreadyHasBowl(EquipmentKind::Scale).to_string(),
            "Scale already has a bowl!"
        );
        assert_eq!(Rejection::NoBowl(EquipmentKind::Mixer).to_string(), "The mixer has no bowl!");
    }
}
