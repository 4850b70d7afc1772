//! Deterministic kitchen simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (time advances through `advance`)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod carry;
pub mod dispenser;
pub mod geom;
pub mod ingredient;
pub mod kitchen;
pub mod oven;
pub mod recipe;
pub mod shelf;
pub mod station;
pub mod timer;

pub use carry::{CarriedItem, CarryController};
pub use dispenser::{Dispenser, RandomDispenser};
pub use geom::Rect;
pub use ingredient::Ingredient;
pub use kitchen::{ActiveScene, HOTSPOTS, Hotspot, Kitchen, KitchenEvent, SceneKey};
pub use oven::{BakeOutcome, OutcomeToggle, OvenBake, OvenPhase};
pub use recipe::{BowlEntry, BowlLocation, BowlState, RecipeState};
pub use shelf::{Shelf, ShelfSlot};
pub use station::{
    Appliance, BowlVisibility, Equipment, EquipmentKind, Microwave, Mixer, MixingStatus, Outcome,
    PointerButton, Readout, Rejection, Scale, Station, StationEvent,
};
pub use timer::{Scheduler, TaskHandle};
