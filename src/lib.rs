//! Cosy Bakes - a browser baking game
//!
//! Core modules:
//! - `sim`: Deterministic kitchen simulation (recipe state, carrying, stations)
//! - `tuning`: Data-driven timings and weights
//! - `ui`: Text for the recipe log panel and station readouts

pub mod sim;
pub mod tuning;
pub mod ui;

pub use sim::{Ingredient, Kitchen, RecipeState};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical canvas size
    pub const VIEW_WIDTH: f32 = 900.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Empty mixing bowl weight shown by the scale
    pub const BOWL_GRAMS: u32 = 250;
    /// Gram equivalent of one egg; egg entries are stored in grams
    pub const EGG_GRAMS: u32 = 68;

    /// Continuous pour: tick interval and ramp
    pub const POUR_TICK_MS: u64 = 100;
    pub const POUR_INITIAL_MAX_GRAMS: u32 = 3;
    /// Every this many ms of holding raises the per-tick cap by 1g
    pub const POUR_RAMP_MS: u64 = 500;
    pub const POUR_MAX_GRAMS: u32 = 10;
    /// Eggs can't be poured; at most one per cooldown
    pub const EGG_COOLDOWN_MS: u64 = 1000;

    /// Mixer cycle
    pub const MIX_DURATION_MS: u64 = 3000;
    pub const MIX_TICK_MS: u64 = 50;
    pub const MIX_PROGRESS_HIDE_MS: u64 = 2000;

    /// Microwave popup: 300ms entrance + 2000ms hold + 500ms fade
    pub const HEAT_DURATION_MS: u64 = 2800;

    /// Message toast lifetime
    pub const TOAST_MS: u64 = 2000;

    /// Oven: drop (800ms) + shrink (800ms), then 100ms per fake second
    pub const OVEN_DEPOSIT_MS: u64 = 1600;
    pub const OVEN_TICK_MS: u64 = 100;
    pub const OVEN_BAKE_TICKS: u32 = 35;
}

/// Screen layout in canvas pixels
pub mod layout {
    use crate::sim::Rect;

    pub const BACK_BUTTON: Rect = Rect::from_min_size(20.0, 34.0, 130.0, 32.0);
    pub const HINT_BUTTON: Rect = Rect::from_center(100.0, 100.0, 110.0, 30.0);

    /// Shelf slot centres; the whole palette fits across the canvas
    pub const SHELF_Y: f32 = 530.0;
    pub const SHELF_FIRST_X: f32 = 50.0;
    pub const SHELF_SPACING: f32 = 80.0;
    pub const SHELF_ITEM_SIZE: f32 = 72.0;

    /// Scale notepad listing the bowl contents
    pub const NOTEPAD: Rect = Rect::from_min_size(650.0, 280.0, 200.0, 150.0);

    pub const SCALE_BODY: Rect = Rect::from_center(450.0, 360.0, 300.0, 160.0);
    pub const SCALE_BOWL: Rect = Rect::from_center(450.0, 230.0, 240.0, 200.0);

    pub const MICROWAVE_BODY: Rect = Rect::from_center(450.0, 270.0, 300.0, 200.0);
    pub const MICROWAVE_DOOR: Rect = Rect::from_center(372.0, 274.0, 260.0, 180.0);
    pub const MICROWAVE_BOWL: Rect = Rect::from_center(420.0, 274.0, 160.0, 120.0);

    pub const MIXER_BODY: Rect = Rect::from_center(450.0, 270.0, 200.0, 180.0);
    pub const MIXER_BOWL: Rect = Rect::from_center(390.0, 318.0, 160.0, 120.0);

    pub const RECIPE_CARD: Rect = Rect::from_center(450.0, 320.0, 350.0, 220.0);
}

/// Whole eggs represented by a gram amount
#[inline]
pub fn egg_count(grams: u32, egg_grams: u32) -> u32 {
    if egg_grams == 0 {
        return 0;
    }
    // Round half up without overflowing near u32::MAX
    grams / egg_grams + u32::from(grams % egg_grams >= egg_grams.div_ceil(2))
}

/// "1 egg" / "3 eggs"
pub fn eggs_label(count: u32) -> String {
    if count == 1 {
        "1 egg".to_string()
    } else {
        format!("{} eggs", count)
    }
}
