//! On-screen text
//!
//! Strings for the recipe log panel, station headers and numeric readouts.
//! Kept apart from the simulation so both the browser shell and the native
//! demo print the same thing.

use std::fmt::Write;

use crate::sim::{
    ActiveScene, BowlEntry, BowlVisibility, EquipmentKind, Kitchen, OvenPhase, Readout,
    RecipeState,
};
use crate::{egg_count, eggs_label};

pub const HUB_INSTRUCTION: &str = "Click on equipment to start baking!";
pub const BACK_LABEL: &str = "< KITCHEN";
pub const HINT_LABEL: &str = "Recipe Log";
/// Popup shown when a heating cycle starts
pub const HEAT_POPUP: &str = "+2mins";

/// "6g flour" / "2 eggs"
pub fn entry_label(entry: &BowlEntry, egg_grams: u32) -> String {
    if entry.ingredient.is_egg() {
        eggs_label(egg_count(entry.grams, egg_grams))
    } else {
        format!("{}g {}", entry.grams, entry.ingredient)
    }
}

/// Recipe log panel
pub fn hint_text(recipe: Option<&RecipeState>) -> String {
    let mut text = String::new();
    let Some(recipe) = recipe else {
        text.push_str("No actions yet.\nStart by placing ingredients in a bowl!");
        return text;
    };

    if !recipe.is_empty() {
        text.push_str("BOWL CONTAINS:\n");
        for entry in recipe.contents() {
            let _ = writeln!(text, "• {}", entry_label(entry, recipe.egg_grams()));
        }
        let _ = writeln!(text, "\nBowl Status: {}", recipe.state());
        let _ = write!(text, "Location: {}\n\n", recipe.location());
    }

    if recipe.actions().is_empty() {
        text.push_str("No actions yet.\nStart by placing ingredients in a bowl!");
    } else {
        text.push_str("ACTIONS TAKEN:\n");
        for (i, action) in recipe.actions().iter().enumerate() {
            let _ = writeln!(text, "{}. {}", i + 1, action);
        }
    }
    text
}

/// Notepad beside the scale
pub fn bowl_notepad(recipe: &RecipeState) -> String {
    if recipe.is_empty() {
        return "Bowl is empty".to_string();
    }
    recipe
        .contents()
        .iter()
        .map(|entry| entry_label(entry, recipe.egg_grams()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line contents summary for the log
pub fn contents_summary(recipe: &RecipeState) -> String {
    if recipe.is_empty() {
        return "empty".to_string();
    }
    let items: Vec<String> = recipe
        .contents()
        .iter()
        .map(|entry| entry_label(entry, recipe.egg_grams()))
        .collect();
    format!("{} ({}g total)", items.join(", "), recipe.total_grams())
}

pub fn weight_label(grams: i64) -> String {
    format!("{}g", grams)
}

pub fn mixing_label(level: u8) -> String {
    format!("Mixing: {}%", level)
}

/// Progress bar fill: red, then orange, then green
pub fn mixing_bar_color(level: u8) -> u32 {
    match level {
        0..30 => 0xFF4444,
        30..70 => 0xFFAA44,
        _ => 0x44AA44,
    }
}

/// "m:ss"
pub fn clock_label(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn station_title(kind: EquipmentKind) -> String {
    format!("{} STATION", kind.as_str().to_uppercase())
}

pub fn station_instructions(kind: EquipmentKind) -> &'static str {
    match kind {
        EquipmentKind::Scale => {
            "Place bowl on scale to start. Left-click to pick up items, right-click to drop. Click scale to tare."
        }
        EquipmentKind::Microwave => {
            "Click the microwave to open/close the door! Place bowl inside and close to start timer. Right-click to reset."
        }
        EquipmentKind::Mixer => {
            "Place a bowl in the mixer, then click to start mixing! Right-click to reset."
        }
    }
}

pub fn readout_label(readout: &Readout) -> String {
    match readout {
        Readout::Scale { display_grams, .. } => weight_label(*display_grams),
        Readout::Microwave {
            door_open,
            bowl,
            countdown_ms,
        } => {
            let door = if *door_open { "Door open" } else { "Door closed" };
            let bowl = match bowl {
                BowlVisibility::Absent => "empty",
                BowlVisibility::Visible => "bowl inside",
                BowlVisibility::Hidden => "bowl behind door",
            };
            match countdown_ms {
                Some(ms) => format!("{}, {} ({} {:.1}s)", door, bowl, HEAT_POPUP, *ms as f32 / 1000.0),
                None => format!("{}, {}", door, bowl),
            }
        }
        Readout::Mixer(status) if status.progress_visible => mixing_label(status.mixing_level),
        Readout::Mixer(status) if status.has_bowl => "Mixer ready".to_string(),
        Readout::Mixer(_) => "No bowl".to_string(),
    }
}

/// Heading plus readout for whatever scene is on screen
pub fn scene_status(kitchen: &Kitchen) -> String {
    match kitchen.scene() {
        ActiveScene::RecipeSelection => "COSY BAKES - Choose Your Recipe".to_string(),
        ActiveScene::Hub => HUB_INSTRUCTION.to_string(),
        ActiveScene::Station(station) => format!(
            "{} | {}",
            station_title(station.kind()),
            readout_label(&station.readout())
        ),
        ActiveScene::Oven(oven) => match oven.phase() {
            OvenPhase::Depositing => "OVEN | Filling the tin...".to_string(),
            OvenPhase::Baking { .. } => format!("OVEN | {}", clock_label(oven.clock_secs())),
            OvenPhase::Revealed(outcome) => {
                format!("OVEN | {} {}", clock_label(oven.clock_secs()), outcome.as_str())
            }
        },
    }
}
