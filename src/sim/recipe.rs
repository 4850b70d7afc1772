//! Shared recipe state
//!
//! The one piece of state that survives moving between stations: what is in
//! the bowl, where the bowl is, and what the player has done so far.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ingredient::Ingredient;
use crate::consts::EGG_GRAMS;
use crate::{egg_count, eggs_label};

/// Where the single bowl currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BowlLocation {
    #[default]
    Inventory,
    OnScale,
    InMicrowave,
    InMixer,
}

impl BowlLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BowlLocation::Inventory => "inventory",
            BowlLocation::OnScale => "scale",
            BowlLocation::InMicrowave => "microwave",
            BowlLocation::InMixer => "mixer",
        }
    }
}

impl fmt::Display for BowlLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical state of the bowl contents. Open-ended: stations may tag the
/// bowl with anything, the known tags just get their own variants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BowlState {
    #[default]
    Empty,
    HasIngredients,
    Mixed,
    Heated,
    Other(String),
}

impl BowlState {
    pub fn as_str(&self) -> &str {
        match self {
            BowlState::Empty => "empty",
            BowlState::HasIngredients => "has ingredients",
            BowlState::Mixed => "mixed",
            BowlState::Heated => "heated",
            BowlState::Other(tag) => tag,
        }
    }
}

impl From<&str> for BowlState {
    fn from(tag: &str) -> Self {
        match tag {
            "empty" => BowlState::Empty,
            "has ingredients" => BowlState::HasIngredients,
            "mixed" => BowlState::Mixed,
            "heated" => BowlState::Heated,
            other => BowlState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BowlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One distinct ingredient in the bowl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlEntry {
    pub ingredient: Ingredient,
    /// Grams (eggs stored as gram equivalents)
    pub grams: u32,
}

fn default_egg_grams() -> u32 {
    EGG_GRAMS
}

/// Recipe progress for the whole session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeState {
    contents: Vec<BowlEntry>,
    location: BowlLocation,
    state: BowlState,
    total_grams: u32,
    actions: Vec<String>,
    /// Gram equivalent of one egg for this session
    #[serde(default = "default_egg_grams")]
    egg_grams: u32,
}

impl Default for RecipeState {
    fn default() -> Self {
        Self::with_egg_grams(EGG_GRAMS)
    }
}

impl RecipeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_egg_grams(egg_grams: u32) -> Self {
        Self {
            contents: Vec::new(),
            location: BowlLocation::default(),
            state: BowlState::default(),
            total_grams: 0,
            actions: Vec::new(),
            egg_grams,
        }
    }

    pub fn egg_grams(&self) -> u32 {
        self.egg_grams
    }

    /// Add grams of an ingredient to the bowl, merging with an existing entry
    pub fn add_ingredient(&mut self, ingredient: Ingredient, grams: u32) {
        match self.contents.iter_mut().find(|e| e.ingredient == ingredient) {
            Some(entry) => entry.grams = entry.grams.saturating_add(grams),
            None => self.contents.push(BowlEntry { ingredient, grams }),
        }
        self.total_grams = self.total_grams.saturating_add(grams);

        let action = if ingredient.is_egg() {
            format!("Added {}", eggs_label(egg_count(grams, self.egg_grams).max(1)))
        } else {
            format!("Added {}g {}", grams, ingredient)
        };
        self.add_player_action(action);

        if self.state == BowlState::Empty {
            self.state = BowlState::HasIngredients;
        }
    }

    /// Append a line to the action log
    pub fn add_player_action(&mut self, action: impl Into<String>) {
        let action = action.into();
        log::debug!("Action added: {}", action);
        self.actions.push(action);
    }

    pub fn set_bowl_location(&mut self, location: BowlLocation, action: Option<&str>) {
        self.location = location;
        if let Some(action) = action {
            self.add_player_action(action);
        }
    }

    pub fn set_bowl_state(&mut self, state: BowlState, action: Option<&str>) {
        self.state = state;
        if let Some(action) = action {
            self.add_player_action(action);
        }
    }

    /// Empty the bowl and put it back on the shelf
    pub fn clear_bowl(&mut self) {
        self.contents.clear();
        self.total_grams = 0;
        self.state = BowlState::Empty;
        self.location = BowlLocation::Inventory;
        self.add_player_action("Bowl emptied");
    }

    /// Start the recipe over
    pub fn reset_all(&mut self) {
        self.actions.clear();
        self.contents.clear();
        self.total_grams = 0;
        self.state = BowlState::Empty;
        self.location = BowlLocation::Inventory;
        log::info!("Recipe progress reset");
    }

    pub fn contents(&self) -> &[BowlEntry] {
        &self.contents
    }

    /// Grams of one ingredient in the bowl (0 if absent)
    pub fn grams_of(&self, ingredient: Ingredient) -> u32 {
        self.contents
            .iter()
            .find(|e| e.ingredient == ingredient)
            .map(|e| e.grams)
            .unwrap_or(0)
    }

    pub fn total_grams(&self) -> u32 {
        self.total_grams
    }

    pub fn location(&self) -> BowlLocation {
        self.location
    }

    pub fn state(&self) -> &BowlState {
        &self.state
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summed(recipe: &RecipeState) -> u32 {
        recipe.contents().iter().map(|e| e.grams).sum()
    }

    #[test]
    fn test_add_merges_same_ingredient() {
        let mut recipe = RecipeState::new();
        recipe.add_ingredient(Ingredient::Flour, 2);
        recipe.add_ingredient(Ingredient::Sugar, 5);
        recipe.add_ingredient(Ingredient::Flour, 3);

        assert_eq!(
            recipe.contents(),
            &[
                BowlEntry { ingredient: Ingredient::Flour, grams: 5 },
                BowlEntry { ingredient: Ingredient::Sugar, grams: 5 },
            ]
        );
        assert_eq!(recipe.total_grams(), 10);
        assert_eq!(recipe.total_grams(), summed(&recipe));
        assert_eq!(recipe.state(), &BowlState::HasIngredients);
    }

    #[test]
    fn test_action_log_wording() {
        let mut recipe = RecipeState::new();
        recipe.add_ingredient(Ingredient::Cocoa, 7);
        recipe.add_ingredient(Ingredient::Egg, EGG_GRAMS);
        assert_eq!(recipe.actions(), &["Added 7g cocoa", "Added 1 egg"]);
        assert_eq!(recipe.grams_of(Ingredient::Egg), EGG_GRAMS);
    }

    #[test]
    fn test_add_keeps_later_state_tags() {
        let mut recipe = RecipeState::new();
        recipe.set_bowl_state(BowlState::Mixed, None);
        recipe.add_ingredient(Ingredient::Milk, 4);
        assert_eq!(recipe.state(), &BowlState::Mixed);
    }

    #[test]
    fn test_location_and_state_optionally_log() {
        let mut recipe = RecipeState::new();
        recipe.set_bowl_location(BowlLocation::OnScale, None);
        assert_eq!(recipe.action_count(), 0);
        recipe.set_bowl_location(BowlLocation::InMixer, Some("Placed bowl in mixer"));
        recipe.set_bowl_state(BowlState::from("whipped"), Some("Whipped it"));
        assert_eq!(recipe.location(), BowlLocation::InMixer);
        assert_eq!(recipe.state().as_str(), "whipped");
        assert_eq!(recipe.action_count(), 2);
    }

    #[test]
    fn test_clear_bowl() {
        let mut recipe = RecipeState::new();
        recipe.add_ingredient(Ingredient::Butter, 40);
        recipe.set_bowl_location(BowlLocation::OnScale, None);
        recipe.clear_bowl();

        assert!(recipe.is_empty());
        assert_eq!(recipe.total_grams(), 0);
        assert_eq!(recipe.location(), BowlLocation::Inventory);
        assert_eq!(recipe.state(), &BowlState::Empty);
        assert_eq!(recipe.actions().last().map(String::as_str), Some("Bowl emptied"));
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut recipe = RecipeState::new();
        recipe.add_ingredient(Ingredient::Flour, 120);
        recipe.add_ingredient(Ingredient::Egg, EGG_GRAMS * 2);
        recipe.add_player_action("Opened the oven");
        recipe.set_bowl_state(BowlState::Heated, Some("Heated"));

        recipe.reset_all();

        assert!(recipe.contents().is_empty());
        assert_eq!(recipe.total_grams(), 0);
        assert!(recipe.actions().is_empty());
        assert_eq!(recipe.state(), &BowlState::Empty);
        assert_eq!(recipe.location(), BowlLocation::Inventory);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let mut recipe = RecipeState::new();
        recipe.add_ingredient(Ingredient::Flour, u32::MAX);
        recipe.add_ingredient(Ingredient::Sugar, 1);
        recipe.add_ingredient(Ingredient::Flour, 1);
        assert_eq!(recipe.grams_of(Ingredient::Flour), u32::MAX);
        assert_eq!(recipe.total_grams(), u32::MAX);
        assert_eq!(recipe.action_count(), 3);

        let mut eggs = RecipeState::new();
        eggs.add_ingredient(Ingredient::Egg, u32::MAX);
        assert_eq!(eggs.total_grams(), u32::MAX);
        assert_eq!(eggs.actions(), &["Added 63161284 eggs"]);
    }

    #[test]
    fn test_custom_egg_weight_in_log() {
        let mut recipe = RecipeState::with_egg_grams(50);
        recipe.add_ingredient(Ingredient::Egg, 100);
        assert_eq!(recipe.egg_grams(), 50);
        assert_eq!(recipe.actions(), &["Added 2 eggs"]);
        recipe.reset_all();
        assert_eq!(recipe.egg_grams(), 50);
    }

    #[test]
    fn test_bowl_state_tags_round_trip() {
        for tag in ["empty", "has ingredients", "mixed", "heated", "burnt"] {
            assert_eq!(BowlState::from(tag).as_str(), tag);
        }
    }
}
