//! Ingredient identifiers
//!
//! Everything on the shelf, including the bowl itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A shelf item the player can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ingredient {
    Bowl,
    Flour,
    Sugar,
    Butter,
    Egg,
    Milk,
    ChocChip,
    Vanilla,
    BakingPowder,
    Cocoa,
    ChocBar,
}

impl Ingredient {
    /// Shelf order, left to right
    pub const PALETTE: [Ingredient; 11] = [
        Ingredient::Bowl,
        Ingredient::Flour,
        Ingredient::Sugar,
        Ingredient::Butter,
        Ingredient::Egg,
        Ingredient::Milk,
        Ingredient::ChocChip,
        Ingredient::Vanilla,
        Ingredient::BakingPowder,
        Ingredient::Cocoa,
        Ingredient::ChocBar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ingredient::Bowl => "bowl",
            Ingredient::Flour => "flour",
            Ingredient::Sugar => "sugar",
            Ingredient::Butter => "butter",
            Ingredient::Egg => "egg",
            Ingredient::Milk => "milk",
            Ingredient::ChocChip => "chocchip",
            Ingredient::Vanilla => "vanilla",
            Ingredient::BakingPowder => "bakingpowder",
            Ingredient::Cocoa => "cocoa",
            Ingredient::ChocBar => "chocbar",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::PALETTE
            .iter()
            .copied()
            .find(|i| i.as_str() == s.trim().to_lowercase())
    }

    /// Eggs go in whole, one at a time
    #[inline]
    pub fn is_egg(&self) -> bool {
        *self == Ingredient::Egg
    }

    #[inline]
    pub fn is_bowl(&self) -> bool {
        *self == Ingredient::Bowl
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_round_trips_palette() {
        for ingredient in Ingredient::PALETTE {
            assert_eq!(Ingredient::from_id(ingredient.as_str()), Some(ingredient));
        }
    }

    #[test]
    fn test_from_id_is_lenient() {
        assert_eq!(Ingredient::from_id(" Flour "), Some(Ingredient::Flour));
        assert_eq!(Ingredient::from_id("salt"), None);
    }

    #[test]
    fn test_serde_uses_shelf_ids() {
        let json = serde_json::to_string(&Ingredient::BakingPowder).unwrap();
        assert_eq!(json, "\"bakingpowder\"");
    }
}
