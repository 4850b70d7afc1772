//! Carry controller
//!
//! The player holds at most one shelf item at a time. Picking something up
//! while already holding is ignored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ingredient::Ingredient;
use super::shelf::Shelf;

/// The item following the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarriedItem {
    pub ingredient: Ingredient,
    /// Shelf slot it came from
    pub slot: usize,
    /// Current screen position (tracks the pointer)
    pub pos: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct CarryController {
    held: Option<CarriedItem>,
}

impl CarryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<&CarriedItem> {
        self.held.as_ref()
    }

    pub fn holding(&self) -> Option<Ingredient> {
        self.held.map(|c| c.ingredient)
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    pub fn is_holding_bowl(&self) -> bool {
        self.holding().is_some_and(|i| i.is_bowl())
    }

    /// Take the item in `slot` off the shelf. No-op if already holding
    /// something or the slot is empty.
    pub fn pick_up(&mut self, shelf: &mut Shelf, slot: usize, pos: Vec2) -> Option<Ingredient> {
        if self.held.is_some() {
            return None;
        }
        let ingredient = shelf.take(slot)?;
        self.held = Some(CarriedItem { ingredient, slot, pos });
        log::debug!("Picked up {}", ingredient);
        Some(ingredient)
    }

    /// Follow the pointer
    pub fn move_to(&mut self, pos: Vec2) {
        if let Some(item) = &mut self.held {
            item.pos = pos;
        }
    }

    /// Hand the carried item over to a piece of equipment
    pub fn release(&mut self) -> Option<CarriedItem> {
        self.held.take()
    }

    /// Throw the carried item away; the shelf restocks everything
    pub fn drop_item(&mut self, shelf: &mut Shelf, bowl_available: bool) -> Option<Ingredient> {
        let item = self.held.take()?;
        shelf.restock(bowl_available);
        Some(item.ingredient)
    }

    /// Put the carried item back in the slot it came from
    pub fn return_to_inventory(&mut self, shelf: &mut Shelf) -> Option<Ingredient> {
        let item = self.held.take()?;
        shelf.put_back(item.slot);
        Some(item.ingredient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_pickup_is_ignored() {
        let mut shelf = Shelf::new(true);
        let mut carry = CarryController::new();
        let flour = shelf.slot_of(Ingredient::Flour).unwrap();
        let sugar = shelf.slot_of(Ingredient::Sugar).unwrap();

        assert_eq!(carry.pick_up(&mut shelf, flour, Vec2::ZERO), Some(Ingredient::Flour));
        assert_eq!(carry.pick_up(&mut shelf, sugar, Vec2::ZERO), None);
        assert_eq!(carry.holding(), Some(Ingredient::Flour));
        // Sugar never left the shelf
        assert!(shelf.is_stocked(Ingredient::Sugar));
    }

    #[test]
    fn test_drop_restocks_shelf() {
        let mut shelf = Shelf::new(true);
        let mut carry = CarryController::new();
        let egg = shelf.slot_of(Ingredient::Egg).unwrap();
        carry.pick_up(&mut shelf, egg, Vec2::ZERO);
        assert!(!shelf.is_stocked(Ingredient::Egg));

        assert_eq!(carry.drop_item(&mut shelf, true), Some(Ingredient::Egg));
        assert!(!carry.is_holding());
        assert!(shelf.is_stocked(Ingredient::Egg));
    }

    #[test]
    fn test_return_to_inventory_uses_origin_slot() {
        let mut shelf = Shelf::new(true);
        let mut carry = CarryController::new();
        let bowl = shelf.slot_of(Ingredient::Bowl).unwrap();
        carry.pick_up(&mut shelf, bowl, Vec2::new(10.0, 10.0));
        assert!(carry.is_holding_bowl());

        carry.move_to(Vec2::new(400.0, 200.0));
        assert_eq!(carry.held().map(|c| c.pos), Some(Vec2::new(400.0, 200.0)));

        assert_eq!(carry.return_to_inventory(&mut shelf), Some(Ingredient::Bowl));
        assert!(shelf.is_stocked(Ingredient::Bowl));
    }

    #[test]
    fn test_release_empties_hands_without_restocking() {
        let mut shelf = Shelf::new(true);
        let mut carry = CarryController::new();
        let bowl = shelf.slot_of(Ingredient::Bowl).unwrap();
        carry.pick_up(&mut shelf, bowl, Vec2::ZERO);
        let item = carry.release().unwrap();
        assert_eq!(item.ingredient, Ingredient::Bowl);
        assert!(!carry.is_holding());
        assert!(!shelf.is_stocked(Ingredient::Bowl));
    }
}
