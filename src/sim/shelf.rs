//! Inventory shelf
//!
//! One slot per palette ingredient. Supply is infinite: dropping an item
//! restocks the whole shelf. The bowl is the exception - there is only one,
//! so its slot is stocked only while the bowl is actually in the inventory.

use glam::Vec2;

use super::geom::Rect;
use super::ingredient::Ingredient;
use crate::layout::{SHELF_FIRST_X, SHELF_ITEM_SIZE, SHELF_SPACING, SHELF_Y};

#[derive(Debug, Clone)]
pub struct ShelfSlot {
    pub ingredient: Ingredient,
    pub stocked: bool,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct Shelf {
    slots: Vec<ShelfSlot>,
}

impl Shelf {
    /// Fresh shelf; the bowl slot is stocked only if the bowl is available
    pub fn new(bowl_available: bool) -> Self {
        let slots = Ingredient::PALETTE
            .iter()
            .enumerate()
            .map(|(i, &ingredient)| ShelfSlot {
                ingredient,
                stocked: !ingredient.is_bowl() || bowl_available,
                rect: Rect::from_center(
                    SHELF_FIRST_X + i as f32 * SHELF_SPACING,
                    SHELF_Y,
                    SHELF_ITEM_SIZE,
                    SHELF_ITEM_SIZE,
                ),
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[ShelfSlot] {
        &self.slots
    }

    /// Stocked slot under the pointer
    pub fn slot_at(&self, pos: Vec2) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.stocked && s.rect.contains(pos))
    }

    /// Slot index holding `ingredient`
    pub fn slot_of(&self, ingredient: Ingredient) -> Option<usize> {
        self.slots.iter().position(|s| s.ingredient == ingredient)
    }

    pub fn is_stocked(&self, ingredient: Ingredient) -> bool {
        self.slot_of(ingredient)
            .map(|i| self.slots[i].stocked)
            .unwrap_or(false)
    }

    /// Take the item out of a slot
    pub fn take(&mut self, slot: usize) -> Option<Ingredient> {
        let slot = self.slots.get_mut(slot)?;
        if !slot.stocked {
            return None;
        }
        slot.stocked = false;
        Some(slot.ingredient)
    }

    /// Put an item back into its own slot
    pub fn put_back(&mut self, slot: usize) {
        if let Some(slot) = self.slots.get_mut(slot) {
            slot.stocked = true;
        }
    }

    /// Bowl came back from a piece of equipment
    pub fn restock_bowl(&mut self) {
        if let Some(i) = self.slot_of(Ingredient::Bowl) {
            self.slots[i].stocked = true;
        }
    }

    /// Repopulate every slot
    pub fn restock(&mut self, bowl_available: bool) {
        for slot in &mut self.slots {
            slot.stocked = !slot.ingredient.is_bowl() || bowl_available;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::VIEW_WIDTH;

    #[test]
    fn test_bowl_slot_follows_availability() {
        assert!(Shelf::new(true).is_stocked(Ingredient::Bowl));
        let shelf = Shelf::new(false);
        assert!(!shelf.is_stocked(Ingredient::Bowl));
        assert!(shelf.is_stocked(Ingredient::Flour));
    }

    #[test]
    fn test_take_and_put_back() {
        let mut shelf = Shelf::new(true);
        let flour = shelf.slot_of(Ingredient::Flour).unwrap();
        assert_eq!(shelf.take(flour), Some(Ingredient::Flour));
        assert_eq!(shelf.take(flour), None);
        shelf.put_back(flour);
        assert!(shelf.is_stocked(Ingredient::Flour));
    }

    #[test]
    fn test_slot_at_skips_empty_slots() {
        let mut shelf = Shelf::new(true);
        let sugar = shelf.slot_of(Ingredient::Sugar).unwrap();
        let centre = shelf.slots()[sugar].rect.center();
        assert_eq!(shelf.slot_at(centre), Some(sugar));

        shelf.take(sugar);
        assert_eq!(shelf.slot_at(centre), None);

        shelf.restock(true);
        assert_eq!(shelf.slot_at(centre), Some(sugar));
    }

    #[test]
    fn test_every_slot_reachable_on_canvas() {
        let shelf = Shelf::new(true);
        let mut reached = Vec::new();
        for x in 0..VIEW_WIDTH as u32 {
            if let Some(slot) = shelf.slot_at(Vec2::new(x as f32, SHELF_Y)) {
                if !reached.contains(&slot) {
                    reached.push(slot);
                }
            }
        }
        assert_eq!(reached.len(), Ingredient::PALETTE.len());
        for slot in shelf.slots() {
            assert!(slot.rect.min.x >= 0.0 && slot.rect.max.x <= VIEW_WIDTH);
        }
    }
}
