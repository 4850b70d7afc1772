//! Property tests for recipe bookkeeping and the single-bowl rule

use cosy_bakes::consts::{BOWL_GRAMS, EGG_GRAMS};
use cosy_bakes::layout::{
    HINT_BUTTON, MICROWAVE_BOWL, MICROWAVE_DOOR, MIXER_BODY, MIXER_BOWL, SCALE_BODY, SCALE_BOWL,
};
use cosy_bakes::sim::{Appliance, BowlLocation, Kitchen, PointerButton, SceneKey};
use cosy_bakes::{Ingredient, RecipeState, Tuning};
use glam::Vec2;
use proptest::prelude::*;

/// Click targets covering every equipment zone plus some dead space
fn targets() -> Vec<Vec2> {
    vec![
        SCALE_BODY.center(),
        SCALE_BOWL.center(),
        MICROWAVE_DOOR.center(),
        MICROWAVE_BOWL.center(),
        Vec2::new(560.0, 300.0),
        MIXER_BODY.center(),
        MIXER_BOWL.center(),
        Vec2::new(500.0, 200.0),
        HINT_BUTTON.center(),
        Vec2::new(850.0, 150.0),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Enter(SceneKey),
    Pick(Ingredient),
    Press(usize),
    Drop,
    Release,
    Advance(u64),
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => prop::sample::select(vec![
            SceneKey::Scale,
            SceneKey::Microwave,
            SceneKey::Mixer,
            SceneKey::Kitchen,
        ])
        .prop_map(Op::Enter),
        4 => prop::sample::select(Ingredient::PALETTE.to_vec()).prop_map(Op::Pick),
        6 => (0..targets().len()).prop_map(Op::Press),
        1 => Just(Op::Drop),
        3 => Just(Op::Release),
        3 => (1u64..3500).prop_map(Op::Advance),
        1 => Just(Op::Reset),
    ]
}

fn apply(kitchen: &mut Kitchen, op: &Op) {
    match op {
        Op::Enter(key) => kitchen.start(*key),
        Op::Pick(ingredient) => {
            let pos = kitchen.station().and_then(|s| {
                let slot = s.shelf().slot_of(*ingredient)?;
                Some(s.shelf().slots()[slot].rect.center())
            });
            if let Some(pos) = pos {
                kitchen.pointer_down(pos, PointerButton::Primary);
            }
        }
        Op::Press(i) => kitchen.pointer_down(targets()[*i], PointerButton::Primary),
        Op::Drop => kitchen.pointer_down(Vec2::new(850.0, 150.0), PointerButton::Secondary),
        Op::Release => kitchen.pointer_up(),
        Op::Advance(ms) => kitchen.advance(*ms),
        Op::Reset => kitchen.reset_recipe(),
    }
}

fn check(kitchen: &Kitchen) -> Result<(), TestCaseError> {
    let Some(recipe) = kitchen.recipe() else {
        return Ok(());
    };
    let summed: u32 = recipe.contents().iter().map(|e| e.grams).sum();
    prop_assert_eq!(recipe.total_grams(), summed);

    let Some(station) = kitchen.station() else {
        return Ok(());
    };
    let here = station.kind().bowl_location();
    let carried = station.carry().is_holding_bowl();
    let in_equipment = station.equipment().appliance().has_bowl();
    let on_shelf = station.shelf().is_stocked(Ingredient::Bowl);

    let elsewhere = recipe.location() != BowlLocation::Inventory && recipe.location() != here;
    let copies = u8::from(carried) + u8::from(in_equipment) + u8::from(on_shelf);
    prop_assert_eq!(copies, if elsewhere { 0 } else { 1 });
    prop_assert_eq!(in_equipment, recipe.location() == here);

    if let Some(scale) = station.scale() {
        let expected = if scale.bowl_present() {
            BOWL_GRAMS + recipe.total_grams()
        } else {
            0
        };
        prop_assert_eq!(scale.raw_grams(), expected);
    }
    Ok(())
}

proptest! {
    #[test]
    fn total_matches_contents(adds in prop::collection::vec(
        (prop::sample::select(Ingredient::PALETTE.to_vec()), 1u32..500),
        0..60,
    )) {
        let mut recipe = RecipeState::new();
        for (ingredient, grams) in &adds {
            recipe.add_ingredient(*ingredient, *grams);
        }
        let summed: u32 = recipe.contents().iter().map(|e| e.grams).sum();
        prop_assert_eq!(recipe.total_grams(), summed);
        prop_assert_eq!(recipe.total_grams(), adds.iter().map(|(_, g)| g).sum::<u32>());
        prop_assert_eq!(recipe.action_count(), adds.len());

        // One entry per distinct ingredient
        let mut seen: Vec<Ingredient> = recipe.contents().iter().map(|e| e.ingredient).collect();
        seen.sort_by_key(|i| i.as_str());
        seen.dedup();
        prop_assert_eq!(seen.len(), recipe.contents().len());

        recipe.reset_all();
        prop_assert!(recipe.contents().is_empty());
        prop_assert_eq!(recipe.total_grams(), 0);
        prop_assert!(recipe.actions().is_empty());
    }

    #[test]
    fn eggs_round_trip_through_grams(count in 1u32..20) {
        let mut recipe = RecipeState::new();
        for _ in 0..count {
            recipe.add_ingredient(Ingredient::Egg, EGG_GRAMS);
        }
        let grams = recipe.grams_of(Ingredient::Egg);
        prop_assert_eq!(cosy_bakes::egg_count(grams, EGG_GRAMS), count);
    }

    #[test]
    fn single_bowl_and_scale_weight_hold(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..80)) {
        let mut kitchen = Kitchen::new(Tuning::default(), seed);
        kitchen.start(SceneKey::Kitchen);
        for op in &ops {
            apply(&mut kitchen, op);
            check(&kitchen)?;
        }
    }
}
