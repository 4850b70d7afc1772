//! Game session
//!
//! Owns the recipe and whichever scene is on screen. Exactly one scene is
//! active; switching scenes always tears the old one down first so no timer
//! outlives its station.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dispenser::RandomDispenser;
use super::geom::Rect;
use super::oven::{OutcomeToggle, OvenBake};
use super::recipe::RecipeState;
use super::station::{EquipmentKind, PointerButton, Station, StationEvent};
use crate::layout::{BACK_BUTTON, RECIPE_CARD};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKey {
    RecipeSelection,
    Kitchen,
    Scale,
    Microwave,
    Mixer,
    Oven,
}

impl SceneKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKey::RecipeSelection => "RecipeSelectionScene",
            SceneKey::Kitchen => "KitchenScene",
            SceneKey::Scale => "ScaleScene",
            SceneKey::Microwave => "MicrowaveScene",
            SceneKey::Mixer => "MixerScene",
            SceneKey::Oven => "OvenScene",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "RecipeSelectionScene" => Some(SceneKey::RecipeSelection),
            "KitchenScene" => Some(SceneKey::Kitchen),
            "ScaleScene" => Some(SceneKey::Scale),
            "MicrowaveScene" => Some(SceneKey::Microwave),
            "MixerScene" => Some(SceneKey::Mixer),
            "OvenScene" => Some(SceneKey::Oven),
            _ => None,
        }
    }

    pub fn equipment(&self) -> Option<EquipmentKind> {
        match self {
            SceneKey::Scale => Some(EquipmentKind::Scale),
            SceneKey::Microwave => Some(EquipmentKind::Microwave),
            SceneKey::Mixer => Some(EquipmentKind::Mixer),
            _ => None,
        }
    }
}

impl From<EquipmentKind> for SceneKey {
    fn from(kind: EquipmentKind) -> Self {
        match kind {
            EquipmentKind::Scale => SceneKey::Scale,
            EquipmentKind::Microwave => SceneKey::Microwave,
            EquipmentKind::Mixer => SceneKey::Mixer,
        }
    }
}

/// Clickable equipment in the kitchen hub
#[derive(Debug, Clone, Copy)]
pub struct Hotspot {
    pub name: &'static str,
    pub description: &'static str,
    pub rect: Rect,
    /// None = not built yet
    pub target: Option<SceneKey>,
}

pub static HOTSPOTS: [Hotspot; 5] = [
    Hotspot {
        name: "scale",
        description: "Weigh ingredients precisely",
        rect: Rect::from_center(270.0, 310.0, 80.0, 80.0),
        target: Some(SceneKey::Scale),
    },
    Hotspot {
        name: "stove",
        description: "Cook on the stovetop",
        rect: Rect::from_center(430.0, 350.0, 200.0, 30.0),
        target: None,
    },
    Hotspot {
        name: "oven",
        description: "Bake in the oven",
        rect: Rect::from_center(430.0, 470.0, 230.0, 190.0),
        target: Some(SceneKey::Oven),
    },
    Hotspot {
        name: "microwave",
        description: "Heat and warm ingredients",
        rect: Rect::from_center(630.0, 310.0, 130.0, 100.0),
        target: Some(SceneKey::Microwave),
    },
    Hotspot {
        name: "mixer",
        description: "Mix ingredients together",
        rect: Rect::from_center(800.0, 310.0, 130.0, 120.0),
        target: Some(SceneKey::Mixer),
    },
];

pub fn hotspot_at(pos: Vec2) -> Option<&'static Hotspot> {
    HOTSPOTS.iter().find(|h| h.rect.contains(pos))
}

pub enum ActiveScene {
    RecipeSelection,
    Hub,
    Station(Station),
    Oven(OvenBake),
}

#[derive(Debug, Clone, PartialEq)]
pub enum KitchenEvent {
    SceneChanged(SceneKey),
    /// Hub notice (unbuilt equipment)
    Notice(String),
    Station(StationEvent),
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    remaining_ms: u64,
}

pub struct Kitchen {
    scene: ActiveScene,
    /// Created the first time a scene needs it
    recipe: Option<RecipeState>,
    tuning: Tuning,
    rng: Pcg32,
    bake_toggle: OutcomeToggle,
    notice: Option<Notice>,
    events: Vec<KitchenEvent>,
}

/// The session recipe, created on first use with the tuned egg weight
fn session_recipe<'a>(
    recipe: &'a mut Option<RecipeState>,
    tuning: &Tuning,
) -> &'a mut RecipeState {
    recipe.get_or_insert_with(|| RecipeState::with_egg_grams(tuning.egg_grams))
}

impl Kitchen {
    /// New session on the recipe selection screen
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            scene: ActiveScene::RecipeSelection,
            recipe: None,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            bake_toggle: OutcomeToggle::default(),
            notice: None,
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scene(&self) -> &ActiveScene {
        &self.scene
    }

    pub fn scene_key(&self) -> SceneKey {
        match &self.scene {
            ActiveScene::RecipeSelection => SceneKey::RecipeSelection,
            ActiveScene::Hub => SceneKey::Kitchen,
            ActiveScene::Station(station) => station.kind().into(),
            ActiveScene::Oven(_) => SceneKey::Oven,
        }
    }

    pub fn station(&self) -> Option<&Station> {
        match &self.scene {
            ActiveScene::Station(station) => Some(station),
            _ => None,
        }
    }

    pub fn oven(&self) -> Option<&OvenBake> {
        match &self.scene {
            ActiveScene::Oven(oven) => Some(oven),
            _ => None,
        }
    }

    /// The recipe, if any scene has needed it yet
    pub fn recipe(&self) -> Option<&RecipeState> {
        self.recipe.as_ref()
    }

    pub fn recipe_mut(&mut self) -> &mut RecipeState {
        session_recipe(&mut self.recipe, &self.tuning)
    }

    /// Station message or hub notice currently on screen
    pub fn message(&self) -> Option<&str> {
        match &self.scene {
            ActiveScene::Station(station) => station.message(),
            ActiveScene::Hub => self.notice.as_ref().map(|n| n.text.as_str()),
            _ => None,
        }
    }

    pub fn hint_text(&self) -> String {
        crate::ui::hint_text(self.recipe.as_ref())
    }

    pub fn drain_events(&mut self) -> Vec<KitchenEvent> {
        std::mem::take(&mut self.events)
    }

    fn leave_scene(&mut self) {
        match &mut self.scene {
            ActiveScene::Station(station) => {
                let recipe = session_recipe(&mut self.recipe, &self.tuning);
                station.teardown(recipe);
            }
            ActiveScene::Oven(oven) => oven.teardown(),
            _ => {}
        }
        self.collect_station_events();
        self.notice = None;
    }

    /// Switch scenes, tearing down the current one first
    pub fn start(&mut self, key: SceneKey) {
        self.leave_scene();
        self.scene = match key {
            SceneKey::RecipeSelection => ActiveScene::RecipeSelection,
            SceneKey::Kitchen => ActiveScene::Hub,
            SceneKey::Oven => {
                self.recipe_mut();
                ActiveScene::Oven(OvenBake::start(&self.tuning))
            }
            SceneKey::Scale => self.enter_station(EquipmentKind::Scale),
            SceneKey::Microwave => self.enter_station(EquipmentKind::Microwave),
            SceneKey::Mixer => self.enter_station(EquipmentKind::Mixer),
        };
        log::info!("Scene: {}", key.as_str());
        self.events.push(KitchenEvent::SceneChanged(key));
    }

    fn enter_station(&mut self, kind: EquipmentKind) -> ActiveScene {
        let dispenser = Box::new(RandomDispenser::new(self.rng.random()));
        let recipe = session_recipe(&mut self.recipe, &self.tuning);
        ActiveScene::Station(Station::enter(kind, recipe, self.tuning, dispenser))
    }

    /// Move station events over, acting on leave requests
    fn collect_station_events(&mut self) -> bool {
        let ActiveScene::Station(station) = &mut self.scene else {
            return false;
        };
        let mut leave = false;
        for event in station.drain_events() {
            leave |= event == StationEvent::LeaveRequested;
            self.events.push(KitchenEvent::Station(event));
        }
        leave
    }

    pub fn pointer_down(&mut self, pos: Vec2, button: PointerButton) {
        let next = match &mut self.scene {
            ActiveScene::RecipeSelection => {
                (button == PointerButton::Primary && RECIPE_CARD.contains(pos))
                    .then_some(SceneKey::Kitchen)
            }
            ActiveScene::Hub => {
                if button != PointerButton::Primary {
                    None
                } else if BACK_BUTTON.contains(pos) {
                    Some(SceneKey::RecipeSelection)
                } else {
                    match hotspot_at(pos) {
                        Some(Hotspot { target: Some(target), .. }) => Some(*target),
                        Some(hotspot) => {
                            let text = format!("{} COMING SOON!", hotspot.name.to_uppercase());
                            log::warn!("{} is not built yet", hotspot.name);
                            self.events.push(KitchenEvent::Notice(text.clone()));
                            self.notice = Some(Notice {
                                text,
                                remaining_ms: self.tuning.toast_ms,
                            });
                            None
                        }
                        None => None,
                    }
                }
            }
            ActiveScene::Station(station) => {
                let recipe = session_recipe(&mut self.recipe, &self.tuning);
                station.pointer_down(recipe, pos, button);
                None
            }
            ActiveScene::Oven(_) => {
                (button == PointerButton::Primary && BACK_BUTTON.contains(pos))
                    .then_some(SceneKey::Kitchen)
            }
        };

        let leave = self.collect_station_events();
        if let Some(key) = next {
            self.start(key);
        } else if leave {
            self.start(SceneKey::Kitchen);
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let ActiveScene::Station(station) = &mut self.scene {
            station.pointer_move(pos);
        }
    }

    pub fn pointer_up(&mut self) {
        if let ActiveScene::Station(station) = &mut self.scene {
            let recipe = session_recipe(&mut self.recipe, &self.tuning);
            station.pointer_up(recipe);
        }
        self.collect_station_events();
    }

    /// Advance the active scene's clock
    pub fn advance(&mut self, dt_ms: u64) {
        match &mut self.scene {
            ActiveScene::Station(station) => {
                let recipe = session_recipe(&mut self.recipe, &self.tuning);
                station.advance(recipe, dt_ms);
            }
            ActiveScene::Oven(oven) => {
                let recipe = session_recipe(&mut self.recipe, &self.tuning);
                oven.advance(recipe, &mut self.bake_toggle, dt_ms);
            }
            _ => {}
        }
        self.collect_station_events();

        if let Some(notice) = &mut self.notice {
            notice.remaining_ms = notice.remaining_ms.saturating_sub(dt_ms);
            if notice.remaining_ms == 0 {
                self.notice = None;
            }
        }
    }

    /// Start the recipe over. A station on screen is re-entered so it
    /// matches the emptied recipe.
    pub fn reset_recipe(&mut self) {
        let key = self.scene_key();
        if let Some(recipe) = &mut self.recipe {
            recipe.reset_all();
        }
        if key.equipment().is_some() {
            self.start(key);
        }
    }
}
