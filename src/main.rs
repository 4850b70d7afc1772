//! Cosy Bakes entry point
//!
//! Handles platform-specific initialization. The browser build wires DOM
//! input to a [`Kitchen`] session and draws it on a 2D canvas; the native
//! build plays a short scripted session and prints the recipe log.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use cosy_bakes::consts::{VIEW_HEIGHT, VIEW_WIDTH};
    use cosy_bakes::layout::*;
    use cosy_bakes::sim::{
        ActiveScene, BowlVisibility, HOTSPOTS, Kitchen, PointerButton, Rect, SceneKey, Station,
    };
    use cosy_bakes::{Tuning, ui};

    /// Longest frame the simulation will swallow (tab switches etc.)
    const MAX_FRAME_MS: f64 = 250.0;

    struct Game {
        kitchen: Kitchen,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        /// Client pixels to logical canvas pixels
        fn to_view(&self, event: &MouseEvent) -> Vec2 {
            let w = self.canvas.client_width().max(1) as f32;
            let h = self.canvas.client_height().max(1) as f32;
            Vec2::new(
                event.offset_x() as f32 * VIEW_WIDTH / w,
                event.offset_y() as f32 * VIEW_HEIGHT / h,
            )
        }

        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;
            self.kitchen.advance(dt as u64);
            for event in self.kitchen.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        fn fill_rect(&self, rect: &Rect, color: &str) {
            let size = rect.size();
            self.ctx.set_fill_style_str(color);
            self.ctx
                .fill_rect(rect.min.x as f64, rect.min.y as f64, size.x as f64, size.y as f64);
        }

        fn label(&self, text: &str, pos: Vec2, color: &str) {
            self.ctx.set_fill_style_str(color);
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }

        fn render(&self) {
            self.ctx.set_fill_style_str("#3b2418");
            self.ctx
                .fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
            self.ctx.set_font("20px monospace");
            self.ctx.set_text_align("center");

            match self.kitchen.scene() {
                ActiveScene::RecipeSelection => {
                    self.label("COSY BAKES", Vec2::new(450.0, 100.0), "#FFD700");
                    self.label("Choose Your Recipe", Vec2::new(450.0, 160.0), "#F5DEB3");
                    self.fill_rect(&RECIPE_CARD, "#8B4513");
                    self.label("BROWNIES", RECIPE_CARD.center(), "#FFD700");
                }
                ActiveScene::Hub => {
                    for hotspot in &HOTSPOTS {
                        self.fill_rect(&hotspot.rect, "rgba(255, 215, 0, 0.2)");
                        let top = Vec2::new(hotspot.rect.center().x, hotspot.rect.min.y - 20.0);
                        self.label(&hotspot.name.to_uppercase(), top, "#F5DEB3");
                    }
                    self.back_button("< BACK");
                    self.label(ui::HUB_INSTRUCTION, Vec2::new(450.0, 580.0), "#DEB887");
                }
                ActiveScene::Station(station) => self.render_station(station),
                ActiveScene::Oven(oven) => {
                    self.back_button("< BACK");
                    self.fill_rect(&Rect::from_center(450.0, 300.0, 300.0, 200.0), "#5a3a22");
                    let clock = ui::clock_label(oven.clock_secs());
                    self.label(&clock, Vec2::new(450.0, 550.0), "#FFD700");
                    if let Some(outcome) = oven.outcome() {
                        let color = if outcome.is_success() { "#FFD700" } else { "#FF4C4C" };
                        self.label(outcome.as_str(), Vec2::new(450.0, 500.0), color);
                    }
                }
            }

            if let Some(message) = self.kitchen.message() {
                self.label(message, Vec2::new(450.0, 140.0), "#FFFFFF");
            }
        }

        fn back_button(&self, text: &str) {
            self.fill_rect(&BACK_BUTTON, "#8B4513");
            self.label(text, BACK_BUTTON.center() + Vec2::new(0.0, 6.0), "#F5DEB3");
        }

        fn render_station(&self, station: &Station) {
            let kind = station.kind();
            self.label(&ui::station_title(kind), Vec2::new(450.0, 50.0), "#F5DEB3");
            self.back_button(ui::BACK_LABEL);
            self.fill_rect(&HINT_BUTTON, "#6b4423");
            self.label(ui::HINT_LABEL, HINT_BUTTON.center() + Vec2::new(0.0, 6.0), "#F5DEB3");

            if let Some(scale) = station.scale() {
                self.fill_rect(&SCALE_BODY, "#9a9a9a");
                if scale.bowl_present() {
                    self.fill_rect(&SCALE_BOWL, "#d8d8e8");
                }
                if let Some(recipe) = self.kitchen.recipe() {
                    self.fill_rect(&NOTEPAD, "#fffacd");
                    let notes = ui::bowl_notepad(recipe);
                    for (i, line) in notes.lines().enumerate() {
                        let y = NOTEPAD.min.y + 24.0 + i as f32 * 20.0;
                        self.label(line, Vec2::new(NOTEPAD.center().x, y), "#3b2418");
                    }
                }
            }
            if let Some(microwave) = station.microwave() {
                self.fill_rect(&MICROWAVE_BODY, "#cccccc");
                if microwave.door_open() {
                    self.fill_rect(&MICROWAVE_DOOR, "#222222");
                }
                if microwave.bowl_visibility() == BowlVisibility::Visible {
                    self.fill_rect(&MICROWAVE_BOWL, "#d8d8e8");
                }
            }
            if let Some(mixer) = station.mixer() {
                self.fill_rect(&MIXER_BODY, "#c0392b");
                let status = mixer.status();
                if status.has_bowl {
                    self.fill_rect(&MIXER_BOWL, "#d8d8e8");
                }
                if status.progress_visible {
                    let bar = Rect::from_min_size(650.0, 240.0, 2.0 * f32::from(status.mixing_level), 16.0);
                    let color = format!("#{:06X}", ui::mixing_bar_color(status.mixing_level));
                    self.fill_rect(&bar, &color);
                }
            }

            self.label(
                &ui::readout_label(&station.readout()),
                Vec2::new(750.0, 230.0),
                "#FFD700",
            );
            self.label(ui::station_instructions(kind), Vec2::new(450.0, 460.0), "#DEB887");

            for slot in station.shelf().slots().iter().filter(|s| s.stocked) {
                self.fill_rect(&slot.rect, "#f5deb3");
                self.label(slot.ingredient.as_str(), slot.rect.center(), "#3b2418");
            }
            if let Some(held) = station.carry().held() {
                let rect = Rect::from_center(held.pos.x, held.pos.y, 70.0, 70.0);
                self.fill_rect(&rect, "rgba(255, 255, 153, 0.8)");
                self.label(held.ingredient.as_str(), held.pos, "#3b2418");
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("hud-scene") {
                el.set_text_content(Some(&ui::scene_status(&self.kitchen)));
            }
            if let Some(el) = document.get_element_by_id("hint-panel") {
                let open = self.kitchen.station().is_some_and(|s| s.hint_open());
                if open {
                    el.set_text_content(Some(&self.kitchen.hint_text()));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Cosy Bakes starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no #canvas element");
            return;
        };
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            kitchen: Kitchen::new(Tuning::default(), seed),
            canvas: canvas.clone(),
            ctx,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // No browser menu on right-click; it drops the carried item
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_view(&event);
                g.kitchen.pointer_move(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_view(&event);
                let button = match event.button() {
                    2 => PointerButton::Secondary,
                    _ => PointerButton::Primary,
                };
                g.kitchen.pointer_down(pos, button);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up anywhere ends a pour
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().kitchen.pointer_up();
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Escape" => g.kitchen.start(SceneKey::Kitchen),
                    "r" | "R" => {
                        g.kitchen.reset_recipe();
                        log::info!("Recipe reset from keyboard");
                    }
                    _ => {}
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Releasing the button outside the page would leave a pour running
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                if document.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().kitchen.pointer_up();
                    log::info!("Tab hidden, pointer released");
                }
            });
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.add_event_listener_with_callback(
                    "visibilitychange",
                    closure.as_ref().unchecked_ref(),
                );
            }
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cosy_bakes::Tuning;

    env_logger::init();
    log::info!("Cosy Bakes (native) starting...");
    log::info!("Native mode plays a scripted session - run with `trunk serve` for the web version");

    let tuning = match std::env::var("COSY_BAKES_TUNING") {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Ignoring COSY_BAKES_TUNING: {}", e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    demo::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted walk through every station
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use cosy_bakes::layout::{MICROWAVE_DOOR, MIXER_BODY, MIXER_BOWL, RECIPE_CARD, SCALE_BODY, SCALE_BOWL};
    use cosy_bakes::sim::{Kitchen, PointerButton, SceneKey};
    use cosy_bakes::{Ingredient, Tuning, ui};
    use glam::Vec2;

    /// Microwave casing clear of the door and the bowl
    const MICROWAVE_EDGE: Vec2 = Vec2::new(560.0, 300.0);
    /// Mixer motor housing clear of the bowl
    const MIXER_HEAD: Vec2 = Vec2::new(500.0, 200.0);

    fn click(kitchen: &mut Kitchen, pos: Vec2) {
        kitchen.pointer_down(pos, PointerButton::Primary);
        kitchen.pointer_up();
    }

    fn shelf_pos(kitchen: &Kitchen, ingredient: Ingredient) -> Option<Vec2> {
        let shelf = kitchen.station()?.shelf();
        let slot = shelf.slot_of(ingredient)?;
        Some(shelf.slots()[slot].rect.center())
    }

    fn pick(kitchen: &mut Kitchen, ingredient: Ingredient) {
        if let Some(pos) = shelf_pos(kitchen, ingredient) {
            click(kitchen, pos);
        }
    }

    /// Hold the carried item over the scale bowl for `hold_ms`
    fn pour(kitchen: &mut Kitchen, ingredient: Ingredient, hold_ms: u64) {
        pick(kitchen, ingredient);
        kitchen.pointer_down(SCALE_BOWL.center(), PointerButton::Primary);
        kitchen.advance(hold_ms);
        kitchen.pointer_up();
        kitchen.pointer_down(SCALE_BOWL.center(), PointerButton::Secondary);
        println!("  {:<8} -> {}", ingredient.as_str(), ui::scene_status(kitchen));
    }

    pub fn run(tuning: Tuning) {
        let mut kitchen = Kitchen::new(tuning, 2024);

        click(&mut kitchen, RECIPE_CARD.center());
        kitchen.start(SceneKey::Scale);
        println!("{}", ui::scene_status(&kitchen));
        pick(&mut kitchen, Ingredient::Bowl);
        click(&mut kitchen, SCALE_BODY.center());
        click(&mut kitchen, SCALE_BODY.center());
        pour(&mut kitchen, Ingredient::Flour, 1500);
        pour(&mut kitchen, Ingredient::Sugar, 1000);
        pour(&mut kitchen, Ingredient::Egg, 2500);
        pour(&mut kitchen, Ingredient::Cocoa, 800);
        click(&mut kitchen, SCALE_BOWL.center());

        kitchen.start(SceneKey::Mixer);
        pick(&mut kitchen, Ingredient::Bowl);
        click(&mut kitchen, MIXER_BODY.center());
        click(&mut kitchen, MIXER_HEAD);
        kitchen.advance(1500);
        println!("{}", ui::scene_status(&kitchen));
        kitchen.advance(1500);
        println!("{}", ui::scene_status(&kitchen));
        kitchen.advance(2000);
        click(&mut kitchen, MIXER_BOWL.center());

        kitchen.start(SceneKey::Microwave);
        click(&mut kitchen, MICROWAVE_EDGE);
        pick(&mut kitchen, Ingredient::Bowl);
        click(&mut kitchen, MICROWAVE_DOOR.center());
        click(&mut kitchen, MICROWAVE_EDGE);
        kitchen.advance(1000);
        println!("{}", ui::scene_status(&kitchen));
        kitchen.advance(2000);
        println!("{}", ui::scene_status(&kitchen));

        kitchen.start(SceneKey::Oven);
        kitchen.advance(tuning.oven_deposit_ms + tuning.oven_tick_ms * u64::from(tuning.oven_bake_ticks));
        println!("{}", ui::scene_status(&kitchen));

        println!("\n{}", kitchen.hint_text());
    }
}
