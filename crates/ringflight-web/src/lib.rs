pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use ringflight::{GameConfig, InputEvent, RingFlight};

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<RingFlight>>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner<RingFlight>) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

fn install(game: RingFlight) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = GameRunner::new(game);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.init());
    log::info!("ring-flight: initialized");
}

#[wasm_bindgen]
pub fn game_init() {
    install(RingFlight::new());
}

/// Start with tunables from JSON. A rejected config falls back to defaults.
#[wasm_bindgen]
pub fn game_init_with_config(json: &str) {
    let game = GameConfig::from_json(json)
        .and_then(RingFlight::with_config)
        .unwrap_or_else(|e| {
            // Logger first, so the warning reaches the console.
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
            log::warn!("config rejected, using defaults: {}", e);
            RingFlight::new()
        });
    install(game);
}

#[wasm_bindgen]
pub fn game_load_manifest(json: &str) {
    with_runner(|r| r.load_manifest(json));
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_sprites_ptr() -> *const f32 {
    with_runner(|r| r.sprites_ptr())
}

#[wasm_bindgen]
pub fn get_sprite_count() -> u32 {
    with_runner(|r| r.sprite_count())
}

#[wasm_bindgen]
pub fn get_effects_ptr() -> *const f32 {
    with_runner(|r| r.effects_ptr())
}

#[wasm_bindgen]
pub fn get_effect_count() -> u32 {
    with_runner(|r| r.effect_count())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

#[wasm_bindgen]
pub fn get_score() -> u32 {
    with_runner(|r| r.game().session().score())
}
