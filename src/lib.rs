//! Wasm Snake front-end crate.
//!
//! Canvas rendering, keyboard routing and the timer-driven game loop for a grid
//! snake game. Game rules live behind the [`engine::Engine`] trait; the crate
//! ships [`engine::World`] as the default engine. Everything except the `web`
//! module is plain Rust and is exercised by native `cargo test`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod random;
pub mod render;
mod web;

pub use config::{BoardConfig, GameConfig};
pub use engine::{Direction, Engine, GameStatus, World};
pub use error::{GameError, Result};
pub use game_loop::{CancelToken, LoopState, Scheduler, Session, TickOutcome};
pub use web::{GameHandle, WebScheduler};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Boot the game on the current page with the default configuration.
#[wasm_bindgen]
pub fn start_game() -> std::result::Result<GameHandle, JsValue> {
    Ok(web::boot(GameConfig::default())?)
}

/// Boot with a JSON configuration; missing fields take their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> std::result::Result<GameHandle, JsValue> {
    let config = GameConfig::from_json(json)?;
    Ok(web::boot(config)?)
}
