//! wasm-bindgen surface for the browser game loop
//!
//! Payloads cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::PipeDirector;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Flappy Director loaded");
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Director handle owned by the JS engine for one session
#[wasm_bindgen]
pub struct WebDirector {
    director: PipeDirector<'static>,
}

impl WebDirector {
    fn with_settings(settings: &Settings) -> WebDirector {
        let difficulty = settings.difficulty;
        let seed = settings.run_seed();
        log::info!("New director: {} (seed {})", difficulty.as_str(), seed);
        WebDirector {
            director: PipeDirector::new(difficulty.profile(), difficulty.config(), seed),
        }
    }
}

#[wasm_bindgen]
impl WebDirector {
    /// Director for a difficulty name; unknown names fall back to Normal
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str, seed: Option<u64>) -> WebDirector {
        Self::with_settings(&Settings::from_choice(difficulty, seed))
    }

    /// Director configured from the player's saved settings
    pub fn from_settings() -> WebDirector {
        Self::with_settings(&Settings::load())
    }

    /// Switch difficulty/seed mid-session, remember the choice and start a fresh run
    pub fn choose(&mut self, difficulty: &str, seed: Option<u64>) {
        let settings = Settings::from_choice(difficulty, seed);
        settings.save();
        *self = Self::with_settings(&settings);
    }

    /// Next pipe intent as JSON (`{gap_center, gap_size, delay}`)
    pub fn next(&mut self) -> Result<String, JsError> {
        let intent = self.director.next()?;
        to_json(&intent)
    }

    pub fn reset(&mut self) {
        self.director.reset();
    }

    pub fn reseed(&mut self, seed: u64) {
        self.director.reseed(seed);
    }

    /// Push a score; returns triggered phase/milestone events as a JSON array
    pub fn on_score(&mut self, score: u32) -> Result<String, JsError> {
        to_json(&self.director.on_score(score))
    }

    pub fn record_clean_pass(&mut self) {
        self.director.progression_mut().record_clean_pass();
    }

    pub fn record_near_miss(&mut self) {
        self.director.progression_mut().record_near_miss();
    }

    /// Classify a pass by clearance (px); true when it was a near miss
    pub fn record_pass(&mut self, clearance: f32) -> bool {
        self.director.progression_mut().record_pass(clearance)
    }

    /// Progression snapshot as JSON
    pub fn snapshot(&self) -> Result<String, JsError> {
        to_json(&self.director.snapshot())
    }

    /// Arc/phrase events since the last drain, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        to_json(&self.director.drain_events())
    }
}
