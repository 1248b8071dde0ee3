pub mod ai;
pub mod game;

use gloo_timers::future::TimeoutFuture;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use ai::{choose_with_draw, thresholds, DifficultyTier, OpponentAgent};
pub use game::{
    GameState, IntegrityError, Move, RoundOutcome, RoundResolution, RuleEngine, RuleError,
    ScoreState,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    web_sys::console::log_1(&"rps_core ready".into());
}

fn to_js_error(error: RuleError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Stateful engine for a session: owns the difficulty/score state and the
/// opponent's random source. One instance per page load.
#[wasm_bindgen]
pub struct GameEngine {
    state: GameState,
    agent: OpponentAgent,
}

#[wasm_bindgen]
impl GameEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(initial_state_json: Option<String>) -> Result<GameEngine, JsValue> {
        let state = if let Some(json) = initial_state_json {
            serde_json::from_str(&json).map_err(serde_to_js_error)?
        } else {
            GameState::sample()
        };
        Ok(GameEngine {
            state,
            agent: OpponentAgent::new(),
        })
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(serde_to_js_error)
    }

    pub fn set_state_json(&mut self, json: &str) -> Result<(), JsValue> {
        let state: GameState = serde_json::from_str(json).map_err(serde_to_js_error)?;
        self.state = state;
        Ok(())
    }

    pub fn difficulty(&self) -> f64 {
        self.state.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: f64) -> Result<(), JsValue> {
        let candidate = GameState {
            difficulty,
            score: self.state.score,
        };
        candidate
            .integrity_check()
            .map_err(|error| to_js_error(RuleError::IntegrityViolation { error }))?;
        self.state = candidate;
        Ok(())
    }

    pub fn difficulty_tier(&self) -> String {
        DifficultyTier::classify(self.state.difficulty).to_string()
    }

    /// Plays one round against the session state and returns the
    /// `RoundResolution` as JSON.
    pub fn play_round_json(&mut self, move_index: u8) -> Result<String, JsValue> {
        let player = RuleEngine::move_from_index(move_index).map_err(to_js_error)?;
        let opponent = self.agent.choose_move(player, self.state.difficulty);
        let resolution = RuleEngine::new()
            .play_round(&mut self.state, player, opponent)
            .map_err(to_js_error)?;
        serde_json::to_string(&resolution).map_err(serde_to_js_error)
    }

    /// Previews a round against a cloned state after an optional delay,
    /// without committing the score. The shell uses this for the opponent's
    /// reveal animation.
    pub fn think_round(&self, move_index: u8, delay_ms: Option<u32>) -> Promise {
        let state = self.state.clone();
        let delay = delay_ms.unwrap_or(0);

        future_to_promise(async move {
            if delay > 0 {
                TimeoutFuture::new(delay).await;
            }
            let player = RuleEngine::move_from_index(move_index).map_err(to_js_error)?;
            let mut preview = state;
            let mut agent = OpponentAgent::new();
            let opponent = agent.choose_move(player, preview.difficulty);
            let resolution = RuleEngine::new()
                .play_round(&mut preview, player, opponent)
                .map_err(to_js_error)?;
            let json = serde_json::to_string(&resolution).map_err(serde_to_js_error)?;
            Ok(JsValue::from_str(&json))
        })
    }
}

/// Returns the initial session state for a fresh page load.
#[wasm_bindgen(js_name = "createGameState")]
pub fn create_game_state() -> Result<JsValue, JsValue> {
    to_value(&GameState::sample()).map_err(JsValue::from)
}

/// Deep-copies the passed session state.
#[wasm_bindgen(js_name = "cloneGameState")]
pub fn clone_game_state(state: JsValue) -> Result<JsValue, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    let cloned = state.clone();
    to_value(&cloned).map_err(JsValue::from)
}

/// Stateless entry point: plays one round against the passed state and
/// returns the resolution with the updated state embedded.
#[wasm_bindgen(js_name = "playRound")]
pub fn play_round(state: JsValue, move_index: u8) -> Result<JsValue, JsValue> {
    let mut state: GameState = from_value(state).map_err(JsValue::from)?;
    let player = RuleEngine::move_from_index(move_index).map_err(to_js_error)?;
    let mut agent = OpponentAgent::new();
    let opponent = agent.choose_move(player, state.difficulty);
    match RuleEngine::new().play_round(&mut state, player, opponent) {
        Ok(resolution) => to_value(&resolution).map_err(JsValue::from),
        Err(error) => Err(to_js_error(error)),
    }
}

#[wasm_bindgen(js_name = "classifyDifficulty")]
pub fn classify_difficulty(difficulty: f64) -> String {
    DifficultyTier::classify(difficulty).to_string()
}

/// The two draw thresholds for a difficulty value, for the shell's debug
/// panel.
#[wasm_bindgen(js_name = "difficultyThresholds")]
pub fn difficulty_thresholds(difficulty: f64) -> Result<JsValue, JsValue> {
    to_value(&thresholds(difficulty)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "moveName")]
pub fn move_name(index: u8) -> Result<String, JsValue> {
    let chosen = RuleEngine::move_from_index(index).map_err(to_js_error)?;
    Ok(chosen.name().to_string())
}

#[wasm_bindgen(js_name = "validateState")]
pub fn validate_state(state: JsValue) -> Result<(), JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    state
        .integrity_check()
        .map_err(|error| to_js_error(RuleError::IntegrityViolation { error }))?;
    Ok(())
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
