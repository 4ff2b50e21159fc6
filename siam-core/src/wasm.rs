//! WASM bindings for siam-core
//!
//! Provides a JavaScript-friendly API for the game engine. The page calls a
//! command, then re-renders from `snapshot()`.

use wasm_bindgen::prelude::*;

use crate::{Direction, Game, Player, RulesConfig, Source};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game. `config` may be undefined or a partial rules object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let inner = if config.is_undefined() || config.is_null() {
            Game::new()
        } else {
            let config: RulesConfig = serde_wasm_bindgen::from_value(config)?;
            Game::with_config(config)?
        };
        Ok(WasmGame { inner })
    }

    /// Select the current player's piece at (row, col)
    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, row: u8, col: u8) -> Result<(), JsError> {
        self.inner.select(Source::cell(row, col)?)?;
        Ok(())
    }

    /// Select a piece from the current player's reserve
    #[wasm_bindgen(js_name = selectReserve)]
    pub fn select_reserve(&mut self) -> Result<(), JsError> {
        self.inner.select(Source::Reserve)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = chooseDestination)]
    pub fn choose_destination(&mut self, row: u8, col: u8) -> Result<(), JsError> {
        self.inner.choose_destination(row, col)?;
        Ok(())
    }

    /// Choose "north", "south", "east" or "west" and play the move.
    /// Returns the move outcome (pushed and eliminated pieces) for animation.
    #[wasm_bindgen(js_name = chooseOrientation)]
    pub fn choose_orientation(&mut self, direction: &str) -> Result<JsValue, JsError> {
        let direction: Direction = direction.parse()?;
        let outcome = self.inner.choose_orientation(direction)?;
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    pub fn cancel(&mut self) -> Result<(), JsError> {
        self.inner.cancel()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.inner.new_game();
    }

    /// Full game state as a plain JS object
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.snapshot())?)
    }

    /// Valid destinations as a flat array [row, col, row, col, ...]
    #[wasm_bindgen(js_name = validDestinations)]
    pub fn valid_destinations(&self) -> Vec<u8> {
        self.inner
            .valid_destinations()
            .iter()
            .flat_map(|pos| [pos.row(), pos.col()])
            .collect()
    }

    /// Current player: "rhino" or "elephant"
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> String {
        player_name(self.inner.current_player()).to_string()
    }

    /// Game result: "ongoing", "rhino_wins" or "elephant_wins"
    pub fn result(&self) -> String {
        match self.inner.result() {
            None => "ongoing".to_string(),
            Some(winner) => format!("{}_wins", player_name(winner)),
        }
    }
}

fn player_name(player: Player) -> &'static str {
    match player {
        Player::Rhino => "rhino",
        Player::Elephant => "elephant",
    }
}
