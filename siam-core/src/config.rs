//! Rules configuration.
//!
//! The defaults describe the standard game. A front end can hand in a
//! partial JSON object; missing fields fall back to the defaults.
//!
//! ```json
//! { "reserveSize": 5, "rockThreshold": 3, "rocks": [[2,1],[2,2],[2,3]], "firstPlayer": "rhino" }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Player, Pos, SiamError, SiamResult, CELL_COUNT};

/// Setup and victory parameters for a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RulesConfig {
    /// Pieces each player starts with in reserve.
    pub reserve_size: u8,
    /// A player wins when their move leaves fewer rocks than this on the board.
    pub rock_threshold: u8,
    /// Cells holding a rock at the start of the game.
    pub rocks: Vec<Pos>,
    /// Who moves first.
    pub first_player: Player,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            reserve_size: 5,
            rock_threshold: 3,
            rocks: [(2, 1), (2, 2), (2, 3)]
                .into_iter()
                .filter_map(|(r, c)| Pos::new(r, c).ok())
                .collect(),
            first_player: Player::Rhino,
        }
    }
}

impl RulesConfig {
    /// Check that the configuration describes a playable starting position.
    pub fn validate(&self) -> SiamResult<()> {
        let mut seen = HashSet::with_capacity(self.rocks.len());
        if let Some(dup) = self.rocks.iter().find(|&&pos| !seen.insert(pos)) {
            return Err(SiamError::InvalidConfig(format!("two rocks on cell {dup}")));
        }
        if self.rock_threshold == 0 {
            return Err(SiamError::InvalidConfig(
                "rock threshold must be at least 1".to_string(),
            ));
        }
        let total = self.rocks.len() + 2 * self.reserve_size as usize;
        if total > CELL_COUNT {
            return Err(SiamError::InvalidConfig(format!(
                "{total} pieces do not fit on a {CELL_COUNT}-cell board"
            )));
        }
        Ok(())
    }
}
