//! Turn state machine and command/query surface.
//!
//! A turn is entered in three steps (which piece, where, facing which way)
//! and resolved by the last one. Each command checks the phase first and
//! validates its input before touching anything, so a rejected command
//! leaves the game exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::push::{Displacement, PushPlan};
use crate::{
    Board, Direction, Piece, Player, Pos, RulesConfig, SiamError, SiamResult, BOARD_SIZE,
};

/// Where the engine is within a turn.
///
/// Push resolution and turn commit happen inside `choose_orientation`, so
/// callers never observe an intermediate resolving state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPhase {
    AwaitingSelection,
    AwaitingDestination,
    AwaitingOrientation,
    GameOver,
}

/// The piece a player picked up.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    /// A piece already on the board.
    Board(Pos),
    /// A piece from the current player's reserve.
    Reserve,
}

impl Source {
    /// Board source from raw coordinates.
    pub fn cell(row: u8, col: u8) -> SiamResult<Source> {
        Ok(Source::Board(Pos::new(row, col)?))
    }
}

/// Everything that happened in one committed move.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub player: Player,
    pub source: Source,
    pub destination: Pos,
    pub orientation: Direction,
    /// Pushed pieces, farthest first. Empty for a move onto an empty cell.
    pub displaced: Vec<Displacement>,
    /// Pieces pushed off the board by this move.
    pub eliminated: Vec<Piece>,
    /// Set when this move ended the game.
    pub winner: Option<Player>,
}

/// Serializable view of the whole game, rendered by the front end after
/// every command.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    /// Rhinos still in reserve.
    pub rhino_pieces: u8,
    /// Elephants still in reserve.
    pub elephant_pieces: u8,
    pub current_player: Player,
    pub phase: TurnPhase,
    pub result: Option<Player>,
    pub selection: Option<Source>,
    pub pending_destination: Option<Pos>,
    pub valid_destinations: Vec<Pos>,
    pub last_moved: Option<Pos>,
    pub rocks_remaining: usize,
}

/// A single game of Siam.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    config: RulesConfig,
    board: Board,
    current_player: Player,
    phase: TurnPhase,
    selection: Option<Source>,
    pending_destination: Option<Pos>,
    last_moved: Option<Pos>,
    last_outcome: Option<MoveOutcome>,
    eliminated: Vec<Piece>,
    result: Option<Player>,
}

impl Game {
    /// Start a standard game.
    pub fn new() -> Game {
        Game::start(RulesConfig::default())
    }

    /// Start a game with custom rules.
    pub fn with_config(config: RulesConfig) -> SiamResult<Game> {
        config.validate()?;
        Ok(Game::start(config))
    }

    /// Resume play from an arbitrary position with `to_move` to play.
    ///
    /// `new_game` still resets to the starting position described by `config`.
    pub fn from_position(config: RulesConfig, board: Board, to_move: Player) -> SiamResult<Game> {
        config.validate()?;
        let mut game = Game::start(config);
        game.board = board;
        game.current_player = to_move;
        Ok(game)
    }

    fn start(config: RulesConfig) -> Game {
        info!(first = %config.first_player, rocks = config.rocks.len(), "new game");
        Game {
            board: Board::from_config(&config),
            current_player: config.first_player,
            phase: TurnPhase::AwaitingSelection,
            selection: None,
            pending_destination: None,
            last_moved: None,
            last_outcome: None,
            eliminated: Vec::new(),
            result: None,
            config,
        }
    }

    // ========== Commands ==========

    /// Pick up a piece of the current player, from the board or the reserve.
    pub fn select(&mut self, source: Source) -> SiamResult<()> {
        self.expect_phase(TurnPhase::AwaitingSelection)?;
        let player = self.current_player;
        match source {
            Source::Reserve => {
                if self.board.reserve_count(player) == 0 {
                    return Err(SiamError::EmptyReserve(player));
                }
            }
            Source::Board(pos) => {
                if self.board.get(pos).and_then(Piece::owner) != Some(player) {
                    return Err(SiamError::NotSelectable(pos));
                }
            }
        }

        debug!(%player, ?source, "piece selected");
        self.selection = Some(source);
        self.phase = TurnPhase::AwaitingDestination;
        Ok(())
    }

    /// Pick the target cell for the selected piece.
    pub fn choose_destination(&mut self, row: u8, col: u8) -> SiamResult<()> {
        self.expect_phase(TurnPhase::AwaitingDestination)?;
        let pos = Pos::new(row, col)?;
        if !self.valid_destinations().contains(&pos) {
            return Err(SiamError::IllegalDestination(pos));
        }

        debug!(destination = %pos, "destination chosen");
        self.pending_destination = Some(pos);
        self.phase = TurnPhase::AwaitingOrientation;
        Ok(())
    }

    /// Pick the facing of the moving piece and play the move.
    ///
    /// A blocked push fails with `IllegalMove` and returns the turn to
    /// `AwaitingDestination` with the selection kept.
    pub fn choose_orientation(&mut self, orientation: Direction) -> SiamResult<MoveOutcome> {
        self.expect_phase(TurnPhase::AwaitingOrientation)?;
        let (Some(source), Some(destination)) = (self.selection, self.pending_destination) else {
            return Err(SiamError::WrongPhase {
                expected: "AwaitingOrientation",
                actual: self.phase,
            });
        };
        let player = self.current_player;

        let plan = match source {
            Source::Board(from) => {
                let direction = from
                    .direction_to(destination)
                    .ok_or(SiamError::IllegalDestination(destination))?;
                let plan = PushPlan::compute(&self.board, player, orientation, destination, direction);
                if !plan.succeeds() {
                    debug!(%player, push = plan.push, resist = plan.resist, "push blocked");
                    self.pending_destination = None;
                    self.phase = TurnPhase::AwaitingDestination;
                    return Err(SiamError::IllegalMove {
                        push: plan.push,
                        resist: plan.resist,
                    });
                }
                Some(plan)
            }
            Source::Reserve => None,
        };

        // Writes go to a copy that replaces the board once all of them succeed.
        let mut board = self.board.clone();
        let displaced = match &plan {
            Some(plan) => plan.apply(&mut board)?,
            None => Vec::new(),
        };
        match source {
            Source::Board(from) => {
                board.take(from);
            }
            Source::Reserve => board.decrement_reserve(player)?,
        }
        board.put(destination, Piece::animal(player, orientation))?;
        self.board = board;

        let eliminated: Vec<Piece> = displaced
            .iter()
            .filter(|d| d.is_elimination())
            .map(|d| d.piece)
            .collect();
        self.eliminated.extend_from_slice(&eliminated);
        self.selection = None;
        self.pending_destination = None;
        self.last_moved = Some(destination);

        let rocks = self.board.rock_count();
        let winner = (rocks < self.config.rock_threshold as usize).then_some(player);
        debug!(
            %player,
            ?source,
            %destination,
            %orientation,
            pushed = displaced.len(),
            eliminated = eliminated.len(),
            "move committed"
        );

        let outcome = MoveOutcome {
            player,
            source,
            destination,
            orientation,
            displaced,
            eliminated,
            winner,
        };
        self.last_outcome = Some(outcome.clone());

        match winner {
            Some(winner) => {
                info!(%winner, rocks, "game over");
                self.result = Some(winner);
                self.phase = TurnPhase::GameOver;
            }
            None => {
                self.current_player = player.opponent();
                self.phase = TurnPhase::AwaitingSelection;
            }
        }
        Ok(outcome)
    }

    /// Put the selected piece back without using the turn.
    pub fn cancel(&mut self) -> SiamResult<()> {
        match self.phase {
            TurnPhase::AwaitingDestination | TurnPhase::AwaitingOrientation => {
                debug!(player = %self.current_player, "selection cancelled");
                self.selection = None;
                self.pending_destination = None;
                self.phase = TurnPhase::AwaitingSelection;
                Ok(())
            }
            _ => {
                self.game_over_error()?;
                Err(SiamError::WrongPhase {
                    expected: "AwaitingDestination or AwaitingOrientation",
                    actual: self.phase,
                })
            }
        }
    }

    /// Reset to the starting position of this game's rules.
    pub fn new_game(&mut self) {
        *self = Game::start(self.config.clone());
    }

    // ========== Queries ==========

    /// Read-only view of the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reserve counts indexed by `Player::index()` (Rhino first).
    pub fn reserve_counts(&self) -> [u8; 2] {
        [
            self.board.reserve_count(Player::Rhino),
            self.board.reserve_count(Player::Elephant),
        ]
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[inline]
    pub fn turn_phase(&self) -> TurnPhase {
        self.phase
    }

    /// The winner, once the game is over.
    #[inline]
    pub fn result(&self) -> Option<Player> {
        self.result
    }

    #[inline]
    pub fn selection(&self) -> Option<Source> {
        self.selection
    }

    #[inline]
    pub fn pending_destination(&self) -> Option<Pos> {
        self.pending_destination
    }

    /// Cell of the piece moved on the last committed turn.
    #[inline]
    pub fn last_moved(&self) -> Option<Pos> {
        self.last_moved
    }

    #[inline]
    pub fn last_outcome(&self) -> Option<&MoveOutcome> {
        self.last_outcome.as_ref()
    }

    /// Every piece pushed off the board so far, in order.
    #[inline]
    pub fn eliminated(&self) -> &[Piece] {
        &self.eliminated
    }

    #[inline]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Cells the current selection may move to.
    ///
    /// Reserve pieces enter on any empty border cell; board pieces step to
    /// any orthogonal neighbour, occupied or not. Empty without a selection.
    pub fn valid_destinations(&self) -> Vec<Pos> {
        match self.selection {
            None => Vec::new(),
            Some(Source::Reserve) => Pos::all()
                .filter(|&pos| pos.is_border() && self.board.is_empty(pos))
                .collect(),
            Some(Source::Board(from)) => from.neighbors().collect(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.rows(),
            rhino_pieces: self.board.reserve_count(Player::Rhino),
            elephant_pieces: self.board.reserve_count(Player::Elephant),
            current_player: self.current_player,
            phase: self.phase,
            result: self.result,
            selection: self.selection,
            pending_destination: self.pending_destination,
            valid_destinations: self.valid_destinations(),
            last_moved: self.last_moved,
            rocks_remaining: self.board.rock_count(),
        }
    }

    // ========== Helpers ==========

    fn game_over_error(&self) -> SiamResult<()> {
        match self.result {
            Some(winner) => Err(SiamError::GameAlreadyOver(winner)),
            None => Ok(()),
        }
    }

    fn expect_phase(&self, expected: TurnPhase) -> SiamResult<()> {
        self.game_over_error()?;
        if self.phase != expected {
            return Err(SiamError::WrongPhase {
                expected: phase_name(expected),
                actual: self.phase,
            });
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_name(phase: TurnPhase) -> &'static str {
    match phase {
        TurnPhase::AwaitingSelection => "AwaitingSelection",
        TurnPhase::AwaitingDestination => "AwaitingDestination",
        TurnPhase::AwaitingOrientation => "AwaitingOrientation",
        TurnPhase::GameOver => "GameOver",
    }
}
