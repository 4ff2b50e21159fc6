//! Siam game logic: rhinos, elephants and rocks on a 5x5 board.
//!
//! # Board Layout
//!
//! ```text
//!              North (row 0)
//!          0    1    2    3    4      <- col
//!        +----+----+----+----+----+
//!   0    |  0 |  1 |  2 |  3 |  4 |
//!   1    |  5 |  6 |  7 |  8 |  9 |
//!   2    | 10 | 11 | 12 | 13 | 14 |   West = col 0, East = col 4
//!   3    | 15 | 16 | 17 | 18 | 19 |
//!   4    | 20 | 21 | 22 | 23 | 24 |
//!        +----+----+----+----+----+
//!              South (row 4)
//! ```
//!
//! Cells are indexed row-major (`index = row * 5 + col`). The sixteen cells
//! on the outer ring are border cells; reserve pieces may only enter there.
//!
//! # Turn Flow
//!
//! ```text
//! AwaitingSelection --select--> AwaitingDestination --choose_destination-->
//! AwaitingOrientation --choose_orientation--> (resolve push, commit)
//!     -> AwaitingSelection (next player)   or   GameOver
//! ```
//!
//! A move is one orthogonal step (board piece) or an entry onto an empty
//! border cell (reserve piece). Stepping onto an occupied cell pushes the
//! whole contiguous line of pieces ahead of it; the push goes through only
//! if the pieces braced in the push direction outnumber those that are not.
//! Rocks are dead weight. Pushing a rock off the board until fewer than three
//! remain wins the game for the player who pushed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod push;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::Board;
pub use config::RulesConfig;
pub use engine::{Game, GameSnapshot, MoveOutcome, Source, TurnPhase};
pub use error::{SiamError, SiamResult};
pub use push::{Displacement, PushPlan};

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 5;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Rhino,
    Elephant,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Rhino => Player::Elephant,
            Player::Elephant => Player::Rhino,
        }
    }

    /// Index into per-player arrays (Rhino = 0, Elephant = 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Rhino => 0,
            Player::Elephant => 1,
        }
    }

    /// Both players, Rhino first.
    pub fn all() -> impl Iterator<Item = Player> {
        [Player::Rhino, Player::Elephant].into_iter()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Rhino => f.write_str("Rhino"),
            Player::Elephant => f.write_str("Elephant"),
        }
    }
}

/// One of the four orthogonal directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Row and column offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// All four directions.
    pub fn all() -> impl Iterator<Item = Direction> {
        [Direction::North, Direction::South, Direction::East, Direction::West].into_iter()
    }

    fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = SiamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::all()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SiamError::ParseDirection(s.to_string()))
    }
}

/// What kind of piece occupies a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PieceKind {
    Rhino,
    Elephant,
    Rock,
}

/// A piece on the board.
///
/// Animals belong to a player and face a direction; rocks are neutral and
/// have no facing. A rock can be pushed around but never selected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Piece {
    Animal {
        owner: Player,
        orientation: Direction,
    },
    Rock,
}

impl Piece {
    /// Create an animal piece.
    #[inline]
    pub const fn animal(owner: Player, orientation: Direction) -> Piece {
        Piece::Animal { owner, orientation }
    }

    #[inline]
    pub fn kind(self) -> PieceKind {
        match self {
            Piece::Animal { owner: Player::Rhino, .. } => PieceKind::Rhino,
            Piece::Animal { owner: Player::Elephant, .. } => PieceKind::Elephant,
            Piece::Rock => PieceKind::Rock,
        }
    }

    /// Owning player, `None` for rocks.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Piece::Animal { owner, .. } => Some(owner),
            Piece::Rock => None,
        }
    }

    /// Facing direction, `None` for rocks.
    #[inline]
    pub fn orientation(self) -> Option<Direction> {
        match self {
            Piece::Animal { orientation, .. } => Some(orientation),
            Piece::Rock => None,
        }
    }

    #[inline]
    pub fn is_rock(self) -> bool {
        matches!(self, Piece::Rock)
    }

    /// Same piece with its owner replaced by the opponent. Rocks are unchanged.
    pub fn with_owner_swapped(self) -> Piece {
        match self {
            Piece::Animal { owner, orientation } => Piece::animal(owner.opponent(), orientation),
            Piece::Rock => Piece::Rock,
        }
    }

    /// Two-character glyph used by the board's text rendering.
    pub(crate) fn glyph(self) -> [char; 2] {
        let arrow = |d: Direction| match d {
            Direction::North => '^',
            Direction::South => 'v',
            Direction::East => '>',
            Direction::West => '<',
        };
        match self {
            Piece::Animal { owner: Player::Rhino, orientation } => ['R', arrow(orientation)],
            Piece::Animal { owner: Player::Elephant, orientation } => ['E', arrow(orientation)],
            Piece::Rock => ['o', ' '],
        }
    }
}

/// Position on the 5x5 board (0-24), always in bounds.
///
/// Serialized as `[row, col]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Pos(u8);

impl Pos {
    /// Create a position from row and column, failing if either is off the board.
    #[inline]
    pub fn new(row: u8, col: u8) -> SiamResult<Pos> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Pos(row * BOARD_SIZE + col))
        } else {
            Err(SiamError::OutOfBounds { row, col })
        }
    }

    /// Create a position from a row-major index (0-24).
    #[inline]
    pub fn from_index(idx: usize) -> Option<Pos> {
        (idx < CELL_COUNT).then_some(Pos(idx as u8))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the row (0-4).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// Get the column (0-4).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// True for cells on the outer ring of the board.
    #[inline]
    pub fn is_border(self) -> bool {
        let last = BOARD_SIZE - 1;
        self.row() == 0 || self.row() == last || self.col() == 0 || self.col() == last
    }

    /// The neighbouring cell one step in `dir`, or `None` past the edge.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Pos(row as u8 * BOARD_SIZE + col as u8))
        } else {
            None
        }
    }

    /// Direction of a single orthogonal step from `self` to `other`, if they are adjacent.
    pub fn direction_to(self, other: Pos) -> Option<Direction> {
        Direction::all().find(|&d| self.step(d) == Some(other))
    }

    /// In-bounds orthogonal neighbours, in North, South, East, West order.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        Direction::all().filter_map(move |d| self.step(d))
    }

    /// Iterate over all 25 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..CELL_COUNT as u8).map(Pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl TryFrom<[u8; 2]> for Pos {
    type Error = SiamError;

    fn try_from([row, col]: [u8; 2]) -> Result<Self, Self::Error> {
        Pos::new(row, col)
    }
}

impl From<Pos> for [u8; 2] {
    fn from(pos: Pos) -> Self {
        [pos.row(), pos.col()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Rhino.opponent(), Player::Elephant);
        assert_eq!(Player::Elephant.opponent(), Player::Rhino);
    }

    #[test]
    fn test_pos_new_bounds() {
        assert_eq!(Pos::new(0, 0).unwrap().index(), 0);
        assert_eq!(Pos::new(2, 3).unwrap().index(), 13);
        assert_eq!(Pos::new(4, 4).unwrap().index(), 24);
        assert_eq!(Pos::new(5, 0), Err(SiamError::OutOfBounds { row: 5, col: 0 }));
        assert_eq!(Pos::new(0, 7), Err(SiamError::OutOfBounds { row: 0, col: 7 }));
    }

    #[test]
    fn test_pos_row_col() {
        for pos in Pos::all() {
            assert_eq!(Pos::new(pos.row(), pos.col()).unwrap(), pos);
        }
        assert_eq!(Pos::from_index(25), None);
    }

    #[test]
    fn test_border_cells() {
        let border: Vec<Pos> = Pos::all().filter(|p| p.is_border()).collect();
        assert_eq!(border.len(), 16);
        for pos in Pos::all() {
            let interior = (1..4).contains(&pos.row()) && (1..4).contains(&pos.col());
            assert_eq!(pos.is_border(), !interior, "{pos}");
        }
    }

    #[test]
    fn test_step_and_direction_to() {
        let center = Pos::new(2, 2).unwrap();
        assert_eq!(center.step(Direction::North), Some(Pos::new(1, 2).unwrap()));
        assert_eq!(center.step(Direction::South), Some(Pos::new(3, 2).unwrap()));
        assert_eq!(center.step(Direction::East), Some(Pos::new(2, 3).unwrap()));
        assert_eq!(center.step(Direction::West), Some(Pos::new(2, 1).unwrap()));

        let corner = Pos::new(0, 0).unwrap();
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.neighbors().count(), 2);

        for dir in Direction::all() {
            let next = center.step(dir).unwrap();
            assert_eq!(center.direction_to(next), Some(dir));
            assert_eq!(next.direction_to(center), Some(dir.opposite()));
        }
        assert_eq!(corner.direction_to(center), None);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("north".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("West".parse::<Direction>(), Ok(Direction::West));
        assert_eq!(
            "up".parse::<Direction>(),
            Err(SiamError::ParseDirection("up".to_string()))
        );
        for dir in Direction::all() {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn test_piece_accessors() {
        let rhino = Piece::animal(Player::Rhino, Direction::East);
        assert_eq!(rhino.kind(), PieceKind::Rhino);
        assert_eq!(rhino.owner(), Some(Player::Rhino));
        assert_eq!(rhino.orientation(), Some(Direction::East));
        assert_eq!(rhino.with_owner_swapped().kind(), PieceKind::Elephant);

        assert_eq!(Piece::Rock.kind(), PieceKind::Rock);
        assert_eq!(Piece::Rock.owner(), None);
        assert_eq!(Piece::Rock.orientation(), None);
        assert_eq!(Piece::Rock.with_owner_swapped(), Piece::Rock);
    }

    #[test]
    fn test_serde_shapes() {
        let pos = Pos::new(1, 3).unwrap();
        assert_eq!(serde_json::to_string(&pos).unwrap(), "[1,3]");
        assert_eq!(serde_json::from_str::<Pos>("[1,3]").unwrap(), pos);
        assert!(serde_json::from_str::<Pos>("[5,1]").is_err());

        let piece = Piece::animal(Player::Elephant, Direction::South);
        assert_eq!(
            serde_json::to_string(&piece).unwrap(),
            r#"{"kind":"animal","owner":"elephant","orientation":"south"}"#
        );
        assert_eq!(serde_json::to_string(&Piece::Rock).unwrap(), r#"{"kind":"rock"}"#);
    }
}
