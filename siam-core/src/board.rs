//! Board and reserve storage.
//!
//! `Board` owns the 25 cells and both reserve counters. Cells are private:
//! every mutation goes through `put`/`take` (or the coordinate-based
//! `place`/`remove`), which enforce that a cell holds at most one piece.

use std::fmt;

use crate::config::RulesConfig;
use crate::{Piece, Player, Pos, SiamError, SiamResult, BOARD_SIZE, CELL_COUNT};

/// Grid of cells plus per-player reserve counts.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    cells: [Option<Piece>; CELL_COUNT],
    /// Indexed by `Player::index()`.
    reserves: [u8; 2],
}

impl Board {
    /// Create a board with no pieces and empty reserves.
    pub fn empty() -> Board {
        Board {
            cells: [None; CELL_COUNT],
            reserves: [0; 2],
        }
    }

    /// Set both reserves to `count`.
    pub fn with_reserves(mut self, count: u8) -> Board {
        self.reserves = [count; 2];
        self
    }

    /// Starting position described by `config`: its rocks placed, full reserves.
    ///
    /// The config is expected to have passed `RulesConfig::validate`; a
    /// duplicated rock cell simply ends up holding one rock.
    pub fn from_config(config: &RulesConfig) -> Board {
        let mut board = Board::empty().with_reserves(config.reserve_size);
        for &pos in &config.rocks {
            board.cells[pos.index()] = Some(Piece::Rock);
        }
        board
    }

    // ========== Coordinate API ==========

    /// Occupant of the cell at `(row, col)`.
    pub fn cell_at(&self, row: u8, col: u8) -> SiamResult<Option<Piece>> {
        Ok(self.get(Pos::new(row, col)?))
    }

    /// Put `piece` on the empty cell at `(row, col)`.
    pub fn place(&mut self, piece: Piece, row: u8, col: u8) -> SiamResult<()> {
        self.put(Pos::new(row, col)?, piece)
    }

    /// Clear the cell at `(row, col)`, returning what was there.
    pub fn remove(&mut self, row: u8, col: u8) -> SiamResult<Option<Piece>> {
        Ok(self.take(Pos::new(row, col)?))
    }

    // ========== Position API ==========

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.cells[pos.index()]
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.index()].is_none()
    }

    /// Put `piece` on an empty cell.
    pub fn put(&mut self, pos: Pos, piece: Piece) -> SiamResult<()> {
        let cell = &mut self.cells[pos.index()];
        if cell.is_some() {
            return Err(SiamError::CellOccupied(pos));
        }
        *cell = Some(piece);
        Ok(())
    }

    /// Clear a cell, returning its previous occupant.
    #[inline]
    pub fn take(&mut self, pos: Pos) -> Option<Piece> {
        self.cells[pos.index()].take()
    }

    // ========== Reserves ==========

    #[inline]
    pub fn reserve_count(&self, player: Player) -> u8 {
        self.reserves[player.index()]
    }

    /// Take one piece out of `player`'s reserve.
    pub fn decrement_reserve(&mut self, player: Player) -> SiamResult<()> {
        let count = &mut self.reserves[player.index()];
        if *count == 0 {
            return Err(SiamError::EmptyReserve(player));
        }
        *count -= 1;
        Ok(())
    }

    // ========== Counting ==========

    /// Occupied cells with their pieces, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        Pos::all().filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Rocks currently on the board.
    pub fn rock_count(&self) -> usize {
        self.pieces().filter(|(_, p)| p.is_rock()).count()
    }

    /// Animals of `player` currently on the board.
    pub fn count_owned(&self, player: Player) -> usize {
        self.pieces().filter(|(_, p)| p.owner() == Some(player)).count()
    }

    /// Pieces on the board plus pieces in both reserves.
    pub fn total_pieces(&self) -> usize {
        self.pieces().count() + self.reserves.iter().map(|&r| r as usize).sum::<usize>()
    }

    /// Cells as a row-major grid.
    pub fn rows(&self) -> [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut grid = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for pos in Pos::all() {
            grid[pos.row() as usize][pos.col() as usize] = self.get(pos);
        }
        grid
    }

    /// The same position with every animal handed to the other player and
    /// the reserves exchanged.
    pub fn with_players_swapped(&self) -> Board {
        let mut swapped = Board::empty();
        for (pos, piece) in self.pieces() {
            swapped.cells[pos.index()] = Some(piece.with_owner_swapped());
        }
        swapped.reserves = [self.reserves[1], self.reserves[0]];
        swapped
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::from_config(&RulesConfig::default())
    }
}

impl fmt::Display for Board {
    /// ```text
    ///    0 1 2 3 4
    /// 0  . . . . .
    /// 1  . R> . . .
    /// 2  . o o o .
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col} ")?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{row} ")?;
            for col in 0..BOARD_SIZE {
                let [a, b] = self.cells[(row * BOARD_SIZE + col) as usize]
                    .map(Piece::glyph)
                    .unwrap_or(['.', ' ']);
                write!(f, " {a}{b}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "reserves: rhino {} elephant {}",
            self.reserves[Player::Rhino.index()],
            self.reserves[Player::Elephant.index()]
        )
    }
}
