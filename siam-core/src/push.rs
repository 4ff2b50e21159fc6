//! Push resolution.
//!
//! A move onto an occupied cell pushes the contiguous line of pieces that
//! starts at the destination and runs in the move direction. The line is
//! scored before anything is written:
//!
//! - push: the mover (if it faces the move direction) plus every animal of
//!   the moving player in the line that also faces that way
//! - resist: every other animal in the line
//! - rocks: neither
//!
//! The push goes through only when push > resist. Pieces are then shifted
//! one cell, farthest first, and whatever crosses the edge is eliminated.

use serde::Serialize;
use tracing::trace;

use crate::{Board, Direction, Piece, Player, Pos, SiamResult};

/// Where a piece went during a committed move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Displacement {
    pub piece: Piece,
    pub from: Pos,
    /// `None` when the piece was pushed off the board.
    pub to: Option<Pos>,
}

impl Displacement {
    #[inline]
    pub fn is_elimination(&self) -> bool {
        self.to.is_none()
    }
}

/// Fully evaluated push, computed without touching the board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PushPlan {
    /// Direction the line is pushed in.
    pub direction: Direction,
    /// Occupied cells from the destination outward, nearest first.
    pub chain: Vec<Pos>,
    pub push: u8,
    pub resist: u8,
}

/// True if `piece` is an animal of `player` facing `dir`.
#[inline]
fn braced(piece: Piece, player: Player, dir: Direction) -> bool {
    matches!(piece, Piece::Animal { owner, orientation } if owner == player && orientation == dir)
}

impl PushPlan {
    /// Evaluate `mover`'s piece, facing `orientation`, stepping onto
    /// `destination` in `direction`.
    pub fn compute(
        board: &Board,
        mover: Player,
        orientation: Direction,
        destination: Pos,
        direction: Direction,
    ) -> PushPlan {
        let mut chain = Vec::new();
        let mut cursor = Some(destination);
        while let Some(pos) = cursor {
            if board.is_empty(pos) {
                break;
            }
            chain.push(pos);
            cursor = pos.step(direction);
        }

        let mut push = u8::from(orientation == direction);
        let mut resist = 0u8;
        for piece in chain.iter().filter_map(|&pos| board.get(pos)) {
            if braced(piece, mover, direction) {
                push += 1;
            } else if !piece.is_rock() {
                resist += 1;
            }
        }

        trace!(?direction, ?chain, push, resist, "push chain evaluated");
        PushPlan {
            direction,
            chain,
            push,
            resist,
        }
    }

    /// Whether the move may proceed. An empty line needs no push at all.
    #[inline]
    pub fn succeeds(&self) -> bool {
        self.chain.is_empty() || self.push > self.resist
    }

    /// Shift the line one cell along the push direction, farthest piece
    /// first. Does not move the pushing piece itself.
    ///
    /// Returned displacements are farthest first, matching the write order.
    pub fn apply(&self, board: &mut Board) -> SiamResult<Vec<Displacement>> {
        let mut moved = Vec::with_capacity(self.chain.len());
        for &from in self.chain.iter().rev() {
            let Some(piece) = board.take(from) else {
                continue;
            };
            let to = from.step(self.direction);
            if let Some(to) = to {
                board.put(to, piece)?;
            }
            moved.push(Displacement { piece, from, to });
        }
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Pos {
        Pos::new(row, col).unwrap()
    }

    fn rhino(d: Direction) -> Piece {
        Piece::animal(Player::Rhino, d)
    }

    fn elephant(d: Direction) -> Piece {
        Piece::animal(Player::Elephant, d)
    }

    #[test]
    fn test_empty_destination_needs_no_push() {
        let board = Board::empty();
        let plan = PushPlan::compute(&board, Player::Rhino, Direction::West, pos(1, 1), Direction::East);
        assert!(plan.chain.is_empty());
        assert_eq!(plan.push, 0);
        assert!(plan.succeeds());
    }

    #[test]
    fn test_braced_mover_pushes_rock() {
        let mut board = Board::empty();
        board.place(Piece::Rock, 2, 2).unwrap();
        let plan = PushPlan::compute(&board, Player::Rhino, Direction::East, pos(2, 2), Direction::East);
        assert_eq!(plan.chain, vec![pos(2, 2)]);
        assert_eq!((plan.push, plan.resist), (1, 0));
        assert!(plan.succeeds());
    }

    #[test]
    fn test_unbraced_mover_cannot_push_rock() {
        let mut board = Board::empty();
        board.place(Piece::Rock, 2, 2).unwrap();
        let plan = PushPlan::compute(&board, Player::Rhino, Direction::North, pos(2, 2), Direction::East);
        assert_eq!((plan.push, plan.resist), (0, 0));
        assert!(!plan.succeeds(), "0 > 0 is false, ties block");
    }

    #[test]
    fn test_rocks_then_opponent_is_a_tie() {
        let mut board = Board::empty();
        board.place(Piece::Rock, 2, 1).unwrap();
        board.place(Piece::Rock, 2, 2).unwrap();
        board.place(elephant(Direction::West), 2, 3).unwrap();
        let plan = PushPlan::compute(&board, Player::Rhino, Direction::East, pos(2, 1), Direction::East);
        assert_eq!(plan.chain.len(), 3);
        assert_eq!((plan.push, plan.resist), (1, 1));
        assert!(!plan.succeeds());
    }

    #[test]
    fn test_own_unbraced_piece_resists() {
        let mut board = Board::empty();
        board.place(rhino(Direction::North), 0, 2).unwrap();
        let plan = PushPlan::compute(&board, Player::Rhino, Direction::East, pos(0, 2), Direction::East);
        assert_eq!((plan.push, plan.resist), (1, 1));
        assert!(!plan.succeeds());
    }

    #[test]
    fn test_own_braced_piece_helps() {
        let mut board = Board::empty();
        board.place(rhino(Direction::South), 1, 0).unwrap();
        board.place(elephant(Direction::North), 2, 0).unwrap();
        board.place(Piece::Rock, 3, 0).unwrap();
        let plan = PushPlan::compute(&board, Player::Rhino, Direction::South, pos(1, 0), Direction::South);
        assert_eq!((plan.push, plan.resist), (2, 1));
        assert!(plan.succeeds());
    }

    #[test]
    fn test_opponent_facing_any_way_resists_once() {
        for facing in Direction::all() {
            let mut board = Board::empty();
            board.place(elephant(facing), 3, 3).unwrap();
            let plan = PushPlan::compute(&board, Player::Rhino, Direction::North, pos(3, 3), Direction::North);
            assert_eq!(plan.resist, 1, "facing {facing}");
        }
    }

    #[test]
    fn test_chain_stops_at_gap() {
        let mut board = Board::empty();
        board.place(Piece::Rock, 0, 1).unwrap();
        board.place(Piece::Rock, 0, 2).unwrap();
        board.place(elephant(Direction::West), 0, 4).unwrap();
        let plan = PushPlan::compute(&board, Player::Rhino, Direction::East, pos(0, 1), Direction::East);
        assert_eq!(plan.chain, vec![pos(0, 1), pos(0, 2)]);
        assert_eq!(plan.resist, 0);
    }

    #[test]
    fn test_apply_shifts_into_gap() {
        let mut board = Board::empty();
        board.place(Piece::Rock, 1, 1).unwrap();
        board.place(elephant(Direction::West), 1, 2).unwrap();
        board.place(rhino(Direction::East), 1, 0).unwrap();
        board.place(rhino(Direction::East), 1, 3).unwrap();

        let plan = PushPlan::compute(&board, Player::Rhino, Direction::East, pos(1, 1), Direction::East);
        assert_eq!((plan.push, plan.resist), (2, 1));
        let moved = plan.apply(&mut board).unwrap();

        assert!(board.is_empty(pos(1, 1)));
        assert_eq!(board.get(pos(1, 2)), Some(Piece::Rock));
        assert_eq!(board.get(pos(1, 3)), Some(elephant(Direction::West)));
        assert_eq!(board.get(pos(1, 4)), Some(rhino(Direction::East)));
        assert_eq!(moved.len(), 3);
        assert_eq!(moved[0].from, pos(1, 3));
        assert!(moved.iter().all(|d| !d.is_elimination()));
    }

    #[test]
    fn test_apply_eliminates_at_edge() {
        let mut board = Board::empty();
        board.place(Piece::Rock, 3, 2).unwrap();
        board.place(Piece::Rock, 4, 2).unwrap();

        let plan = PushPlan::compute(&board, Player::Elephant, Direction::South, pos(3, 2), Direction::South);
        assert!(plan.succeeds());
        let moved = plan.apply(&mut board).unwrap();

        assert_eq!(board.rock_count(), 1);
        assert_eq!(board.get(pos(4, 2)), Some(Piece::Rock));
        assert!(board.is_empty(pos(3, 2)));
        assert_eq!(
            moved[0],
            Displacement {
                piece: Piece::Rock,
                from: pos(4, 2),
                to: None
            }
        );
    }
}
