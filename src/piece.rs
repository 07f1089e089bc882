// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

use crate::board::Board;
use crate::geometry::{self, Direction};
use crate::types::{Color, Coordinate, PieceKind};

/// What a movement query is for. `Attack` asks whether a piece threatens a cell, which differs
/// from `Move` for pawns (they capture diagonally but advance straight) and for kings (a king
/// threatens squares it would never be allowed to step onto).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveMode {
    Move,
    Attack,
}

/// Side effects a legal move carries beyond relocating the moving piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Quiet,
    /// A pawn advanced two squares, skipping over `skipped`.
    DoubleStep { skipped: Coordinate },
    /// A pawn captured en passant; the captured pawn sits on `captured`, not on the destination.
    EnPassant { captured: Coordinate },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Illegal,
    Legal(Effect),
}

impl MoveOutcome {
    pub fn is_legal(self) -> bool {
        match self {
            MoveOutcome::Legal(_) => true,
            MoveOutcome::Illegal => false,
        }
    }

    fn quiet_if(cond: bool) -> MoveOutcome {
        if cond {
            MoveOutcome::Legal(Effect::Quiet)
        } else {
            MoveOutcome::Illegal
        }
    }
}

/// A piece on the board. Pieces do not know where they are; the board grid is the only record of
/// a piece's location, so every query takes the source cell explicitly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// Decides whether this piece, standing on `from`, may go to `to`, and what else happens if
    /// it does. This never mutates anything; `Board::move_piece` consumes the outcome.
    pub fn evaluate(
        &self,
        board: &Board,
        from: Coordinate,
        to: Coordinate,
        mode: MoveMode,
    ) -> MoveOutcome {
        if !board.contains(to) {
            return MoveOutcome::Illegal;
        }

        if let Some(occupant) = board.piece_at(to) {
            if occupant.color == self.color {
                return MoveOutcome::Illegal;
            }

            // Kings are threatened but never taken.
            if occupant.kind == PieceKind::King && mode == MoveMode::Move {
                return MoveOutcome::Illegal;
            }
        }

        match self.kind {
            PieceKind::Pawn => self.evaluate_pawn(board, from, to, mode),
            PieceKind::Rook => {
                MoveOutcome::quiet_if(geometry::is_straight(from, to) && board.is_ray_clear(from, to))
            }
            PieceKind::Bishop => {
                MoveOutcome::quiet_if(geometry::is_diagonal(from, to) && board.is_ray_clear(from, to))
            }
            PieceKind::Queen => MoveOutcome::quiet_if(
                (geometry::is_straight(from, to) || geometry::is_diagonal(from, to))
                    && board.is_ray_clear(from, to),
            ),
            PieceKind::Knight => MoveOutcome::quiet_if(geometry::is_knight_jump(from, to)),
            PieceKind::King => self.evaluate_king(board, from, to, mode),
        }
    }

    fn evaluate_pawn(
        &self,
        board: &Board,
        from: Coordinate,
        to: Coordinate,
        mode: MoveMode,
    ) -> MoveOutcome {
        let forward = self.color.forward();
        let (dx, dy) = from.delta(to);
        let diagonal_step = dy == forward && dx.abs() == 1;

        // 1. En passant. The destination is the skipped square, which is empty; the pawn being
        // taken stands one row behind it from the capturer's point of view.
        if diagonal_step && board.en_passant_target() == Some(to) {
            if let Some(captured) = to.offset(0, -forward) {
                let takes_pawn = board.piece_at(captured).map_or(false, |p| {
                    p.kind == PieceKind::Pawn && p.color == self.color.opponent()
                });
                if takes_pawn {
                    return MoveOutcome::Legal(Effect::EnPassant { captured });
                }
            }
        }

        // 2. Captures and threat probes only ever go one square diagonally forward.
        if board.piece_at(to).is_some() || mode == MoveMode::Attack {
            return MoveOutcome::quiet_if(diagonal_step);
        }

        // 3. Straight advances onto empty squares.
        if dx != 0 {
            return MoveOutcome::Illegal;
        }

        if dy == forward {
            return MoveOutcome::Legal(Effect::Quiet);
        }

        if dy == 2 * forward && from.y == self.color.pawn_rank(board.height()) {
            if let Some(skipped) = from.offset(0, forward) {
                if board.piece_at(skipped).is_none() {
                    return MoveOutcome::Legal(Effect::DoubleStep { skipped });
                }
            }
        }

        MoveOutcome::Illegal
    }

    fn evaluate_king(
        &self,
        board: &Board,
        from: Coordinate,
        to: Coordinate,
        mode: MoveMode,
    ) -> MoveOutcome {
        if !geometry::is_king_step(from, to) {
            return MoveOutcome::Illegal;
        }

        if mode == MoveMode::Attack {
            return MoveOutcome::Legal(Effect::Quiet);
        }

        // The attack-direction cache belongs to the side to move. Stepping further along a ray
        // we are being checked on keeps us on that ray.
        if self.color == board.turn() {
            if let Some(dir) = Direction::between(from, to) {
                if board.attack_directions().has(dir) {
                    return MoveOutcome::Illegal;
                }
            }
        }

        MoveOutcome::quiet_if(!board.is_attacked_after_king_step(from, to))
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = PieceKind::try_from(c.to_ascii_lowercase())?;
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match self.color {
            Color::White => f.write_char(chr.to_ascii_uppercase()),
            Color::Black => f.write_char(chr),
        }
    }
}
