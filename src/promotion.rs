// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::piece::Piece;
use crate::types::{Color, Coordinate, PieceKind};

/// The pieces a pawn may turn into, in the order a chooser presents them. Re-choosing a pawn is
/// allowed.
pub static PROMOTION_CHOICES: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
];

/// A pawn that has reached its last rank and is waiting for its owner to pick a replacement.
/// The turn does not pass to the opponent until the promotion is resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    at: Coordinate,
    color: Color,
}

impl PendingPromotion {
    pub fn new(at: Coordinate, color: Color) -> PendingPromotion {
        PendingPromotion { at, color }
    }

    pub fn at(&self) -> Coordinate {
        self.at
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn choices(&self) -> &'static [PieceKind] {
        &PROMOTION_CHOICES
    }

    /// The kind offered at a chooser slot, for front ends that present the choices as a row.
    pub fn choice(&self, index: usize) -> Option<PieceKind> {
        PROMOTION_CHOICES.get(index).cloned()
    }

    /// Builds the replacement piece, or `None` if `kind` is not on offer.
    pub fn resolve(&self, kind: PieceKind) -> Option<Piece> {
        if !PROMOTION_CHOICES.contains(&kind) {
            return None;
        }

        let mut piece = Piece::new(kind, self.color);
        piece.mark_moved();
        Some(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingPromotion {
        PendingPromotion::new(Coordinate::new(0, 0), Color::White)
    }

    #[test]
    fn king_is_not_on_offer() {
        assert_eq!(None, pending().resolve(PieceKind::King));
    }

    #[test]
    fn resolve_keeps_color() {
        let piece = pending().resolve(PieceKind::Queen).unwrap();
        assert_eq!(PieceKind::Queen, piece.kind);
        assert_eq!(Color::White, piece.color);
        assert!(piece.has_moved());
    }

    #[test]
    fn pawn_may_be_chosen_again() {
        let piece = pending().resolve(PieceKind::Pawn).unwrap();
        assert_eq!(PieceKind::Pawn, piece.kind);
    }

    #[test]
    fn slots() {
        let p = pending();
        assert_eq!(5, p.choices().len());
        assert_eq!(Some(PieceKind::Pawn), p.choice(0));
        assert_eq!(Some(PieceKind::Queen), p.choice(4));
        assert_eq!(None, p.choice(5));
    }
}
