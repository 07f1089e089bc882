// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The vertical step this color's pawns advance by. White starts at the bottom of the grid
    /// (the highest `y`) and moves towards row zero.
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row from which this color's pawns may advance two squares.
    pub fn pawn_rank(self, height: usize) -> usize {
        match self {
            Color::White => height.saturating_sub(2),
            Color::Black => 1,
        }
    }

    /// Row on which this color's pawns promote.
    pub fn promotion_rank(self, height: usize) -> usize {
        match self {
            Color::White => 0,
            Color::Black => height.saturating_sub(1),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Black => "black",
        };
        f.write_str(name)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Looks a piece kind up by its full name or its letter, ignoring case.
    pub fn from_name(name: &str) -> Option<PieceKind> {
        let lowered = name.to_ascii_lowercase();
        let mut chars = lowered.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return PieceKind::try_from(c).ok();
        }

        PIECE_KINDS.iter().cloned().find(|kind| kind.name() == lowered)
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// A cell on the board. `x` is the file counted from the left, `y` is the row counted from the
/// top. Whether a coordinate is on a particular board is up to the board to decide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Coordinate {
        Coordinate { x, y }
    }

    /// Shifts this coordinate, returning `None` if either component would become negative.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coordinate> {
        let x = self.x as isize + dx;
        let y = self.y as isize + dy;
        if x < 0 || y < 0 {
            return None;
        }

        Some(Coordinate::new(x as usize, y as usize))
    }

    /// Signed displacement from this coordinate to `other`.
    pub fn delta(self, other: Coordinate) -> (isize, isize) {
        (
            other.x as isize - self.x as isize,
            other.y as isize - self.y as isize,
        )
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        for &color in &COLORS {
            assert_ne!(color, color.opponent());
            assert_eq!(color, color.opponent().opponent());
        }
    }

    #[test]
    fn pawn_ranks_on_standard_board() {
        assert_eq!(6, Color::White.pawn_rank(8));
        assert_eq!(1, Color::Black.pawn_rank(8));
        assert_eq!(0, Color::White.promotion_rank(8));
        assert_eq!(7, Color::Black.promotion_rank(8));
    }

    #[test]
    fn piece_kind_lookup() {
        assert_eq!(Some(PieceKind::Queen), PieceKind::from_name("q"));
        assert_eq!(Some(PieceKind::Queen), PieceKind::from_name("Queen"));
        assert_eq!(Some(PieceKind::Knight), PieceKind::from_name("N"));
        assert_eq!(None, PieceKind::from_name("x"));
        assert_eq!(None, PieceKind::from_name("dragon"));
    }

    #[test]
    fn offset_refuses_negative() {
        let c = Coordinate::new(0, 3);
        assert_eq!(None, c.offset(-1, 0));
        assert_eq!(Some(Coordinate::new(1, 2)), c.offset(1, -1));
    }

    #[test]
    fn delta_is_signed() {
        let a = Coordinate::new(4, 6);
        let b = Coordinate::new(3, 4);
        assert_eq!((-1, -2), a.delta(b));
        assert_eq!((1, 2), b.delta(a));
    }

    #[test]
    fn color_index_round_trip() {
        assert_eq!(0, Color::White.as_index());
        assert_eq!(1, Color::Black.as_index());
    }
}
