// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Direction and ray arithmetic on board coordinates. Nothing in here knows about pieces or
//! occupancy; it only answers questions about how two cells relate to one another.
use crate::types::{Coordinate, TableIndex};

/// Compass directions on the grid. North points towards row zero, which is where White's pawns
/// are headed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub fn as_vector(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Maps a unit step back to its direction. Anything other than a single step in one of the
    /// eight directions has no direction.
    pub fn from_vector(dx: isize, dy: isize) -> Option<Direction> {
        let dir = match (dx, dy) {
            (0, -1) => Direction::North,
            (1, -1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (0, 1) => Direction::South,
            (-1, 1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            (-1, -1) => Direction::NorthWest,
            _ => return None,
        };
        Some(dir)
    }

    /// The direction of travel from `from` to `to`, if the two cells are distinct and share a
    /// rank, a file or a diagonal.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Direction> {
        let (dx, dy) = from.delta(to);
        if dx == 0 && dy == 0 {
            return None;
        }

        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return None;
        }

        Direction::from_vector(dx.signum(), dy.signum())
    }
}

pub static DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Coordinate {
    /// The neighboring cell in the given direction, if it has non-negative components.
    pub fn towards(self, dir: Direction) -> Option<Coordinate> {
        let (dx, dy) = dir.as_vector();
        self.offset(dx, dy)
    }
}

bitflags! {
    /// A set of directions. The board uses this to remember which rays its checked king is
    /// being attacked along.
    pub struct DirectionSet: u8 {
        const NORTH = 0b0000_0001;
        const NORTH_EAST = 0b0000_0010;
        const EAST = 0b0000_0100;
        const SOUTH_EAST = 0b0000_1000;
        const SOUTH = 0b0001_0000;
        const SOUTH_WEST = 0b0010_0000;
        const WEST = 0b0100_0000;
        const NORTH_WEST = 0b1000_0000;
    }
}

impl DirectionSet {
    pub fn of(dir: Direction) -> DirectionSet {
        DirectionSet::from_bits_truncate(1 << dir.as_index())
    }

    pub fn has(self, dir: Direction) -> bool {
        self.contains(DirectionSet::of(dir))
    }

    pub fn directions(self) -> impl Iterator<Item = Direction> {
        DIRECTIONS.iter().cloned().filter(move |&dir| self.has(dir))
    }
}

impl From<Direction> for DirectionSet {
    fn from(dir: Direction) -> DirectionSet {
        DirectionSet::of(dir)
    }
}

/// Iterator over the cells strictly between two aligned coordinates.
pub struct Ray {
    current: Coordinate,
    stop: Coordinate,
    dir: Option<Direction>,
}

impl Iterator for Ray {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        let dir = self.dir?;
        match self.current.towards(dir) {
            Some(next) if next != self.stop => {
                self.current = next;
                Some(next)
            }
            _ => {
                self.dir = None;
                None
            }
        }
    }
}

/// The cells strictly between `from` and `to`. Empty if the two cells are not on a common rank,
/// file or diagonal, or if they are adjacent.
pub fn ray_between(from: Coordinate, to: Coordinate) -> Ray {
    Ray {
        current: from,
        stop: to,
        dir: Direction::between(from, to),
    }
}

pub fn is_straight(from: Coordinate, to: Coordinate) -> bool {
    let (dx, dy) = from.delta(to);
    (dx == 0) != (dy == 0)
}

pub fn is_diagonal(from: Coordinate, to: Coordinate) -> bool {
    let (dx, dy) = from.delta(to);
    dx != 0 && dx.abs() == dy.abs()
}

pub fn is_knight_jump(from: Coordinate, to: Coordinate) -> bool {
    let (dx, dy) = from.delta(to);
    match (dx.abs(), dy.abs()) {
        (1, 2) | (2, 1) => true,
        _ => false,
    }
}

pub fn is_king_step(from: Coordinate, to: Coordinate) -> bool {
    let (dx, dy) = from.delta(to);
    from != to && dx.abs() <= 1 && dy.abs() <= 1
}
