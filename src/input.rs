// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Read;

use crate::types::{Coordinate, PieceKind};

/// A discrete player intent, already translated from whatever device produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Input {
    Select { x: usize, y: usize },
    Promote { kind: PieceKind },
}

impl Input {
    pub fn select(cell: Coordinate) -> Input {
        Input::Select {
            x: cell.x,
            y: cell.y,
        }
    }

    pub fn promote(kind: PieceKind) -> Input {
        Input::Promote { kind }
    }

    /// Reads a JSON array of inputs, as written by `hotseat replay` scripts.
    pub fn read_script<R: Read>(reader: R) -> serde_json::Result<Vec<Input>> {
        serde_json::from_reader(reader)
    }
}

/// What the board did with an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// The input did not apply in the current state and changed nothing.
    Ignored,
    Selected(Coordinate),
    Deselected,
    /// The selected piece could not go to the chosen cell. The selection is cleared.
    Rejected { from: Coordinate, to: Coordinate },
    Moved { from: Coordinate, to: Coordinate },
    /// The move landed a pawn on its last rank; the turn waits for a promotion choice.
    PromotionPending(Coordinate),
    Promoted(PieceKind),
}
