// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rules engine for a two-player chess game played on one device. The board takes discrete
//! inputs (a cell was picked, a promotion piece was chosen) and keeps everything a front end
//! needs to draw the game.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
pub mod config;
mod console;
pub mod geometry;
pub mod history;
mod input;
mod piece;
mod promotion;
mod types;

pub use board::{Board, Outcome, Status};
pub use config::{BoardConfig, ConfigError, LayoutError, Rules};
pub use console::ConsoleSession;
pub use geometry::{Direction, DirectionSet};
pub use history::{HistoryRow, MoveRecord};
pub use input::{Action, Input};
pub use piece::{Effect, MoveMode, MoveOutcome, Piece};
pub use promotion::{PendingPromotion, PROMOTION_CHOICES};
pub use types::{Color, Coordinate, PieceKind};
