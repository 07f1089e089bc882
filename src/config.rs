// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board setup. A game starts from a `BoardConfig`: the grid dimensions, a piece placement
//! written with the piece-placement alphabet of FEN (rows from the top, `/` between rows, digits
//! for runs of empty cells, upper case for White), the side that moves first and the rule set.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::piece::Piece;
use crate::types::{Color, PieceKind, COLORS};

pub const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Widest board whose files can still be named with a single letter.
pub const MAX_WIDTH: usize = 26;

/// How the game decides that it is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rules {
    /// A checked king loses when every square it could step to is attacked. Whether another
    /// piece could block or capture the checking piece is not considered, so this can declare a
    /// loss in positions that are not checkmate. Moves that expose the mover's own king are not
    /// rejected.
    KingMobility,
    /// Moves that leave the mover's king attacked are illegal, and the game ends when the side to
    /// move has no legal move at all: checkmate when in check, stalemate otherwise.
    Strict,
}

impl Default for Rules {
    fn default() -> Rules {
        Rules::KingMobility
    }
}

/// Possible errors that can arise when parsing a placement string into a `Layout`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    Empty,
    UnexpectedChar(char),
    InvalidDigit,
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    TooWide(usize),
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    MissingKing(Color),
    ExtraKing(Color),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "placement has no cells"),
            LayoutError::UnexpectedChar(c) => write!(f, "unexpected character '{}' in placement", c),
            LayoutError::InvalidDigit => write!(f, "empty-cell runs must be positive"),
            LayoutError::RowWidthMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} is {} cells wide, expected {}",
                row + 1,
                found,
                expected
            ),
            LayoutError::TooWide(width) => write!(
                f,
                "board is {} files wide, at most {} are supported",
                width, MAX_WIDTH
            ),
            LayoutError::DimensionMismatch { expected, found } => write!(
                f,
                "placement is {}x{}, configuration says {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            LayoutError::MissingKing(color) => write!(f, "{} has no king", color),
            LayoutError::ExtraKing(color) => write!(f, "{} has more than one king", color),
        }
    }
}

impl Error for LayoutError {}

/// A parsed placement: `rows[y][x]`, row zero at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Option<Piece>>>,
}

impl Layout {
    pub fn parse(placement: &str) -> Result<Layout, LayoutError> {
        let mut rows = Vec::new();
        let mut width = None;
        for (index, text) in placement.trim().split('/').enumerate() {
            let row = parse_row(text)?;
            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(LayoutError::RowWidthMismatch {
                        row: index,
                        expected,
                        found: row.len(),
                    });
                }
                Some(_) => {}
            }

            rows.push(row);
        }

        let width = width.unwrap_or(0);
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        if width > MAX_WIDTH {
            return Err(LayoutError::TooWide(width));
        }

        for &color in &COLORS {
            let kings = rows
                .iter()
                .flatten()
                .flatten()
                .filter(|p| p.kind == PieceKind::King && p.color == color)
                .count();
            match kings {
                0 => return Err(LayoutError::MissingKing(color)),
                1 => {}
                _ => return Err(LayoutError::ExtraKing(color)),
            }
        }

        Ok(Layout {
            width,
            height: rows.len(),
            rows,
        })
    }
}

fn parse_row(text: &str) -> Result<Vec<Option<Piece>>, LayoutError> {
    let mut row = Vec::new();
    let mut run = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            run.push(c);
            continue;
        }

        flush_empty_run(&mut run, &mut row)?;
        let piece = Piece::try_from(c).map_err(|_| LayoutError::UnexpectedChar(c))?;
        row.push(Some(piece));
    }

    flush_empty_run(&mut run, &mut row)?;
    Ok(row)
}

// Digits may run together on boards wider than nine files.
fn flush_empty_run(run: &mut String, row: &mut Vec<Option<Piece>>) -> Result<(), LayoutError> {
    if run.is_empty() {
        return Ok(());
    }

    let count: usize = run.parse().map_err(|_| LayoutError::InvalidDigit)?;
    if count == 0 {
        return Err(LayoutError::InvalidDigit);
    }

    row.extend((0..count).map(|_| None));
    run.clear();
    Ok(())
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    Layout(LayoutError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read configuration: {}", err),
            ConfigError::Json(err) => write!(f, "failed to parse configuration: {}", err),
            ConfigError::Layout(err) => write!(f, "invalid placement: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Json(err) => Some(err),
            ConfigError::Layout(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> ConfigError {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Json(err)
    }
}

impl From<LayoutError> for ConfigError {
    fn from(err: LayoutError) -> ConfigError {
        ConfigError::Layout(err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub placement: String,
    pub first_to_move: Color,
    pub rules: Rules,
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            width: 8,
            height: 8,
            placement: STANDARD_PLACEMENT.to_owned(),
            first_to_move: Color::White,
            rules: Rules::default(),
        }
    }
}

impl BoardConfig {
    pub fn standard() -> BoardConfig {
        BoardConfig::default()
    }

    /// A configuration whose dimensions are taken from the placement itself.
    pub fn with_placement<S: AsRef<str>>(placement: S) -> Result<BoardConfig, LayoutError> {
        let layout = Layout::parse(placement.as_ref())?;
        Ok(BoardConfig {
            width: layout.width,
            height: layout.height,
            placement: placement.as_ref().trim().to_owned(),
            ..BoardConfig::default()
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<BoardConfig, ConfigError> {
        let config: BoardConfig = serde_json::from_reader(reader)?;
        config.layout()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BoardConfig, ConfigError> {
        let file = File::open(path)?;
        BoardConfig::from_reader(BufReader::new(file))
    }

    /// Parses the placement and checks it against the configured dimensions.
    pub fn layout(&self) -> Result<Layout, LayoutError> {
        let layout = Layout::parse(&self.placement)?;
        if layout.width != self.width || layout.height != self.height {
            return Err(LayoutError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (layout.width, layout.height),
            });
        }

        Ok(layout)
    }
}
