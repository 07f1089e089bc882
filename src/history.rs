// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Display};

use regex::Regex;

use crate::types::{Color, Coordinate};

lazy_static! {
    static ref CELL_NAME: Regex = Regex::new(r"^([A-Za-z])([1-9][0-9]*)$").unwrap();
}

/// Number of history rows a front end shows by default.
pub const HISTORY_ROWS: usize = 12;

/// Names a cell the way the board's rulers label it: a file letter counted from the left and a
/// rank number counted from the bottom.
pub fn cell_name(cell: Coordinate, height: usize) -> String {
    let file = (b'A' + cell.x as u8) as char;
    format!("{}{}", file, height - cell.y)
}

/// Inverse of `cell_name`, case-insensitive. Returns `None` for names that do not denote a cell
/// on a `width` by `height` board.
pub fn parse_cell(name: &str, width: usize, height: usize) -> Option<Coordinate> {
    let caps = CELL_NAME.captures(name.trim())?;
    let file = caps[1].chars().next()?.to_ascii_lowercase();
    let x = (file as u8 - b'a') as usize;
    let rank: usize = caps[2].parse().ok()?;
    if x >= width || rank == 0 || rank > height {
        return None;
    }

    Some(Coordinate::new(x, height - rank))
}

/// One successful move, as shown in the history panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub from: Coordinate,
    pub to: Coordinate,
    pub color: Color,
    pub text: String,
}

impl MoveRecord {
    pub fn new(from: Coordinate, to: Coordinate, color: Color, height: usize) -> MoveRecord {
        let text = format!("{} -> {}", cell_name(from, height), cell_name(to, height));
        MoveRecord {
            from,
            to,
            color,
            text,
        }
    }
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.text)
    }
}

/// A numbered pair of consecutive records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow<'a> {
    pub number: usize,
    pub first: &'a MoveRecord,
    pub second: Option<&'a MoveRecord>,
}

/// Pairs records into numbered rows and keeps the newest `max_rows` of them, oldest first. A row
/// opens on a White move and takes the Black reply as its second entry, so a game that Black
/// opens starts with a row holding Black's move alone.
pub fn history_rows(records: &[MoveRecord], max_rows: usize) -> Vec<HistoryRow<'_>> {
    let mut rows: Vec<HistoryRow<'_>> = Vec::new();
    for record in records {
        let answers_white = rows.last().map_or(false, |row| {
            row.second.is_none() && row.first.color == Color::White && record.color == Color::Black
        });
        if answers_white {
            if let Some(row) = rows.last_mut() {
                row.second = Some(record);
            }
            continue;
        }

        let number = rows.len() + 1;
        rows.push(HistoryRow {
            number,
            first: record,
            second: None,
        });
    }

    let skip = rows.len().saturating_sub(max_rows);
    rows.split_off(skip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(i: usize) -> MoveRecord {
        let color = if i % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };
        MoveRecord::new(Coordinate::new(0, i % 8), Coordinate::new(1, i % 8), color, 8)
    }

    #[test]
    fn names_use_file_then_rank() {
        assert_eq!("E2", cell_name(Coordinate::new(4, 6), 8));
        assert_eq!("A8", cell_name(Coordinate::new(0, 0), 8));
        assert_eq!("H1", cell_name(Coordinate::new(7, 7), 8));
    }

    #[test]
    fn parse_is_inverse_of_name() {
        for y in 0..8 {
            for x in 0..8 {
                let c = Coordinate::new(x, y);
                assert_eq!(Some(c), parse_cell(&cell_name(c, 8), 8, 8));
            }
        }
    }

    #[test]
    fn parse_rejects_off_board() {
        assert_eq!(None, parse_cell("i1", 8, 8));
        assert_eq!(None, parse_cell("a9", 8, 8));
        assert_eq!(None, parse_cell("a0", 8, 8));
        assert_eq!(None, parse_cell("e", 8, 8));
        assert_eq!(None, parse_cell("promote", 8, 8));
        assert_eq!(Some(Coordinate::new(0, 0)), parse_cell("a10", 5, 10));
    }

    #[test]
    fn record_text() {
        let rec = MoveRecord::new(Coordinate::new(4, 6), Coordinate::new(4, 4), Color::White, 8);
        assert_eq!("E2 -> E4", rec.to_string());
    }

    #[test]
    fn rows_pair_records() {
        let records: Vec<_> = (0..5).map(record).collect();
        let rows = history_rows(&records, HISTORY_ROWS);
        assert_eq!(3, rows.len());
        assert_eq!(1, rows[0].number);
        assert_eq!(&records[1], rows[0].second.unwrap());
        assert_eq!(&records[4], rows[2].first);
        assert!(rows[2].second.is_none());
    }

    #[test]
    fn rows_keep_newest() {
        let records: Vec<_> = (0..31).map(record).collect();
        let rows = history_rows(&records, HISTORY_ROWS);
        assert_eq!(HISTORY_ROWS, rows.len());
        assert_eq!(5, rows[0].number);
        assert_eq!(&records[8], rows[0].first);
        assert_eq!(&records[30], rows[11].first);
    }

    #[test]
    fn rows_open_on_white() {
        let records: Vec<_> = (1..6).map(record).collect();
        let rows = history_rows(&records, HISTORY_ROWS);
        assert_eq!(3, rows.len());
        assert_eq!(Color::Black, rows[0].first.color);
        assert!(rows[0].second.is_none());
        assert_eq!(&records[1], rows[1].first);
        assert_eq!(&records[2], rows[1].second.unwrap());
        assert_eq!(3, rows[2].number);
        assert_eq!(Color::White, rows[2].first.color);
    }

    #[test]
    fn tall_boards_have_long_ranks() {
        assert_eq!(Some(Coordinate::new(0, 0)), parse_cell("a120", 1, 120));
        assert_eq!("A120", cell_name(Coordinate::new(0, 0), 120));
        assert_eq!(None, parse_cell("a121", 1, 120));
        assert_eq!(None, parse_cell("a99999999999999999999999", 1, 120));
    }

    #[test]
    fn rows_of_nothing() {
        assert!(history_rows(&[], HISTORY_ROWS).is_empty());
    }
}
