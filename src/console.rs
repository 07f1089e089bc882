// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::{self, BufRead, Write};

use crate::board::{Board, Status};
use crate::history::{self, HISTORY_ROWS};
use crate::input::{Action, Input};
use crate::types::PieceKind;

/// A line-oriented front end. Each line is either a cell name, which acts like a click on that
/// cell, or one of a handful of commands.
pub struct ConsoleSession {
    board: Board,
}

impl ConsoleSession {
    pub fn new(board: Board) -> ConsoleSession {
        ConsoleSession { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        self.render(&mut writer)?;
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => {}
                (&"quit", []) | (&"exit", []) => break,
                (&"help", []) => self.handle_help(&mut writer)?,
                (&"board", []) => self.render(&mut writer)?,
                (&"moves", []) => self.handle_moves(&mut writer)?,
                (&"history", []) => self.handle_history(&mut writer)?,
                (&"promote", [choice]) => self.handle_promote(&mut writer, choice)?,
                (&cell, []) => self.handle_cell(&mut writer, cell)?,
                _ => writeln!(&mut writer, "unrecognized command")?,
            }
        }

        Ok(())
    }

    fn handle_cell<W: Write>(&mut self, w: &mut W, name: &str) -> io::Result<()> {
        let cell = match history::parse_cell(name, self.board.width(), self.board.height()) {
            Some(cell) => cell,
            None => return writeln!(w, "unrecognized command"),
        };

        match self.board.apply(Input::select(cell)) {
            Action::Ignored => writeln!(w, "nothing to do on {}", name.to_ascii_uppercase()),
            Action::Selected(_) => self.handle_moves(w),
            Action::Deselected => writeln!(w, "selection cleared"),
            Action::Rejected { .. } => writeln!(w, "illegal move"),
            Action::Moved { .. } | Action::PromotionPending(_) | Action::Promoted(_) => {
                self.render(w)
            }
        }
    }

    fn handle_promote<W: Write>(&mut self, w: &mut W, choice: &str) -> io::Result<()> {
        let pending = match self.board.pending_promotion() {
            Some(pending) => pending,
            None => return writeln!(w, "no promotion pending"),
        };

        // Choices may be given by name, by letter or by their position in the chooser.
        let kind = match choice.parse::<usize>() {
            Ok(slot) if slot > 0 => pending.choice(slot - 1),
            Ok(_) => None,
            Err(_) => PieceKind::from_name(choice),
        };

        match kind.map(|kind| self.board.apply(Input::promote(kind))) {
            Some(Action::Promoted(_)) => self.render(w),
            _ => writeln!(w, "cannot promote to {}", choice),
        }
    }

    fn handle_moves<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        let from = match self.board.selected() {
            Some(from) => from,
            None => return writeln!(w, "no piece selected"),
        };

        let height = self.board.height();
        let names: Vec<_> = self
            .board
            .selected_destinations()
            .into_iter()
            .map(|cell| history::cell_name(cell, height))
            .collect();
        writeln!(
            w,
            "{} selected, moves: {}",
            history::cell_name(from, height),
            if names.is_empty() {
                "none".to_owned()
            } else {
                names.join(" ")
            }
        )
    }

    fn handle_history<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        for row in self.board.history_rows(HISTORY_ROWS) {
            match row.second {
                Some(second) => writeln!(w, "{:>3}. {:<10} {}", row.number, row.first, second)?,
                None => writeln!(w, "{:>3}. {}", row.number, row.first)?,
            }
        }

        Ok(())
    }

    fn handle_help<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        writeln!(w, "<cell>            select a piece, or move the selected piece there")?;
        writeln!(w, "promote <choice>  pick a promotion piece by name, letter or slot")?;
        writeln!(w, "moves             list moves of the selected piece")?;
        writeln!(w, "board             show the board")?;
        writeln!(w, "history           show the move history")?;
        writeln!(w, "quit              leave the game")
    }

    fn render<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        write!(w, "{}", self.board)?;
        if let Some(pending) = self.board.pending_promotion() {
            let names: Vec<_> = pending
                .choices()
                .iter()
                .enumerate()
                .map(|(i, kind)| format!("{}:{}", i + 1, kind.name()))
                .collect();
            return writeln!(
                w,
                "{} promotes, choose {}",
                pending.color(),
                names.join(" ")
            );
        }

        match self.board.status() {
            Status::Finished(outcome) => writeln!(w, "{}", outcome),
            Status::Check(color) => writeln!(w, "{} is in check, {} to move", color, self.board.turn()),
            Status::InProgress => writeln!(w, "{} to move", self.board.turn()),
        }
    }
}
