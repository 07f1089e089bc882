// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::config::{BoardConfig, LayoutError, Rules};
use crate::geometry::{self, Direction, DirectionSet, DIRECTIONS};
use crate::history::{self, HistoryRow, MoveRecord};
use crate::input::{Action, Input};
use crate::piece::{Effect, MoveMode, MoveOutcome, Piece};
use crate::promotion::PendingPromotion;
use crate::types::{Color, Coordinate, PieceKind};

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Color),
    Stalemate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Winner(color) => write!(f, "{} wins", color),
            Outcome::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// The line of status text a front end shows under the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Check(Color),
    Finished(Outcome),
}

/// The game. The grid is the only record of where pieces are; everything else here is turn
/// bookkeeping that the rules need between half-moves.
#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Option<Piece>>>,
    turn: Color,
    selected: Option<Coordinate>,
    en_passant: Option<Coordinate>,
    en_passant_candidate: Option<Coordinate>,
    pending_promotion: Option<PendingPromotion>,
    history: Vec<MoveRecord>,
    attack_directions: DirectionSet,
    outcome: Option<Outcome>,
    rules: Rules,
}

//
// Construction
//

impl Board {
    pub fn new(config: &BoardConfig) -> Result<Board, LayoutError> {
        let layout = config.layout()?;
        let mut board = Board {
            width: layout.width,
            height: layout.height,
            cells: layout.rows,
            turn: config.first_to_move,
            selected: None,
            en_passant: None,
            en_passant_candidate: None,
            pending_promotion: None,
            history: Vec::new(),
            attack_directions: DirectionSet::empty(),
            outcome: None,
            rules: config.rules,
        };

        board.refresh_turn_state();
        Ok(board)
    }

    pub fn from_start_position() -> Board {
        Board::new(&BoardConfig::standard()).expect("standard placement is valid")
    }

    /// A board with the given placement, White to move and the default rules.
    pub fn from_placement<S: AsRef<str>>(placement: S) -> Result<Board, LayoutError> {
        Board::new(&BoardConfig::with_placement(placement)?)
    }

    // A copy for probing hypothetical positions. Turn bookkeeping that probes never read is
    // left behind.
    fn scratch(&self) -> Board {
        Board {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
            turn: self.turn,
            selected: None,
            en_passant: self.en_passant,
            en_passant_candidate: None,
            pending_promotion: None,
            history: Vec::new(),
            attack_directions: DirectionSet::empty(),
            outcome: None,
            rules: self.rules,
        }
    }
}

//
// Board state getters
//

impl Board {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn selected(&self) -> Option<Coordinate> {
        self.selected
    }

    /// The square skipped by a pawn double-step on the previous half-move.
    pub fn en_passant_target(&self) -> Option<Coordinate> {
        self.en_passant
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn history_rows(&self, max_rows: usize) -> Vec<HistoryRow<'_>> {
        history::history_rows(&self.history, max_rows)
    }

    /// Directions from which the side to move's king is currently attacked, knights excluded.
    pub fn attack_directions(&self) -> DirectionSet {
        self.attack_directions
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn piece_at(&self, cell: Coordinate) -> Option<Piece> {
        self.cells
            .get(cell.y)
            .and_then(|row| row.get(cell.x))
            .and_then(|slot| *slot)
    }

    /// Every occupied cell, top row first.
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, slot)| slot.map(|piece| (Coordinate::new(x, y), piece)))
        })
    }

    /// Every cell on the board, top row first.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }

    pub fn king_square(&self, color: Color) -> Option<Coordinate> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(cell, _)| cell)
    }

    pub fn status(&self) -> Status {
        if let Some(outcome) = self.outcome {
            return Status::Finished(outcome);
        }

        for &color in &[self.turn, self.turn.opponent()] {
            if self.is_check(color) {
                return Status::Check(color);
            }
        }

        Status::InProgress
    }

    fn name(&self, cell: Coordinate) -> String {
        history::cell_name(cell, self.height)
    }

    fn set(&mut self, cell: Coordinate, slot: Option<Piece>) {
        self.cells[cell.y][cell.x] = slot;
    }
}

//
// Movement queries
//

impl Board {
    pub fn is_ray_clear(&self, from: Coordinate, to: Coordinate) -> bool {
        geometry::ray_between(from, to).all(|cell| self.piece_at(cell).is_none())
    }

    /// Evaluates a move of whatever stands on `from`. Empty cells never move.
    pub fn evaluate(&self, from: Coordinate, to: Coordinate, mode: MoveMode) -> MoveOutcome {
        match self.piece_at(from) {
            Some(piece) => piece.evaluate(self, from, to, mode),
            None => MoveOutcome::Illegal,
        }
    }

    fn legal_outcome(&self, from: Coordinate, to: Coordinate) -> MoveOutcome {
        let outcome = self.evaluate(from, to, MoveMode::Move);
        if let MoveOutcome::Legal(effect) = outcome {
            if self.rules == Rules::Strict && self.exposes_king(from, to, effect) {
                return MoveOutcome::Illegal;
            }
        }

        outcome
    }

    pub fn can_move(&self, from: Coordinate, to: Coordinate) -> bool {
        self.legal_outcome(from, to).is_legal()
    }

    /// Whether the piece on `from` threatens `to`.
    pub fn can_attack(&self, from: Coordinate, to: Coordinate) -> bool {
        self.evaluate(from, to, MoveMode::Attack).is_legal()
    }

    pub fn legal_destinations(&self, from: Coordinate) -> Vec<Coordinate> {
        self.cells().filter(|&to| self.can_move(from, to)).collect()
    }

    /// Destinations to highlight for the current selection.
    pub fn selected_destinations(&self) -> Vec<Coordinate> {
        self.selected
            .map(|from| self.legal_destinations(from))
            .unwrap_or_default()
    }

    fn exposes_king(&self, from: Coordinate, to: Coordinate, effect: Effect) -> bool {
        let mover = match self.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };

        let mut probe = self.scratch();
        probe.relocate(from, to, effect);
        probe
            .king_square(mover.color)
            .map_or(false, |king| probe.is_attacked(king, mover.color.opponent()))
    }

    /// Whether the king on `from` would be attacked after stepping to `to`. The king is lifted
    /// off its square first so that it cannot shield the squares behind it.
    pub(crate) fn is_attacked_after_king_step(&self, from: Coordinate, to: Coordinate) -> bool {
        let king = match self.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };

        let mut probe = self.scratch();
        probe.set(from, None);
        probe.set(to, Some(king));
        probe.is_attacked(to, king.color.opponent())
    }
}

//
// Attack and check detection
//

impl Board {
    /// Cells holding pieces of color `by` that threaten `target`.
    pub fn attackers(&self, target: Coordinate, by: Color) -> Vec<Coordinate> {
        self.pieces()
            .filter(|&(from, piece)| {
                piece.color == by && piece.evaluate(self, from, target, MoveMode::Attack).is_legal()
            })
            .map(|(from, _)| from)
            .collect()
    }

    pub fn is_attacked(&self, target: Coordinate, by: Color) -> bool {
        self.pieces().any(|(from, piece)| {
            piece.color == by && piece.evaluate(self, from, target, MoveMode::Attack).is_legal()
        })
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.king_square(color)
            .map_or(false, |king| self.is_attacked(king, color.opponent()))
    }

    /// Whether the piece on `at` is threatened by the opposing side. For a king this also records
    /// the direction of every attacker other than a knight, so that the king cannot retreat along
    /// the ray it is being checked on.
    pub fn is_under_attack(&mut self, at: Coordinate) -> bool {
        let piece = match self.piece_at(at) {
            Some(piece) => piece,
            None => return false,
        };

        let attackers = self.attackers(at, piece.color.opponent());
        if piece.kind == PieceKind::King {
            for &attacker in &attackers {
                let is_knight = self
                    .piece_at(attacker)
                    .map_or(false, |p| p.kind == PieceKind::Knight);
                if is_knight {
                    continue;
                }

                if let Some(dir) = Direction::between(attacker, at) {
                    self.attack_directions.insert(DirectionSet::of(dir));
                }
            }
        }

        !attackers.is_empty()
    }

    /// Declares a winner when some king is in check and every square it could step to is
    /// attacked as well. Only the king's own mobility is considered: a check that another piece
    /// could block or capture still counts as lost.
    pub fn check_winner(&self) -> Option<Color> {
        self.pieces()
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .find(|&(at, king)| self.is_king_trapped(at, king))
            .map(|(_, king)| king.color.opponent())
    }

    fn is_king_trapped(&self, at: Coordinate, king: Piece) -> bool {
        let enemy = king.color.opponent();
        if !self.is_attacked(at, enemy) {
            return false;
        }

        let mut vacated = self.scratch();
        vacated.set(at, None);
        DIRECTIONS
            .iter()
            .filter_map(|&dir| at.towards(dir))
            .filter(|&to| king.evaluate(self, at, to, MoveMode::Attack).is_legal())
            .all(|to| {
                let mut probe = vacated.scratch();
                probe.set(to, Some(king));
                probe.is_attacked(to, enemy)
            })
    }

    fn has_legal_move(&self, color: Color) -> bool {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .any(|(from, _)| self.cells().any(|to| self.can_move(from, to)))
    }
}

//
// Moves and turn bookkeeping
//

impl Board {
    // Moves whatever stands on `from` with no legality checks.
    fn relocate(&mut self, from: Coordinate, to: Coordinate, effect: Effect) {
        let mut piece = match self.cells[from.y][from.x].take() {
            Some(piece) => piece,
            None => return,
        };

        if let Effect::EnPassant { captured } = effect {
            self.set(captured, None);
        }

        piece.mark_moved();
        self.set(to, Some(piece));
    }

    /// Moves the piece on `from` to `to` if that is legal, performing any en-passant capture and
    /// opening a promotion when a pawn reaches its last rank. The turn does not change here;
    /// `select_or_act` and `resolve_promotion` own the turn.
    pub fn move_piece(&mut self, from: Coordinate, to: Coordinate) -> bool {
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };

        let effect = match self.legal_outcome(from, to) {
            MoveOutcome::Legal(effect) => effect,
            MoveOutcome::Illegal => {
                debug!(
                    "{} {} cannot go {} -> {}",
                    piece.color,
                    piece.kind.name(),
                    self.name(from),
                    self.name(to)
                );
                return false;
            }
        };

        self.relocate(from, to, effect);
        self.en_passant_candidate = match effect {
            Effect::DoubleStep { skipped } => Some(skipped),
            _ => None,
        };

        if let Effect::EnPassant { captured } = effect {
            info!("en passant capture of {}", self.name(captured));
        }

        if piece.kind == PieceKind::Pawn && to.y == piece.color.promotion_rank(self.height) {
            info!("{} pawn promotes on {}", piece.color, self.name(to));
            self.pending_promotion = Some(PendingPromotion::new(to, piece.color));
        }

        true
    }

    /// The single entry point for a cell being picked.
    pub fn select_or_act(&mut self, cell: Coordinate) -> Action {
        if self.is_terminated() || self.pending_promotion.is_some() || !self.contains(cell) {
            trace!("ignoring selection of {}", cell);
            return Action::Ignored;
        }

        let from = match self.selected {
            Some(from) => from,
            None => {
                return match self.piece_at(cell) {
                    Some(piece) if piece.color == self.turn => {
                        self.selected = Some(cell);
                        Action::Selected(cell)
                    }
                    _ => Action::Ignored,
                };
            }
        };

        self.selected = None;
        if from == cell {
            return Action::Deselected;
        }

        if !self.move_piece(from, cell) {
            return Action::Rejected { from, to: cell };
        }

        let record = MoveRecord::new(from, cell, self.turn, self.height);
        info!("{} plays {}", self.turn, record);
        self.history.push(record);
        if let Some(pending) = self.pending_promotion {
            return Action::PromotionPending(pending.at());
        }

        self.end_turn();
        Action::Moved { from, to: cell }
    }

    /// Replaces a pawn waiting on its last rank and passes the turn. Does nothing when no
    /// promotion is pending or `kind` is not on offer.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> bool {
        let pending = match self.pending_promotion {
            Some(pending) => pending,
            None => {
                trace!("no promotion pending, ignoring {}", kind.name());
                return false;
            }
        };

        let piece = match pending.resolve(kind) {
            Some(piece) => piece,
            None => {
                debug!("{} is not a promotion choice", kind.name());
                return false;
            }
        };

        self.set(pending.at(), Some(piece));
        self.pending_promotion = None;
        info!(
            "{} pawn on {} becomes a {}",
            pending.color(),
            self.name(pending.at()),
            kind.name()
        );
        self.end_turn();
        true
    }

    pub fn apply(&mut self, input: Input) -> Action {
        match input {
            Input::Select { x, y } => self.select_or_act(Coordinate::new(x, y)),
            Input::Promote { kind } => {
                if self.resolve_promotion(kind) {
                    Action::Promoted(kind)
                } else {
                    Action::Ignored
                }
            }
        }
    }

    /// Applies inputs in order. The same inputs from the same configuration always produce the
    /// same board.
    pub fn replay<I>(&mut self, inputs: I) -> Vec<Action>
    where
        I: IntoIterator<Item = Input>,
    {
        inputs.into_iter().map(|input| self.apply(input)).collect()
    }

    fn end_turn(&mut self) {
        self.en_passant = self.en_passant_candidate.take();
        self.turn = self.turn.opponent();
        self.refresh_turn_state();
    }

    fn refresh_turn_state(&mut self) {
        self.attack_directions = DirectionSet::empty();
        let in_check = match self.king_square(self.turn) {
            Some(king) => self.is_under_attack(king),
            None => false,
        };

        if in_check {
            let rays: Vec<_> = self.attack_directions.directions().collect();
            debug!("{} is in check, rays {:?}", self.turn, rays);
        }

        self.outcome = match self.rules {
            Rules::KingMobility => self.check_winner().map(Outcome::Winner),
            Rules::Strict if self.has_legal_move(self.turn) => None,
            Rules::Strict if in_check => Some(Outcome::Winner(self.turn.opponent())),
            Rules::Strict => Some(Outcome::Stalemate),
        };

        if let Some(outcome) = self.outcome {
            info!("game over: {}", outcome);
        }
    }
}

//
// Trait implementations
//

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(piece) = self.piece_at(Coordinate::new(x, y)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", self.height - y)?;
        }

        for _ in 0..self.width {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for x in 0..self.width {
            write!(f, " {} ", (b'a' + x as u8) as char)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::from_start_position()
    }
}
