// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use hotseat::history::{parse_cell, HISTORY_ROWS};
use hotseat::{Action, Board, BoardConfig, Color, Coordinate, Input, PieceKind};

fn sq(name: &str) -> Coordinate {
    parse_cell(name, 8, 8).unwrap()
}

fn play(board: &mut Board, from: &str, to: &str) {
    assert_eq!(Action::Selected(sq(from)), board.select_or_act(sq(from)));
    assert_eq!(
        Action::Moved {
            from: sq(from),
            to: sq(to)
        },
        board.select_or_act(sq(to))
    );
}

fn black_to_move(placement: &str) -> Board {
    let config = BoardConfig {
        first_to_move: Color::Black,
        ..BoardConfig::with_placement(placement).unwrap()
    };
    Board::new(&config).unwrap()
}

//
// Selection
//

#[test]
fn only_the_side_to_move_selects() {
    let mut board = Board::from_start_position();
    assert_eq!(Action::Ignored, board.select_or_act(sq("e7")));
    assert_eq!(Action::Ignored, board.select_or_act(sq("e4")));
    assert!(board.selected().is_none());
    assert_eq!(Action::Selected(sq("e2")), board.select_or_act(sq("e2")));
    assert_eq!(Some(sq("e2")), board.selected());
}

#[test]
fn same_cell_deselects() {
    let mut board = Board::from_start_position();
    board.select_or_act(sq("g1"));
    assert_eq!(Action::Deselected, board.select_or_act(sq("g1")));
    assert!(board.selected().is_none());
    assert_eq!(Color::White, board.turn());
}

#[test]
fn rejected_move_keeps_turn() {
    let mut board = Board::from_start_position();
    board.select_or_act(sq("e2"));
    assert_eq!(
        Action::Rejected {
            from: sq("e2"),
            to: sq("e5")
        },
        board.select_or_act(sq("e5"))
    );
    assert!(board.selected().is_none());
    assert_eq!(Color::White, board.turn());
    assert!(board.history().is_empty());

    // picking another friendly piece is a failed move too
    board.select_or_act(sq("e2"));
    assert_eq!(
        Action::Rejected {
            from: sq("e2"),
            to: sq("d2")
        },
        board.select_or_act(sq("d2"))
    );
    assert!(board.selected().is_none());
}

#[test]
fn off_board_selection_is_ignored() {
    let mut board = Board::from_start_position();
    assert_eq!(Action::Ignored, board.select_or_act(Coordinate::new(8, 8)));
    assert_eq!(Action::Ignored, board.apply(Input::Select { x: 20, y: 0 }));
}

#[test]
fn turns_alternate() {
    let mut board = Board::from_start_position();
    play(&mut board, "e2", "e4");
    assert_eq!(Color::Black, board.turn());
    play(&mut board, "e7", "e5");
    assert_eq!(Color::White, board.turn());
    play(&mut board, "g1", "f3");
    assert_eq!(Color::Black, board.turn());
    assert!(board.piece_at(sq("f3")).unwrap().has_moved());
    assert!(!board.piece_at(sq("b1")).unwrap().has_moved());
}

#[test]
fn highlighted_destinations() {
    let mut board = Board::from_start_position();
    assert!(board.selected_destinations().is_empty());
    board.select_or_act(sq("g1"));
    assert_eq!(vec![sq("f3"), sq("h3")], board.selected_destinations());
}

//
// En passant
//

#[test]
fn double_step_records_skipped_square() {
    let mut board = Board::from_start_position();
    play(&mut board, "e2", "e4");
    assert_eq!(Some(sq("e3")), board.en_passant_target());
    play(&mut board, "g8", "f6");
    assert_eq!(None, board.en_passant_target());
}

#[test]
fn stale_target_is_replaced() {
    let mut board = Board::from_start_position();
    play(&mut board, "e2", "e4");
    play(&mut board, "d7", "d5");
    assert_eq!(Some(sq("d6")), board.en_passant_target());

    // e4xd5 is an ordinary capture, the stale e3 target plays no part in it
    play(&mut board, "e4", "d5");
    assert_eq!(None, board.en_passant_target());
    let pawn = board.piece_at(sq("d5")).unwrap();
    assert_eq!(Color::White, pawn.color);
    assert_eq!(31, board.pieces().count());
}

#[test]
fn white_captures_en_passant() {
    let mut board = black_to_move("4k3/3p4/8/4P3/8/8/8/4K3");
    play(&mut board, "d7", "d5");
    assert_eq!(Some(sq("d6")), board.en_passant_target());
    assert!(board.can_move(sq("e5"), sq("d6")));
    play(&mut board, "e5", "d6");
    assert!(board.piece_at(sq("d5")).is_none());
    assert_eq!(Some(Color::White), board.piece_at(sq("d6")).map(|p| p.color));
    assert_eq!(3, board.pieces().count());
}

#[test]
fn black_captures_en_passant() {
    let mut board = Board::from_placement("4k3/8/8/8/3p4/8/4P3/4K3").unwrap();
    play(&mut board, "e2", "e4");
    play(&mut board, "d4", "e3");
    assert!(board.piece_at(sq("e4")).is_none());
    assert_eq!(Some(PieceKind::Pawn), board.piece_at(sq("e3")).map(|p| p.kind));
}

#[test]
fn en_passant_only_immediately() {
    let mut board = black_to_move("4k3/3p4/8/4P3/8/8/8/4K3");
    play(&mut board, "d7", "d5");
    play(&mut board, "e1", "f1");
    play(&mut board, "e8", "f8");
    assert_eq!(None, board.en_passant_target());
    assert!(!board.can_move(sq("e5"), sq("d6")));
    board.select_or_act(sq("e5"));
    assert_eq!(
        Action::Rejected {
            from: sq("e5"),
            to: sq("d6")
        },
        board.select_or_act(sq("d6"))
    );
    assert!(board.piece_at(sq("d5")).is_some());
}

//
// Promotion
//

#[test]
fn promotion_holds_the_turn() {
    let mut board = Board::from_placement("k7/4P3/8/8/8/8/8/K7").unwrap();
    board.select_or_act(sq("e7"));
    assert_eq!(
        Action::PromotionPending(sq("e8")),
        board.select_or_act(sq("e8"))
    );

    let pending = board.pending_promotion().unwrap();
    assert_eq!(sq("e8"), pending.at());
    assert_eq!(Color::White, pending.color());
    assert_eq!(Color::White, board.turn());
    assert_eq!(1, board.history().len());

    // the board waits for the choice
    assert_eq!(Action::Ignored, board.select_or_act(sq("a1")));
    assert!(!board.resolve_promotion(PieceKind::King));
    assert!(board.pending_promotion().is_some());

    assert!(board.resolve_promotion(PieceKind::Queen));
    assert!(board.pending_promotion().is_none());
    assert_eq!(Color::Black, board.turn());
    let queen = board.piece_at(sq("e8")).unwrap();
    assert_eq!(PieceKind::Queen, queen.kind);
    assert_eq!(Color::White, queen.color);
    assert!(queen.has_moved());
    assert!(!board.resolve_promotion(PieceKind::Queen));
}

#[test]
fn black_promotes_downward() {
    let mut board = black_to_move("k7/8/8/8/8/8/3p4/7K");
    board.select_or_act(sq("d2"));
    assert_eq!(
        Action::PromotionPending(sq("d1")),
        board.select_or_act(sq("d1"))
    );
    assert_eq!(
        Action::Promoted(PieceKind::Knight),
        board.apply(Input::promote(PieceKind::Knight))
    );
    assert_eq!(Color::White, board.turn());
    assert_eq!(
        Some(PieceKind::Knight),
        board.piece_at(sq("d1")).map(|p| p.kind)
    );
}

#[test]
fn pawn_may_stay_a_pawn() {
    let mut board = Board::from_placement("k7/4P3/8/8/8/8/8/K7").unwrap();
    board.select_or_act(sq("e7"));
    board.select_or_act(sq("e8"));
    assert!(board.resolve_promotion(PieceKind::Pawn));
    assert_eq!(Some(PieceKind::Pawn), board.piece_at(sq("e8")).map(|p| p.kind));
    assert_eq!(Color::Black, board.turn());
}

#[test]
fn promotion_without_pawn_is_ignored() {
    let mut board = Board::from_start_position();
    assert!(!board.resolve_promotion(PieceKind::Queen));
    assert_eq!(Action::Ignored, board.apply(Input::promote(PieceKind::Queen)));
    assert_eq!(Color::White, board.turn());
}

//
// History
//

#[test]
fn history_text_and_rows() {
    let mut board = Board::from_start_position();
    play(&mut board, "e2", "e4");
    play(&mut board, "e7", "e5");
    play(&mut board, "g1", "f3");

    let texts: Vec<_> = board.history().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(vec!["E2 -> E4", "E7 -> E5", "G1 -> F3"], texts);
    assert_eq!(Color::Black, board.history()[1].color);

    let rows = board.history_rows(HISTORY_ROWS);
    assert_eq!(2, rows.len());
    assert_eq!(2, rows[1].number);
    assert_eq!("G1 -> F3", rows[1].first.text);
    assert!(rows[1].second.is_none());
}

#[test]
fn rejected_moves_are_not_recorded() {
    let mut board = Board::from_start_position();
    board.select_or_act(sq("e2"));
    board.select_or_act(sq("e6"));
    assert!(board.history().is_empty());
}
