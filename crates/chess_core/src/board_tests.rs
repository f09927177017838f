use super::*;

fn sq(s: &str) -> Square {
    Square::from_coord(s).unwrap()
}

fn label_at(state: &GameState, s: &str) -> String {
    let (_, rec) = state.piece_at(sq(s)).expect("square should be occupied");
    rec.label()
}

#[test]
fn test_startpos_layout() {
    let state = GameState::startpos();
    assert_eq!(state.registry().len(), 32);
    assert_eq!(state.side_to_move(), Color::White);
    assert!(state.history().is_empty());

    assert_eq!(label_at(&state, "a2"), "WP1");
    assert_eq!(label_at(&state, "h2"), "WP8");
    assert_eq!(label_at(&state, "a7"), "BP1");
    assert_eq!(label_at(&state, "a1"), "WR1");
    assert_eq!(label_at(&state, "h1"), "WR2");
    assert_eq!(label_at(&state, "b1"), "WN1");
    assert_eq!(label_at(&state, "f8"), "BB2");
    assert_eq!(label_at(&state, "d1"), "WQ");
    assert_eq!(label_at(&state, "e1"), "WK");
    assert_eq!(label_at(&state, "d8"), "BQ");
    assert_eq!(label_at(&state, "e8"), "BK");
    for s in ["e3", "e4", "e5", "e6"] {
        assert!(state.piece_at(sq(s)).is_none());
    }

    state.check_consistency().unwrap();
}

#[test]
fn test_find_is_case_insensitive() {
    let state = GameState::startpos();
    let id = state.registry().find("wp5").unwrap();
    assert_eq!(state.registry()[id].square, sq("e2"));
    assert_eq!(state.registry().find(" BK "), state.registry().king(Color::Black).map(|(id, _)| id));
    assert!(state.registry().find("WP9").is_none());
    assert!(state.registry().find("").is_none());
}

#[test]
fn test_kings_resolved_by_color() {
    let state = GameState::startpos();
    let (_, wk) = state.registry().king(Color::White).unwrap();
    let (_, bk) = state.registry().king(Color::Black).unwrap();
    assert_eq!(wk.square, sq("e1"));
    assert_eq!(bk.square, sq("e8"));
}

#[test]
fn test_apply_and_undo_quiet_move() {
    let mut state = GameState::startpos();
    let before = state.clone();
    let id = state.registry().find("WN2").unwrap();

    let mv = state.apply(id, sq("f3")).unwrap();
    assert_eq!(mv.from, sq("g1"));
    assert_eq!(mv.to, sq("f3"));
    assert!(mv.captured.is_none());
    assert_eq!(state.board().get(sq("f3")), Some(id));
    assert_eq!(state.board().get(sq("g1")), None);
    assert_eq!(state.registry()[id].square, sq("f3"));
    assert_eq!(state.side_to_move(), Color::Black);
    assert_eq!(state.history().len(), 1);
    state.check_consistency().unwrap();

    let undone = state.undo().unwrap();
    assert_eq!(undone, mv);
    assert_eq!(state, before);
}

#[test]
fn test_capture_marks_victim_not_live_and_undo_restores_it() {
    let mut state = GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
    let before = state.clone();
    let pawn = state.registry().find("WP1").unwrap();
    let victim = state.registry().find("BP1").unwrap();

    let mv = state.apply(pawn, sq("d5")).unwrap();
    let cap = mv.captured.unwrap();
    assert_eq!(cap.piece, victim);
    assert_eq!(cap.square, sq("d5"));
    assert!(cap.was_alive);

    // The record survives but is no longer live.
    let rec = state.registry()[victim];
    assert!(!rec.alive);
    assert_eq!(state.registry().len(), before.registry().len());
    assert_eq!(state.board().get(sq("d5")), Some(pawn));
    assert_eq!(state.registry().live(Color::Black).count(), 1);
    state.check_consistency().unwrap();

    state.undo().unwrap();
    assert_eq!(state, before);
    assert!(state.registry()[victim].alive);
}

#[test]
fn test_undo_with_empty_history() {
    let mut state = GameState::startpos();
    assert_eq!(state.undo(), Err(StateError::HistoryUnderflow));
}

#[test]
fn test_undo_is_lifo() {
    let mut state = GameState::startpos();
    let start = state.clone();
    let e = state.registry().find("WP5").unwrap();
    state.apply(e, sq("e4")).unwrap();
    let after_first = state.clone();
    let d = state.registry().find("BP4").unwrap();
    state.apply(d, sq("d5")).unwrap();

    assert_eq!(state.undo().unwrap().piece, d);
    assert_eq!(state, after_first);
    assert_eq!(state.undo().unwrap().piece, e);
    assert_eq!(state, start);
}

#[test]
fn test_apply_rejects_captured_piece() {
    let mut state = GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
    let pawn = state.registry().find("WP1").unwrap();
    let victim = state.registry().find("BP1").unwrap();
    state.apply(pawn, sq("d5")).unwrap();

    let err = state.apply(victim, sq("d4")).unwrap_err();
    assert!(matches!(err, StateError::InconsistentState(_)));
}

#[test]
fn test_apply_rejects_friendly_capture() {
    let mut state = GameState::startpos();
    let rook = state.registry().find("WR1").unwrap();
    let before = state.clone();
    assert!(state.apply(rook, sq("a2")).is_err());
    assert_eq!(state, before);
}

#[test]
fn test_consistency_detects_stray_id() {
    let mut state = GameState::startpos();
    let id = state.board.get(sq("e2"));
    state.board.set(sq("e4"), id);
    assert!(matches!(
        state.check_consistency(),
        Err(StateError::InconsistentState(_))
    ));
}

#[test]
fn test_consistency_detects_stale_live_record() {
    let mut state = GameState::startpos();
    state.board.set(sq("d7"), None);
    assert!(matches!(
        state.check_consistency(),
        Err(StateError::InconsistentState(_))
    ));
}

#[test]
fn test_fen_labels_follow_file_order() {
    let state = GameState::from_fen("3qk3/8/8/8/8/8/8/Q2QK2R w - - 0 1").unwrap();
    assert_eq!(label_at(&state, "a1"), "WQ1");
    assert_eq!(label_at(&state, "d1"), "WQ2");
    assert_eq!(label_at(&state, "h1"), "WR1");
    assert_eq!(label_at(&state, "e1"), "WK");
    assert_eq!(label_at(&state, "d8"), "BQ");
    assert_eq!(state.side_to_move(), Color::White);
}

#[test]
fn test_fen_startpos_matches_startpos() {
    let parsed =
        GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let start = GameState::startpos();
    for s in Square::all() {
        let a = parsed.piece_at(s).map(|(_, r)| r.label());
        let b = start.piece_at(s).map(|(_, r)| r.label());
        assert_eq!(a, b, "mismatch on {s}");
    }
}

#[test]
fn test_fen_errors() {
    assert!(matches!(
        GameState::from_fen("8/8/8/8/8/8/8/8"),
        Err(SetupError::InvalidFen(_))
    ));
    assert!(matches!(
        GameState::from_fen("4k3/8/8/8/8/8/8 w"),
        Err(SetupError::InvalidFen(_))
    ));
    assert!(matches!(
        GameState::from_fen("4k3/8/8/8/8/8/8/4X3 w"),
        Err(SetupError::InvalidFen(_))
    ));
    assert!(matches!(
        GameState::from_fen("4k3/8/8/8/8/8/8/4K4 w"),
        Err(SetupError::InvalidFen(_))
    ));
    assert!(matches!(
        GameState::from_fen("4k3/8/8/8/8/8/8/4K3 x"),
        Err(SetupError::InvalidFen(_))
    ));
    assert_eq!(
        GameState::from_fen("4k3/8/8/8/8/8/8/8 w"),
        Err(SetupError::KingCount {
            color: Color::White,
            count: 0
        })
    );
    assert_eq!(
        GameState::from_fen("4k2k/8/8/8/8/8/8/4K3 b"),
        Err(SetupError::KingCount {
            color: Color::Black,
            count: 2
        })
    );
}

#[test]
fn test_from_pieces_rejects_duplicate_square() {
    let pieces = [
        (Color::White, PieceKind::King, sq("e1")),
        (Color::Black, PieceKind::King, sq("e8")),
        (Color::White, PieceKind::Rook, sq("a1")),
        (Color::Black, PieceKind::Rook, sq("a1")),
    ];
    assert_eq!(
        GameState::from_pieces(Color::White, &pieces),
        Err(SetupError::DuplicateSquare(sq("a1")))
    );
}

#[test]
fn test_setup_rejects_check_on_side_not_to_move() {
    // White to move with the black king already attacked on e8.
    assert_eq!(
        GameState::from_fen("4k3/8/8/8/8/8/4Q3/4K3 w - - 0 1"),
        Err(SetupError::OpponentInCheck(Color::Black))
    );
    assert_eq!(
        GameState::from_fen("4k3/8/8/8/8/8/8/r3K3 b - - 0 1"),
        Err(SetupError::OpponentInCheck(Color::White))
    );
    // The same placements are fine for the side in check to move.
    assert!(GameState::from_fen("4k3/8/8/8/8/8/4Q3/4K3 b - - 0 1").is_ok());
    assert!(GameState::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").is_ok());
}

#[test]
fn test_setup_rejects_adjacent_kings() {
    assert_eq!(
        GameState::from_fen("8/8/8/3k4/3K4/8/8/8 w - - 0 1"),
        Err(SetupError::AdjacentKings(sq("d4"), sq("d5")))
    );
    assert_eq!(
        GameState::from_fen("8/8/8/8/8/8/1k6/K7 b - - 0 1"),
        Err(SetupError::AdjacentKings(sq("a1"), sq("b2")))
    );
    assert!(GameState::from_fen("8/8/8/3k4/8/3K4/8/8 w - - 0 1").is_ok());
}

#[test]
fn test_apply_refuses_king_capture() {
    let pieces = [
        (Color::White, PieceKind::King, sq("e1")),
        (Color::White, PieceKind::Queen, sq("a2")),
        (Color::Black, PieceKind::King, sq("e8")),
    ];
    let mut state = GameState::from_pieces(Color::Black, &pieces).unwrap();
    let king = state.registry().find("BK").unwrap();
    let queen = state.registry().find("WQ").unwrap();

    // apply does not check movement rules, so the king can step onto the
    // queen's diagonal. Taking it is still refused.
    state.apply(king, sq("e6")).unwrap();
    let before = state.clone();
    assert!(matches!(
        state.apply(queen, sq("e6")),
        Err(StateError::InconsistentState(_))
    ));
    assert_eq!(state, before);
    assert!(state.registry()[king].alive);
    assert_eq!(state.board().get(sq("e6")), Some(king));
}

#[test]
fn test_square_coords() {
    assert_eq!(sq("a1"), Square::new(0, 0).unwrap());
    assert_eq!(sq("H8"), Square::new(7, 7).unwrap());
    assert_eq!(sq("e4").to_string(), "e4");
    assert_eq!(sq("e2").flip(), sq("e7"));
    assert_eq!(sq("a1").distance(sq("b2")), 1);
    assert_eq!(sq("a1").distance(sq("h3")), 7);
    assert!(Square::from_coord("i1").is_none());
    assert!(Square::from_coord("a9").is_none());
    assert!(Square::from_coord("a10").is_none());
    assert!(Square::new(8, 0).is_none());
    assert!(sq("a1").offset(-1, 0).is_none());
    assert_eq!(sq("a1").offset(1, 2), Some(sq("c2")));
    assert_eq!(Square::all().count(), 64);
}
