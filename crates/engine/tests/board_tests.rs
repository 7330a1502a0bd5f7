use engine::*;

fn mv(text: &str) -> Move {
    Move::from_uci(text).unwrap()
}

fn play(board: &mut Board, moves: &[&str]) {
    for &text in moves {
        board.try_make_move(mv(text)).unwrap_or_else(|err| panic!("{}: {}", text, err));
    }
}

#[test]
fn fen_round_trip() {
    for case in PERFT_POSITIONS {
        let board = Board::from_fen(case.fen).unwrap();
        assert_eq!(board.to_fen(), case.fen, "{}", case.name);
    }
    assert_eq!(Board::new().to_fen(), STARTING_FEN);
}

#[test]
fn fen_defaults_missing_clocks() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn fen_rejects_bad_input() {
    let bad = [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "8/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/4K3 w - z9 0 1",
    ];
    for fen in bad {
        assert!(
            matches!(Board::from_fen(fen), Err(EngineError::InvalidFen(_))),
            "accepted {:?}",
            fen
        );
    }
}

#[test]
fn double_push_sets_en_passant_target() {
    let mut board = Board::new();
    play(&mut board, &["e2e4"]);
    assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    play(&mut board, &["g8f6"]);
    assert_eq!(board.en_passant_target, None);
    assert_eq!(board.full_move_number, 2);
    assert_eq!(board.half_move_clock, 1);
}

fn assert_every_move_restores(fen: &str) {
    let mut board = Board::from_fen(fen).unwrap();
    let before = board.clone();
    for legal in board.get_all_legal_moves() {
        board.make_move(legal);
        board.undo_move().unwrap();
        assert_eq!(board, before, "{} did not undo cleanly", legal);
    }
}

#[test]
fn make_undo_restores_every_position() {
    for case in PERFT_POSITIONS {
        assert_every_move_restores(case.fen);
    }
}

#[test]
fn castling_moves_the_rook_and_back() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let before = board.clone();

    let record = board.try_make_move(mv("e1g1")).unwrap();
    assert!(record.is_castling);
    assert_eq!(board.get_piece(Square::from_algebraic("f1").unwrap()), make_piece(ROOK, WHITE));
    assert_eq!(board.get_piece(Square::from_algebraic("h1").unwrap()), EMPTY);
    assert_eq!(get_castling_rights_for_color(board.castling_rights, WHITE), 0);

    board.undo_move().unwrap();
    assert_eq!(board, before);
}

#[test]
fn castling_through_check_is_illegal() {
    // Black rook on f8 covers f1
    let board = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = board.get_all_legal_moves();
    assert!(!moves.contains(&mv("e1g1")));
    assert!(moves.contains(&mv("e1c1")));
}

#[test]
fn en_passant_capture_and_undo() {
    let mut board = Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let before = board.clone();

    let record = board.try_make_move(mv("e5f6")).unwrap();
    assert!(record.is_en_passant);
    assert_eq!(record.captured_piece, make_piece(PAWN, BLACK));
    assert_eq!(board.get_piece(Square::from_algebraic("f5").unwrap()), EMPTY);
    assert_eq!(board.get_piece(Square::from_algebraic("f6").unwrap()), make_piece(PAWN, WHITE));

    board.undo_move().unwrap();
    assert_eq!(board, before);
}

#[test]
fn promotion_choices_and_undo() {
    let mut board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let promotions: Vec<Move> = board
        .get_all_legal_moves()
        .into_iter()
        .filter(|m| m.from == Square::from_algebraic("a7").unwrap())
        .collect();
    assert_eq!(promotions.len(), 4);
    assert!(promotions.iter().all(|m| m.is_promotion()));

    let before = board.clone();
    board.try_make_move(mv("a7a8n")).unwrap();
    assert_eq!(board.get_piece(Square::from_algebraic("a8").unwrap()), make_piece(KNIGHT, WHITE));
    board.undo_move().unwrap();
    assert_eq!(board, before);
}

#[test]
fn undo_on_fresh_board_fails() {
    let mut board = Board::new();
    assert_eq!(board.undo_move(), Err(EngineError::NothingToUndo));
}

#[test]
fn fools_mate_is_checkmate() {
    let mut board = Board::new();
    play(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(board.game_status(), GameStatus::Checkmate(WHITE));
    assert!(board.is_game_over());
    assert_eq!(board.game_status().to_string(), "checkmate, Black wins");
    assert_eq!(board.try_make_move(mv("a2a3")), Err(EngineError::GameOver));
}

#[test]
fn stalemate() {
    let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(!board.is_in_check());
    assert_eq!(board.game_status(), GameStatus::Stalemate);
    assert!(board.is_game_over());
}

#[test]
fn check_is_not_terminal() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").unwrap();
    assert_eq!(board.game_status(), GameStatus::Check(BLACK));
    assert!(!board.is_game_over());
}

#[test]
fn insufficient_material() {
    let drawn = [
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/4KB2 w - - 0 1",
        "4k3/8/8/8/8/8/8/4KN2 w - - 0 1",
        // Both bishops on light squares
        "2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1",
    ];
    for fen in drawn {
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.game_status(), GameStatus::Draw(DrawReason::InsufficientMaterial), "{}", fen);
    }

    let playable = [
        "4k3/8/8/8/8/8/8/2b1KB2 w - - 0 1",
        "4k3/8/8/8/8/8/8/3NKN2 w - - 0 1",
        "4k3/8/8/8/8/8/P7/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/R3K3 w - - 0 1",
    ];
    for fen in playable {
        assert!(!Board::from_fen(fen).unwrap().is_insufficient_material(), "{}", fen);
    }
}

#[test]
fn seventy_five_move_rule() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 149 80").unwrap();
    assert!(!board.is_game_over());
    play(&mut board, &["a1a2"]);
    assert_eq!(board.game_status(), GameStatus::Draw(DrawReason::SeventyFiveMoves));
}

#[test]
fn fivefold_repetition() {
    let mut board = Board::new();
    let cycle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for _ in 0..3 {
        play(&mut board, &cycle);
    }
    play(&mut board, &cycle[..3]);
    assert_eq!(board.repetition_count(), 4);
    assert!(!board.is_game_over());

    play(&mut board, &cycle[3..]);
    assert_eq!(board.repetition_count(), 5);
    assert_eq!(board.game_status(), GameStatus::Draw(DrawReason::FivefoldRepetition));

    board.undo_move().unwrap();
    assert!(!board.is_game_over());
}

#[test]
fn uncapturable_en_passant_target_still_repeats() {
    let mut board = Board::new();
    play(&mut board, &["e2e4"]);
    assert_eq!(board.en_passant_target, Square::from_algebraic("e3"));

    let cycle = ["g8f6", "g1f3", "f6g8", "f3g1"];
    play(&mut board, &cycle);
    assert_eq!(board.en_passant_target, None);
    assert_eq!(board.repetition_count(), 2);
    play(&mut board, &cycle);
    assert_eq!(board.repetition_count(), 3);
}

#[test]
fn gives_check_detection() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    assert!(board.gives_check(mv("a1a8")));
    assert!(!board.gives_check(mv("a1a2")));

    // Discovered check from the rook behind the knight
    let board = Board::from_fen("4k3/8/8/8/8/8/4N3/4R1K1 w - - 0 1").unwrap();
    assert!(board.gives_check(mv("e2c3")));

    // The castled rook lands on f1 facing the king
    let board = Board::from_fen("5k2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(board.gives_check(mv("e1g1")));

    // Promoting to a knight checks, to a queen does not
    let board = Board::from_fen("8/4P3/5k2/8/8/8/8/K7 w - - 0 1").unwrap();
    assert!(!board.gives_check(mv("e7e8q")));
    assert!(board.gives_check(mv("e7e8n")));
}

#[test]
fn pinned_piece_cannot_move() {
    let board = Board::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    assert!(board.get_legal_moves(Square::from_algebraic("e2").unwrap()).is_empty());
}

#[test]
fn parse_move_checks_notation_and_legality() {
    let board = Board::new();
    assert_eq!(board.parse_move("e2e4"), Ok(mv("e2e4")));
    assert!(matches!(board.parse_move("e2"), Err(EngineError::InvalidNotation(_))));
    assert!(matches!(board.parse_move("e2e9"), Err(EngineError::InvalidNotation(_))));
    assert_eq!(board.parse_move("e2e5"), Err(EngineError::IllegalMove(mv("e2e5"))));
}

#[test]
fn mirrored_swaps_sides() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
    let mirrored = board.mirrored();
    assert_eq!(mirrored.current_turn, BLACK);
    assert!(has_castling_right(mirrored.castling_rights, BLACK_KINGSIDE));
    assert!(has_castling_right(mirrored.castling_rights, WHITE_QUEENSIDE));
    assert_eq!(mirrored.mirrored().to_fen(), board.to_fen());
}

#[test]
fn bitboards_track_the_mailbox() {
    let mut board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    play(&mut board, &["e1g1", "b4c3", "d5e6", "e8c8", "e6f7"]);
    assert_eq!(BitboardManager::from_squares(&board.squares), board.bitboards);
    for _ in 0..5 {
        board.undo_move().unwrap();
        assert_eq!(BitboardManager::from_squares(&board.squares), board.bitboards);
    }
}
