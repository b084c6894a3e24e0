use rookery::search::MATE_SCORE;
use rookery::{Board, ChessError, Color, Game, Move, PieceType, Search, Square, best_move};

fn setup(pieces: &[(PieceType, Color, Square)]) -> Board {
    let mut board = Board::empty();
    for &(kind, color, sq) in pieces {
        board.place_piece(kind, color, sq).unwrap();
    }
    board
}

#[test]
fn same_input_same_move() {
    let mut game = Game::new();
    for m in ["e2e4", "d7d5"] {
        let m: Move = m.parse().unwrap();
        game.play(m.from(), m.to()).unwrap();
    }
    let first = best_move(game.board(), Color::White, 2).unwrap();
    for _ in 0..3 {
        assert_eq!(best_move(game.board(), Color::White, 2).unwrap(), first);
    }
    assert!(first.is_some());
}

#[test]
fn depth_changes_the_amount_of_work() {
    let board = Board::startpos();
    let shallow = Search::new(&board, Color::White, 1).unwrap().run().unwrap();
    let deeper = Search::new(&board, Color::White, 2).unwrap().run().unwrap();
    assert_eq!(shallow.nodes, 20);
    assert_eq!(deeper.nodes, 20 + 400);
    assert_eq!(shallow.score, 0);
    assert_eq!(deeper.score, 0);
}

#[test]
fn black_finds_mate() {
    let board = setup(&[
        (PieceType::King, Color::White, Square::H1),
        (PieceType::Pawn, Color::White, Square::G2),
        (PieceType::Pawn, Color::White, Square::H2),
        (PieceType::Pawn, Color::White, Square::F2),
        (PieceType::Rook, Color::Black, Square::D8),
        (PieceType::King, Color::Black, Square::G8),
    ]);
    let result = Search::new(&board, Color::Black, 2).unwrap().run().unwrap();
    assert_eq!(result.best, Some(Move::new(Square::D8, Square::D1)));
    assert_eq!(result.score, MATE_SCORE - 1);
}

#[test]
fn game_asks_for_the_side_to_move() {
    let mut board = setup(&[
        (PieceType::King, Color::White, Square::A1),
        (PieceType::Bishop, Color::White, Square::C4),
        (PieceType::Rook, Color::Black, Square::F7),
        (PieceType::King, Color::Black, Square::H8),
    ]);
    board.set_side_to_move(Color::White);
    let game = Game::from_board(board);
    assert_eq!(game.best_move(1), Ok(Some(Move::new(Square::C4, Square::F7))));
    assert_eq!(game.best_move(0), Err(ChessError::InvalidDepth(0)));
}
