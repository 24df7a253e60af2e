//! Board tests

use blockfall::core::Board;
use blockfall::types::PieceKind;

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.rows(), 20);
    assert_eq!(board.cols(), 10);

    for x in 0..20 {
        for y in 0..10 {
            assert!(board.is_free(x, y), "cell ({x}, {y}) should be free");
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(20, 0), None);
    assert_eq!(board.get(0, 10), None);

    // Out of bounds is neither free nor occupied
    assert!(!board.is_free(20, 0));
    assert!(!board.is_occupied(20, 0));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(10, 5, Some(PieceKind::T)));
    assert_eq!(board.get(10, 5), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(10, 5));

    assert!(board.set(10, 5, None));
    assert_eq!(board.get(10, 5), Some(None));
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::default();

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, -1, Some(PieceKind::T)));
    assert!(!board.set(20, 0, Some(PieceKind::T)));
    assert!(!board.set(0, 10, Some(PieceKind::T)));
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_non_square_board() {
    let mut board = Board::new(6, 12);
    assert_eq!((board.rows(), board.cols()), (6, 12));
    assert!(board.in_bounds(5, 11));
    assert!(!board.in_bounds(6, 0));
    assert!(board.set(5, 11, Some(PieceKind::L)));
    assert_eq!(board.cells().len(), 72);
}

#[test]
fn test_clear_without_full_rows_is_noop() {
    let mut board = Board::from_ascii(&[
        "......", //
        "..T...", //
        "SS.ZZZ", //
        "IIII.I", //
    ])
    .unwrap();
    let before = board.clone();

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_single_bottom_row() {
    let mut board = Board::default();
    for y in 0..10 {
        board.set(19, y, Some(PieceKind::I));
    }
    board.set(18, 2, Some(PieceKind::O));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(board.get(19, 2), Some(Some(PieceKind::O)));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::default();
    for x in 16..20 {
        for y in 0..10 {
            board.set(x, y, Some(PieceKind::I));
        }
    }
    board.set(15, 0, Some(PieceKind::J));

    assert_eq!(board.clear_full_rows().len(), 4);
    assert_eq!(board.get(19, 0), Some(Some(PieceKind::J)));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_clear_separated_rows() {
    let mut board = Board::from_ascii(&[
        "J...", //
        "LLLL", //
        ".S..", //
        "ZZZZ", //
        "..O.", //
    ])
    .unwrap();

    assert_eq!(board.clear_full_rows().as_slice(), &[1, 3]);
    assert_eq!(
        board,
        Board::from_ascii(&["....", "....", "J...", ".S..", "..O."]).unwrap()
    );
}

#[test]
fn test_snapshot_rows() {
    let board = Board::from_ascii(&["T.", ".I"]).unwrap();
    assert_eq!(
        board.to_rows(),
        vec![vec![Some(PieceKind::T), None], vec![None, Some(PieceKind::I)]]
    );
    assert!(!board.is_row_full(0));
    assert!(board.row(2).is_none());
}
