//! Piece bag tests

use blockfall::core::PieceBag;
use blockfall::types::PieceKind;
use proptest::prelude::*;

fn sorted(window: &[PieceKind]) -> Vec<PieceKind> {
    let mut v = window.to_vec();
    v.sort();
    v
}

#[test]
fn test_first_seven_draws_cover_every_kind() {
    let mut bag = PieceBag::new(2024, 2);
    let first: Vec<_> = (0..7).map(|_| bag.next_kind()).collect();
    assert_eq!(sorted(&first), PieceKind::ALL.to_vec());
}

#[test]
fn test_different_seeds_differ() {
    let mut a = PieceBag::new(1, 2);
    let mut b = PieceBag::new(2, 2);
    let sa: Vec<_> = (0..28).map(|_| a.next_kind()).collect();
    let sb: Vec<_> = (0..28).map(|_| b.next_kind()).collect();
    assert_ne!(sa, sb);
}

proptest! {
    #[test]
    fn aligned_windows_are_permutations(
        seed in any::<u64>(),
        lookahead in 0usize..16,
        bags in 1usize..12,
    ) {
        let mut bag = PieceBag::new(seed, lookahead);
        let drawn: Vec<_> = (0..bags * 7).map(|_| bag.next_kind()).collect();
        for window in drawn.chunks(7) {
            prop_assert_eq!(sorted(window), PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn preview_always_available_and_accurate(
        seed in any::<u64>(),
        lookahead in 1usize..16,
        draws in 0usize..40,
    ) {
        let mut bag = PieceBag::new(seed, lookahead);
        for _ in 0..draws {
            bag.next_kind();
        }
        let preview = bag.peek(lookahead);
        prop_assert_eq!(preview.len(), lookahead);
        for expected in preview {
            prop_assert_eq!(bag.next_kind(), expected);
        }
    }
}
