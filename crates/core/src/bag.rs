//! Bag module - 7-bag piece generation with lookahead
//!
//! Pieces come out of a queue that is topped up with a freshly shuffled
//! permutation of all seven kinds whenever it runs short. Every aligned run
//! of seven draws is therefore a permutation of all kinds, and at least
//! `lookahead` upcoming kinds can always be previewed.
//!
//! Shuffling uses `rand`'s Fisher-Yates on a seeded `StdRng`, so a seed
//! fully determines the sequence (handy for tests and replays of a seed).

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Upcoming kinds, front is drawn next
    queue: VecDeque<PieceKind>,
    /// Number of kinds that must stay previewable after a draw
    lookahead: usize,
    /// RNG for shuffling; owned so no two bags share state
    rng: StdRng,
}

impl PieceBag {
    /// Create a bag with the given seed and preview depth
    pub fn new(seed: u64, lookahead: usize) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(lookahead.saturating_add(8).min(64)),
            lookahead,
            rng: StdRng::seed_from_u64(seed),
        };
        while bag.queue.len() <= bag.lookahead {
            bag.refill();
        }
        bag
    }

    /// Append one shuffled permutation of every kind.
    fn refill(&mut self) {
        let mut fresh = PieceKind::ALL;
        fresh.shuffle(&mut self.rng);
        self.queue.extend(fresh);
    }

    /// Draw the next kind.
    ///
    /// The queue is refilled before it would drop below `lookahead` entries.
    pub fn next_kind(&mut self) -> PieceKind {
        loop {
            if self.queue.len() > self.lookahead {
                if let Some(kind) = self.queue.pop_front() {
                    return kind;
                }
            }
            self.refill();
        }
    }

    /// Look at the next `n` kinds without consuming them.
    ///
    /// At least `lookahead` kinds are always available; asking for more
    /// returns whatever is already queued.
    pub fn peek(&self, n: usize) -> Vec<PieceKind> {
        self.queue.iter().take(n).copied().collect()
    }

    /// Number of kinds currently queued.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1, crate::types::DEFAULT_LOOKAHEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(window: &[PieceKind]) -> bool {
        let mut sorted = window.to_vec();
        sorted.sort();
        sorted == PieceKind::ALL
    }

    #[test]
    fn test_bag_deterministic() {
        let mut a = PieceBag::new(12345, 2);
        let mut b = PieceBag::new(12345, 2);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_bag_initial_preview() {
        let bag = PieceBag::new(1, 2);

        // First refill happens at construction
        assert_eq!(bag.queued(), 7);
        assert_eq!(bag.peek(2).len(), 2);
    }

    #[test]
    fn test_bag_aligned_windows_are_permutations() {
        let mut bag = PieceBag::new(99, 2);
        let drawn: Vec<_> = (0..7 * 20).map(|_| bag.next_kind()).collect();

        for window in drawn.chunks(7) {
            assert!(is_permutation(window), "{window:?}");
        }
    }

    #[test]
    fn test_bag_peek_matches_draws() {
        let mut bag = PieceBag::new(7, 2);

        for _ in 0..30 {
            let preview = bag.peek(2);
            assert_eq!(preview.len(), 2);
            assert_eq!(bag.next_kind(), preview[0]);
            assert_eq!(bag.peek(1)[0], preview[1]);
        }
    }

    #[test]
    fn test_bag_deep_lookahead_keeps_queue_full() {
        let mut bag = PieceBag::new(3, 9);

        for _ in 0..50 {
            bag.next_kind();
            assert!(bag.queued() >= 9);
            assert_eq!(bag.peek(9).len(), 9);
        }
    }

    #[test]
    fn test_bag_deep_lookahead_stays_fair() {
        let mut bag = PieceBag::new(11, 12);
        let drawn: Vec<_> = (0..7 * 10).map(|_| bag.next_kind()).collect();

        for window in drawn.chunks(7) {
            assert!(is_permutation(window));
        }
    }

    #[test]
    fn test_bag_draw_after_construction_keeps_preview() {
        let mut bag = PieceBag::new(5, 6);
        assert_eq!(bag.queued(), 7);

        // The second draw already needs the next permutation
        for _ in 0..7 {
            bag.next_kind();
            assert!(bag.queued() >= 6);
        }
    }
}
