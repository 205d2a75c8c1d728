//! 7-bag randomizer for piece generation
//!
//! All 7 shapes are shuffled, then dealt out before reshuffling. This
//! prevents long droughts. The queue is topped up so that a preview of
//! `preview_length` shapes is always available after a pop.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::piece::Piece;
use crate::tetromino::TetrominoType;

/// Default number of upcoming shapes shown
pub const PREVIEW_LENGTH: usize = 5;

/// Upcoming pieces, fed by the 7-bag randomizer
#[derive(Debug, Clone)]
pub struct PieceQueue {
    queue: Vec<TetrominoType>,
    rng: ChaCha8Rng,
    preview_length: usize,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(PREVIEW_LENGTH, None)
    }
}

impl PieceQueue {
    /// Create an empty queue; it fills itself on the first pop
    ///
    /// With a seed the sequence is reproducible, otherwise the RNG is seeded
    /// from OS entropy.
    pub fn new(preview_length: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            queue: Vec::with_capacity(preview_length + 2 * TetrominoType::all().len()),
            rng,
            preview_length,
        }
    }

    /// Take the next piece, at its spawn pose
    pub fn pop(&mut self) -> Piece {
        while self.queue.len() <= self.preview_length {
            self.refill();
        }
        Piece::new(self.queue.remove(0))
    }

    /// Look at up to `count` upcoming shapes without removing them
    ///
    /// Never refills, so the result may be shorter than `count`.
    pub fn peek(&self, count: usize) -> &[TetrominoType] {
        &self.queue[..count.min(self.queue.len())]
    }

    pub fn preview_length(&self) -> usize {
        self.preview_length
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Append a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = TetrominoType::all();
        new_bag.shuffle(&mut self.rng);
        debug!(bag = ?new_bag, "refilled piece queue");
        self.queue.extend(new_bag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut queue = PieceQueue::new(PREVIEW_LENGTH, Some(7));

        let unique: HashSet<_> = (0..7).map(|_| queue.pop().kind()).collect();
        assert_eq!(unique.len(), 7);

        // Second bag as well
        let unique: HashSet<_> = (0..7).map(|_| queue.pop().kind()).collect();
        assert_eq!(unique.len(), 7);
    }

    #[test]
    fn test_new_queue_is_empty() {
        let queue = PieceQueue::new(3, Some(1));
        assert!(queue.is_empty());
        assert!(queue.peek(3).is_empty());
    }

    #[test]
    fn test_preview_after_pop() {
        let mut queue = PieceQueue::new(PREVIEW_LENGTH, Some(42));
        for _ in 0..PREVIEW_LENGTH + 2 {
            queue.pop();
            assert!(queue.peek(PREVIEW_LENGTH).len() >= PREVIEW_LENGTH);
        }
    }

    #[test]
    fn test_peek_matches_pop_order() {
        let mut queue = PieceQueue::new(PREVIEW_LENGTH, Some(3));
        queue.pop();
        let upcoming = queue.peek(PREVIEW_LENGTH).to_vec();
        for kind in upcoming {
            assert_eq!(queue.pop().kind(), kind);
        }
    }

    #[test]
    fn test_pops_spawn_pose() {
        let mut queue = PieceQueue::default();
        let piece = queue.pop();
        assert_eq!(piece, Piece::new(piece.kind()));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceQueue::new(PREVIEW_LENGTH, Some(99));
        let mut b = PieceQueue::new(PREVIEW_LENGTH, Some(99));
        for _ in 0..50 {
            assert_eq!(a.pop(), b.pop());
        }
    }

    #[test]
    fn test_many_pieces() {
        let mut queue = PieceQueue::new(7, None);
        // Should be able to get many pieces without panicking
        for _ in 0..100 {
            let _ = queue.pop();
        }
    }
}
