use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom as _,
};
use rand_pcg::Pcg32;

use crate::core::piece::ShapeKind;

/// Number of shapes added per refill: every kind exactly twice.
const BAG_SIZE: usize = 2 * ShapeKind::LEN;

/// 128-bit seed for a deterministic random source.
///
/// The same seed always produces the same shape sequence (and, in the
/// evolution controller, the same agent initialization and reproduction
/// draws), which makes whole runs reproducible bit for bit.
///
/// A random seed can be drawn with `rng.random()`:
///
/// ```
/// use rand::Rng as _;
/// use tetrevo_engine::{RngSeed, ShapeBag};
///
/// let seed: RngSeed = rand::rng().random();
/// let mut a = ShapeBag::with_seed(seed);
/// let mut b = ShapeBag::with_seed(seed);
/// assert_eq!(a.pop_next(), b.pop_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngSeed([u8; 16]);

impl RngSeed {
    #[must_use]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn bytes(self) -> [u8; 16] {
        self.0
    }
}

impl Distribution<RngSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RngSeed {
        let mut bytes = [0; 16];
        rng.fill(&mut bytes);
        RngSeed(bytes)
    }
}

/// Shape generator based on a shuffled double bag.
///
/// Each refill shuffles a batch containing all seven kinds twice, bounding
/// how often any kind can repeat while keeping the order random. The queue is
/// topped up whenever fewer than three draws remain, so the next shape is
/// always available for preview.
#[derive(Debug, Clone)]
pub struct ShapeBag {
    rng: Pcg32,
    queue: VecDeque<ShapeKind>,
}

impl Default for ShapeBag {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBag {
    /// Creates a bag with a seed drawn from the thread generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a bag with a specific seed for deterministic draws.
    #[must_use]
    pub fn with_seed(seed: RngSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.bytes()),
            queue: VecDeque::with_capacity(2 * BAG_SIZE),
        };
        this.fill();
        this
    }

    fn fill(&mut self) {
        while self.queue.len() < 3 {
            let mut batch = ArrayVec::<ShapeKind, BAG_SIZE>::new();
            batch.extend(ShapeKind::ALL);
            batch.extend(ShapeKind::ALL);
            batch.shuffle(&mut self.rng);
            self.queue.extend(batch);
        }
    }

    /// Draws the next shape kind, refilling the bag when it runs low.
    pub fn pop_next(&mut self) -> ShapeKind {
        self.fill();
        self.queue
            .pop_front()
            .expect("shape bag is refilled before every draw")
    }

    /// The kind the next draw will return.
    #[must_use]
    pub fn peek(&self) -> ShapeKind {
        self.queue[0]
    }

    /// Preview of the queued kinds in draw order.
    pub fn upcoming(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.queue.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = RngSeed::new([7; 16]);
        let mut a = ShapeBag::with_seed(seed);
        let mut b = ShapeBag::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(a.pop_next(), b.pop_next());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = ShapeBag::with_seed(RngSeed::new([1; 16]));
        let mut b = ShapeBag::with_seed(RngSeed::new([2; 16]));
        let a_draws: Vec<_> = (0..BAG_SIZE).map(|_| a.pop_next()).collect();
        let b_draws: Vec<_> = (0..BAG_SIZE).map(|_| b.pop_next()).collect();
        // Identical shuffles of 14 elements from different streams are
        // possible in principle but would indicate a seeding bug in practice.
        assert_ne!(a_draws, b_draws);
    }

    #[test]
    fn test_every_batch_holds_each_kind_twice() {
        let mut bag = ShapeBag::with_seed(RngSeed::new([42; 16]));
        for _ in 0..5 {
            let mut counts: HashMap<ShapeKind, usize> = HashMap::new();
            for _ in 0..BAG_SIZE {
                *counts.entry(bag.pop_next()).or_default() += 1;
            }
            assert_eq!(counts.len(), ShapeKind::LEN);
            assert!(counts.values().all(|&n| n == 2), "{counts:?}");
        }
    }

    #[test]
    fn test_peek_matches_next_draw() {
        let mut bag = ShapeBag::with_seed(RngSeed::new([9; 16]));
        for _ in 0..30 {
            let peeked = bag.peek();
            assert_eq!(bag.pop_next(), peeked);
        }
    }

    #[test]
    fn test_upcoming_previews_draw_order() {
        let mut bag = ShapeBag::with_seed(RngSeed::new([3; 16]));
        let preview: Vec<_> = bag.upcoming().take(5).collect();
        let drawn: Vec<_> = (0..5).map(|_| bag.pop_next()).collect();
        assert_eq!(preview, drawn);
    }
}
