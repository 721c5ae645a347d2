use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

impl RandomSource for SmallRng {
    fn next_unit(&mut self) -> f64 {
        self.random()
    }

    fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.random_range(0..bound)
    }
}

/// Seeded generation strategy, the same seed always yields the same board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn into_source(self) -> SmallRng {
        SmallRng::seed_from_u64(self.seed)
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Board {
        log::debug!("Generating board with seed {}", self.seed);
        let mut rng = self.into_source();
        generate(&mut rng, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_board() {
        let config = BoardConfig::new_unchecked(16, 5);
        let first = RandomBoardGenerator::new(42).generate(config);
        let second = RandomBoardGenerator::new(42).generate(config);
        assert_eq!(first, second);
    }

    #[test]
    fn seeded_boards_keep_invariants() {
        for seed in 0..32 {
            let config = BoardConfig::new_unchecked(5, 5);
            let board = RandomBoardGenerator::new(seed).generate(config);
            assert_eq!(board.difference_count(), 5);
            assert_eq!(board.left().diff_indices(board.right()), board.difference_indices());
        }
    }

    #[test]
    fn small_rng_unit_draws_are_in_range() {
        let mut rng = RandomBoardGenerator::new(1).into_source();
        for _ in 0..1000 {
            let value = rng.next_unit();
            assert!((0.0..1.0).contains(&value));
            assert!(rng.below(6) < 6);
        }
    }
}
