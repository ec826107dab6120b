use alloc::vec::Vec;
use hashbrown::HashSet;

use super::*;

/// Purely random placement: draws flat cell indices from a seeded PRNG and retries any index
/// that was already picked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField> {
        use rand::prelude::*;

        config.validate()?;

        let grid = config.grid();
        let total_cells = grid.total_cells();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut picked: HashSet<CellCount> = HashSet::with_capacity(config.mines.into());
        let mut retries = 0usize;

        while picked.len() < usize::from(config.mines) {
            let index: CellCount = rng.random_range(0..total_cells);
            if !picked.insert(index) {
                retries += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {:?} with seed {}, {} retries",
            config.mines,
            config.size,
            self.seed,
            retries
        );

        let mine_coords: Vec<Coord2> = picked
            .into_iter()
            .map(|index| grid.coords_of(index))
            .collect();
        MineField::from_mine_coords(config.size, &mine_coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count_without_duplicates() {
        let cases = [
            (1, Difficulty::Easy),
            (7, Difficulty::Medium),
            (42, Difficulty::Hard),
        ];
        for (seed, difficulty) in cases {
            let config = difficulty.config();
            let field = RandomMinefieldGenerator::new(seed).generate(config).unwrap();
            let coords = field.mine_coords();

            assert_eq!(field.mine_count(), config.mines);
            assert_eq!(coords.len(), usize::from(config.mines));
            assert!(coords.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = Difficulty::Medium.config();

        let a = RandomMinefieldGenerator::new(1234).generate(config).unwrap();
        let b = RandomMinefieldGenerator::new(1234).generate(config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn fills_all_but_one_cell() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        let field = RandomMinefieldGenerator::new(99).generate(config).unwrap();

        assert_eq!(field.mine_count(), 8);
        assert_eq!(field.safe_cell_count(), 1);
    }

    #[test]
    fn rejects_invalid_config() {
        let generate = |config| RandomMinefieldGenerator::new(0).generate(config);

        assert_eq!(
            generate(GameConfig::new_unchecked((1, 1), 0)),
            Err(GameError::TooFewMines)
        );
        assert_eq!(
            generate(GameConfig::new_unchecked((4, 4), 16)),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn fixed_generator_requires_matching_count() {
        let config = GameConfig::new(3, 3, 2).unwrap();

        assert!(FixedMinefieldGenerator::new(&[(0, 0), (2, 2)]).generate(config).is_ok());
        assert_eq!(
            FixedMinefieldGenerator::new(&[(0, 0)]).generate(config),
            Err(GameError::MineCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
