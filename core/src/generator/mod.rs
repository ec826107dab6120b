use crate::*;
pub use random::*;

mod random;

/// Placement strategy for the mines of a new board.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField>;
}

/// Places mines at a fixed list of coordinates, the configured mine count must match.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator<'a> {
    mine_coords: &'a [Coord2],
}

impl<'a> FixedMinefieldGenerator<'a> {
    pub fn new(mine_coords: &'a [Coord2]) -> Self {
        Self { mine_coords }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator<'_> {
    fn generate(self, config: GameConfig) -> Result<MineField> {
        config.validate()?;
        let minefield = MineField::from_mine_coords(config.size, self.mine_coords)?;
        if minefield.mine_count() != config.mines {
            return Err(GameError::MineCountMismatch {
                expected: config.mines,
                actual: minefield.mine_count(),
            });
        }
        Ok(minefield)
    }
}
