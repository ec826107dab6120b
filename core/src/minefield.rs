use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine positions and the adjacency count of every cell, computed once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    grid: Grid,
    mine_mask: Array2<bool>,
    adjacency: Array2<Adjacency>,
    mine_count: CellCount,
}

impl MineField {
    /// Builds a minefield with mines exactly at `mine_coords`, duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let grid = Grid::new(size.0, size.1);
        if grid.total_cells() == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask = grid.new_array(false);
        for &coords in mine_coords {
            if !grid.in_bounds(coords) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        GameConfig::new_unchecked(size, mine_count).validate()?;

        Ok(Self::from_mine_mask(grid, mine_mask, mine_count))
    }

    fn from_mine_mask(grid: Grid, mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        let mut adjacency = grid.new_array(Adjacency::Count(0));
        for coords in grid.cells() {
            adjacency[coords.to_nd_index()] = if mine_mask[coords.to_nd_index()] {
                Adjacency::Mine
            } else {
                let count = grid
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                Adjacency::Count(count as u8)
            };
        }

        Self {
            grid,
            mine_mask,
            adjacency,
            mine_count,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.grid.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_cells(&self) -> CellCount {
        self.grid.total_cells()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Out-of-bounds coordinates never hold a mine.
    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.grid.in_bounds(coords) && self[coords]
    }

    /// Panics when `coords` is out of bounds.
    pub fn adjacency(&self, coords: Coord2) -> Adjacency {
        self.adjacency[coords.to_nd_index()]
    }

    /// Number of mines around `coords`, also defined for mine cells.
    pub fn adjacent_count(&self, coords: Coord2) -> u8 {
        match self.adjacency(coords) {
            Adjacency::Count(count) => count,
            Adjacency::Mine => self
                .grid
                .iter_neighbors(coords)
                .filter(|&pos| self[pos])
                .count() as u8,
        }
    }

    /// Mine coordinates in row-major order.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.grid.cells().filter(|&coords| self[coords]).collect()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.grid.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineField {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_fixture() {
        let field = MineField::from_mine_coords((3, 3), &[(0, 0)]).unwrap();

        assert_eq!(field.adjacency((0, 0)), Adjacency::Mine);
        assert_eq!(field.adjacent_count((0, 1)), 1);
        assert_eq!(field.adjacent_count((1, 1)), 1);
        assert_eq!(field.adjacent_count((2, 2)), 0);
        assert_eq!(field.adjacency((2, 2)), Adjacency::Count(0));
    }

    #[test]
    fn counts_match_brute_force() {
        let mines = [(0, 1), (1, 3), (2, 2), (3, 0), (3, 4), (4, 4)];
        let field = MineField::from_mine_coords((5, 5), &mines).unwrap();

        for coords in field.grid().cells() {
            if field.is_mine(coords) {
                assert_eq!(field.adjacency(coords), Adjacency::Mine);
                continue;
            }
            let (row, col) = (i16::from(coords.0), i16::from(coords.1));
            let expected = mines
                .iter()
                .filter(|&&(r, c)| {
                    let (dr, dc) = (i16::from(r) - row, i16::from(c) - col);
                    dr.abs() <= 1 && dc.abs() <= 1
                })
                .count() as u8;
            assert_eq!(field.adjacency(coords), Adjacency::Count(expected), "at {coords:?}");
        }
    }

    #[test]
    fn center_surrounded_by_mines_counts_eight() {
        let ring = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        let field = MineField::from_mine_coords((3, 4), &ring).unwrap();

        assert_eq!(field.adjacency((1, 1)), Adjacency::Count(8));
        assert_eq!(field.adjacent_count((0, 0)), 2);
    }

    #[test]
    fn duplicate_coords_count_once() {
        let field = MineField::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(field.mine_count(), 1);
        assert_eq!(field.mine_coords(), [(1, 1)]);
        assert_eq!(field.safe_cell_count(), 3);
    }

    #[test]
    fn rejects_out_of_bounds_and_invalid_counts() {
        assert_eq!(
            MineField::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineField::from_mine_coords((2, 2), &[]),
            Err(GameError::TooFewMines)
        );
        assert_eq!(
            MineField::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            MineField::from_mine_coords((0, 2), &[]),
            Err(GameError::EmptyBoard)
        );
    }

    #[test]
    fn out_of_bounds_is_not_a_mine() {
        let field = MineField::from_mine_coords((2, 2), &[(1, 1)]).unwrap();

        assert!(field.is_mine((1, 1)));
        assert!(!field.is_mine((5, 5)));
        assert_eq!(field.validate_coords((2, 1)), Err(GameError::InvalidCoords));
    }
}
