use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Up to eight neighbors, kept inline.
pub type Neighbors = SmallVec<[Coord2; 8]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Rectangular coordinate space shared read-only by the minefield and the reveal state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: Coord,
    cols: Coord,
}

impl Grid {
    /// Callers validate that both dimensions are at least 1, see [`crate::GameConfig::new`].
    pub(crate) const fn new(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn in_bounds(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }

    /// In-bounds cells at Chebyshev distance 1, never the cell itself.
    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        self.iter_neighbors(coords).collect()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Every coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// Converts a row-major flat index back to coordinates.
    pub(crate) fn coords_of(&self, index: CellCount) -> Coord2 {
        let cols = CellCount::from(self.cols);
        ((index / cols) as Coord, (index % cols) as Coord)
    }

    pub(crate) fn new_array<T: Clone>(&self, elem: T) -> Array2<T> {
        Array2::from_elem(self.size().to_nd_index(), elem)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let grid = Grid::new(3, 3);

        assert_eq!(grid.neighbors((0, 0)).as_slice(), &[(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn center_has_eight_neighbors_without_itself() {
        let grid = Grid::new(3, 3);
        let neighbors = grid.neighbors((1, 1));

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1);

        assert!(grid.neighbors((0, 0)).is_empty());
    }

    #[test]
    fn edge_of_wide_grid_stays_in_bounds() {
        let grid = Grid::new(2, 5);

        for coords in grid.cells() {
            assert!(grid.iter_neighbors(coords).all(|pos| grid.in_bounds(pos)));
        }
        assert_eq!(grid.neighbors((1, 4)).as_slice(), &[(0, 3), (0, 4), (1, 3)]);
    }

    #[test]
    fn in_bounds_rejects_outside_coords() {
        let grid = Grid::new(2, 3);

        assert!(grid.in_bounds((1, 2)));
        assert!(!grid.in_bounds((2, 0)));
        assert!(!grid.in_bounds((0, 3)));
    }

    #[test]
    fn cells_are_row_major_and_match_flat_index() {
        let grid = Grid::new(2, 3);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), usize::from(grid.total_cells()));
        assert_eq!(cells[..4], [(0, 0), (0, 1), (0, 2), (1, 0)]);
        for (index, &coords) in cells.iter().enumerate() {
            assert_eq!(grid.coords_of(index as CellCount), coords);
        }
    }
}
