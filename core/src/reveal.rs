use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells opened by a single reveal, in the order they were opened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealResult {
    pub hit_mine: bool,
    pub cells: Vec<Coord2>,
}

impl RevealResult {
    pub fn has_update(&self) -> bool {
        !self.cells.is_empty()
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Placed,
    Removed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Change in the number of placed flags.
    pub const fn delta(self) -> i8 {
        match self {
            Self::NoChange => 0,
            Self::Placed => 1,
            Self::Removed => -1,
        }
    }
}

/// Hidden/revealed/flagged state of every cell of a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEngine {
    grid: Grid,
    board: Array2<CellState>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
}

impl RevealEngine {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            board: grid.new_array(CellState::Hidden),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Panics when `coords` is out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Opens a hidden cell, flood filling from it when it has no adjacent mines.
    ///
    /// Flagged, revealed and out-of-bounds cells yield an empty result. Opening a mine only
    /// opens that cell and sets `hit_mine`.
    pub fn reveal(&mut self, minefield: &MineField, coords: Coord2) -> RevealResult {
        if !self.grid.in_bounds(coords) || self.cell_at(coords) != CellState::Hidden {
            return RevealResult::default();
        }

        if minefield.is_mine(coords) {
            self.open(coords);
            log::debug!("Revealed mine at {:?}", coords);
            return RevealResult {
                hit_mine: true,
                cells: Vec::from([coords]),
            };
        }

        let cells = self.flood_fill(minefield, coords);
        log::debug!("Revealed {} cells from {:?}", cells.len(), coords);
        RevealResult {
            hit_mine: false,
            cells,
        }
    }

    /// Every cell is marked revealed before it is queued, so each one is visited at most once.
    fn flood_fill(&mut self, minefield: &MineField, start: Coord2) -> Vec<Coord2> {
        let mut opened = Vec::from([start]);
        let mut to_visit = VecDeque::from([start]);
        self.open(start);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !minefield.adjacency(visit_coords).is_zero() {
                continue;
            }

            // a zero cell has no mine neighbors, flags are left alone
            for pos in minefield.iter_neighbors(visit_coords) {
                if self.cell_at(pos) != CellState::Hidden {
                    continue;
                }
                self.open(pos);
                log::trace!(
                    "Flood opened cell at {:?}, adjacency: {:?}",
                    pos,
                    minefield.adjacency(pos)
                );
                opened.push(pos);
                to_visit.push_back(pos);
            }
        }

        opened
    }

    fn open(&mut self, coords: Coord2) {
        self.board[coords.to_nd_index()] = CellState::Revealed;
        self.revealed_count += 1;
    }

    /// Flags a hidden cell while `budget_remaining` allows it, or unflags a flagged one.
    pub fn toggle_flag(&mut self, coords: Coord2, budget_remaining: CellCount) -> FlagOutcome {
        use CellState::*;
        use FlagOutcome::*;

        if !self.grid.in_bounds(coords) {
            return NoChange;
        }

        let cell = &mut self.board[coords.to_nd_index()];
        match *cell {
            Hidden if budget_remaining > 0 => {
                *cell = Flagged;
                self.flagged_count += 1;
                Placed
            }
            Hidden => {
                log::debug!("No flags left, ignoring flag at {:?}", coords);
                NoChange
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                Removed
            }
            Revealed => NoChange,
        }
    }

    /// Coordinates of every mine, row-major.
    pub fn mine_cells(&self, minefield: &MineField) -> Vec<Coord2> {
        minefield.mine_coords()
    }

    /// Opens every mine that is still closed, flagged ones included, and returns those cells.
    pub fn reveal_mines(&mut self, minefield: &MineField) -> Vec<Coord2> {
        let mut opened = Vec::new();
        for coords in self.mine_cells(minefield) {
            match self.cell_at(coords) {
                CellState::Revealed => continue,
                CellState::Flagged => self.flagged_count -= 1,
                CellState::Hidden => {}
            }
            self.open(coords);
            opened.push(coords);
        }
        opened
    }
}
