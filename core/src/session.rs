use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Leaving a final state takes a reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Cells opened by a reveal and how to draw them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealUpdate {
    pub cells: Vec<(Coord2, VisibleValue)>,
    pub hit_mine: bool,
    pub status: GameStatus,
}

impl RevealUpdate {
    pub fn has_update(&self) -> bool {
        !self.cells.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagUpdate {
    pub outcome: FlagOutcome,
    /// `None` for coordinates outside the board.
    pub new_state: Option<CellState>,
    pub flags_remaining: CellCount,
}

impl FlagUpdate {
    pub const fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickUpdate {
    pub elapsed_secs: u32,
}

/// Everything needed to draw the whole board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub status: GameStatus,
    pub size: Coord2,
    pub mines: CellCount,
    pub flags_remaining: CellCount,
    pub elapsed_secs: u32,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

/// A game from first click to win or loss. The only entry point for the presentation layer.
#[derive(Clone, Debug)]
pub struct GameSession {
    minefield: MineField,
    board: RevealEngine,
    status: GameStatus,
    elapsed_secs: u32,
    timer_running: bool,
    triggered_mine: Option<Coord2>,
    /// Seeds for the boards created by [`GameSession::reset`].
    seeder: SmallRng,
}

impl GameSession {
    /// New random board, the first one is placed with `seed` itself.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed), seed)
    }

    pub fn with_generator(
        config: GameConfig,
        generator: impl MinefieldGenerator,
        seed: u64,
    ) -> Result<Self> {
        let minefield = generator.generate(config)?;
        Ok(Self::from_minefield(minefield, seed))
    }

    pub fn from_minefield(minefield: MineField, seed: u64) -> Self {
        log::debug!(
            "New game: {:?} with {} mines",
            minefield.size(),
            minefield.mine_count()
        );
        Self {
            board: RevealEngine::new(minefield.grid()),
            minefield,
            status: Default::default(),
            elapsed_secs: 0,
            timer_running: false,
            triggered_mine: None,
            seeder: SmallRng::seed_from_u64(seed),
        }
    }

    /// Replaces the board with a fresh random one; on error the current game is kept.
    pub fn reset(&mut self, config: GameConfig) -> Result<()> {
        let seed: u64 = self.seeder.random();
        self.reset_with(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn reset_with(&mut self, config: GameConfig, generator: impl MinefieldGenerator) -> Result<()> {
        let minefield = generator.generate(config)?;
        log::debug!("Reset to {:?} with {} mines", config.size, config.mines);
        self.board = RevealEngine::new(minefield.grid());
        self.minefield = minefield;
        self.status = GameStatus::InProgress;
        self.elapsed_secs = 0;
        self.timer_running = false;
        self.triggered_mine = None;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.minefield.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.board.flagged_count()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.total_mines().saturating_sub(self.flags_placed())
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    /// The mine that ended the game, only set after a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn minefield(&self) -> &MineField {
        &self.minefield
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.board.cell_at(coords))
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.view_unchecked(coords))
    }

    fn view_unchecked(&self, coords: Coord2) -> CellView {
        match self.board.cell_at(coords) {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed => CellView::Revealed(self.visible_value(coords)),
        }
    }

    fn visible_value(&self, coords: Coord2) -> VisibleValue {
        self.minefield.adjacency(coords).into()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let grid = self.minefield.grid();
        let mut cells = grid.new_array(CellView::Hidden);
        for coords in grid.cells() {
            cells[coords.to_nd_index()] = self.view_unchecked(coords);
        }

        BoardSnapshot {
            status: self.status,
            size: grid.size(),
            mines: self.total_mines(),
            flags_remaining: self.flags_remaining(),
            elapsed_secs: self.elapsed_secs,
            triggered_mine: self.triggered_mine,
            cells,
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealUpdate {
        if !self.accepts_move(coords) {
            return self.reveal_update(Vec::new(), false);
        }

        let RevealResult {
            hit_mine,
            mut cells,
        } = self.board.reveal(&self.minefield, coords);

        if hit_mine {
            self.triggered_mine = Some(coords);
            cells.extend(self.board.reveal_mines(&self.minefield));
            self.end_game(GameStatus::Lost);
        } else if !cells.is_empty()
            && self.board.revealed_count() == self.minefield.safe_cell_count()
        {
            self.end_game(GameStatus::Won);
        }

        self.reveal_update(cells, hit_mine)
    }

    fn reveal_update(&self, cells: Vec<Coord2>, hit_mine: bool) -> RevealUpdate {
        RevealUpdate {
            cells: cells
                .into_iter()
                .map(|coords| (coords, self.visible_value(coords)))
                .collect(),
            hit_mine,
            status: self.status,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagUpdate {
        let outcome = if self.accepts_move(coords) {
            let budget_remaining = self.flags_remaining();
            self.board.toggle_flag(coords, budget_remaining)
        } else {
            FlagOutcome::NoChange
        };

        FlagUpdate {
            outcome,
            new_state: self.cell_at(coords).ok(),
            flags_remaining: self.flags_remaining(),
        }
    }

    pub fn start_timer(&mut self) {
        if self.status.is_finished() {
            return;
        }
        self.timer_running = true;
    }

    pub fn stop_timer(&mut self) {
        self.timer_running = false;
    }

    /// Advances the clock by one second while it runs. Called once per second by the front end.
    pub fn tick(&mut self) -> TickUpdate {
        if self.timer_running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        TickUpdate {
            elapsed_secs: self.elapsed_secs,
        }
    }

    fn accepts_move(&self, coords: Coord2) -> bool {
        if self.status.is_finished() {
            log::debug!("Game already ended, ignoring move at {:?}", coords);
            return false;
        }
        if self.minefield.validate_coords(coords).is_err() {
            log::warn!("Ignoring move outside the board at {:?}", coords);
            return false;
        }
        true
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        self.status = status;
        self.timer_running = false;
        log::debug!("Game ended: {:?} after {}s", status, self.elapsed_secs);
    }
}
