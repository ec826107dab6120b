use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, as stored by the reveal engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a cell holds underneath: a mine, or the number of mines around it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjacency {
    Mine,
    Count(u8),
}

impl Adjacency {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }
}

/// How a revealed cell is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleValue {
    Blank,
    /// Always in `1..=8`.
    Count(u8),
    Mine,
}

impl From<Adjacency> for VisibleValue {
    fn from(other: Adjacency) -> Self {
        match other {
            Adjacency::Mine => VisibleValue::Mine,
            Adjacency::Count(0) => VisibleValue::Blank,
            Adjacency::Count(count) => VisibleValue::Count(count),
        }
    }
}

/// Full render state of a cell for snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(VisibleValue),
}

impl CellView {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_drawn_blank() {
        assert_eq!(VisibleValue::from(Adjacency::Count(0)), VisibleValue::Blank);
        assert_eq!(VisibleValue::from(Adjacency::Count(3)), VisibleValue::Count(3));
        assert_eq!(VisibleValue::from(Adjacency::Mine), VisibleValue::Mine);
    }

    #[test]
    fn flagged_is_unrevealed() {
        assert!(CellState::Flagged.is_unrevealed());
        assert!(CellState::Hidden.is_unrevealed());
        assert!(!CellState::Revealed.is_unrevealed());
    }
}
