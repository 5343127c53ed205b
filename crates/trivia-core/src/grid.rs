//! The 3×3 tile grid.

use serde::{Deserialize, Serialize};

/// Number of tiles on the board.
pub const TILE_COUNT: usize = 9;

/// Tiles per grid row, used when rendering.
pub const GRID_WIDTH: usize = 3;

/// Index of a tile on the board, guaranteed to be below [`TILE_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TileIndex(u8);

impl TileIndex {
    /// Create a tile index, or `None` if `index` is off the board.
    pub fn new(index: usize) -> Option<Self> {
        if index < TILE_COUNT {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    /// The zero-based index.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// The one-based tile number shown to players.
    pub fn number(self) -> usize {
        self.get().saturating_add(1)
    }

    /// Iterate every tile in board order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..TILE_COUNT).filter_map(Self::new)
    }
}

impl TryFrom<usize> for TileIndex {
    type Error = String;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index).ok_or_else(|| format!("tile index {index} is off the board"))
    }
}

impl From<TileIndex> for usize {
    fn from(tile: TileIndex) -> Self {
        tile.get()
    }
}

impl core::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_board_indices_only() {
        assert!(TileIndex::new(0).is_some());
        assert!(TileIndex::new(8).is_some());
        assert!(TileIndex::new(9).is_none());
    }

    #[test]
    fn all_yields_nine_tiles_in_order() {
        let tiles: Vec<usize> = TileIndex::all().map(TileIndex::get).collect();
        assert_eq!(tiles, (0..TILE_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn number_is_one_based() {
        assert_eq!(TileIndex::new(0).map(TileIndex::number), Some(1));
        assert_eq!(TileIndex::new(8).map(TileIndex::number), Some(9));
    }
}
