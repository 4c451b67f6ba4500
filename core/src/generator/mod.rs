use crate::*;
pub use random::*;

mod random;

/// Strategy used to lay out the mines once the first cell to open is known.
pub trait MinefieldGenerator {
    /// Builds a field for `config` where `first` is never a mine.
    fn generate(self, config: GameConfig, first: Coord2) -> MineField;
}
