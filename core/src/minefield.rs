use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Value stored for a cell holding a mine.
pub const MINE: i8 = -1;

/// Where the mines are, plus the number of adjacent mines for every other cell.
///
/// Immutable once built: a game only ever reads from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    values: Array2<i8>,
    mine_count: CellCount,
}

impl MineField {
    /// Field of the given size without any mine yet.
    pub(crate) fn empty(size: Coord2) -> Self {
        Self {
            values: Array2::zeros(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Puts a mine at `coords` and bumps the count of every neighbor that is not a mine itself.
    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        if self[coords] == MINE {
            return;
        }
        self.values[coords.to_nd_index()] = MINE;
        self.mine_count += 1;
        for pos in self.values.iter_neighbors(coords) {
            let value = &mut self.values[pos.to_nd_index()];
            if *value != MINE {
                *value += 1;
            }
        }
    }

    /// Builds a field with mines at exactly the given coordinates, duplicates are counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::validate_size(size)?;

        let mut field = Self::empty(size);
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            field.place_mine(coords);
        }

        if field.mine_count >= field.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(field)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.values.dim();
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.values.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords] == MINE
    }

    /// Number of adjacent mines, `None` if the cell is a mine.
    pub fn count_at(&self, coords: Coord2) -> Option<u8> {
        u8::try_from(self[coords]).ok()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.values.iter_neighbors(coords)
    }

    /// Mine coordinates in flattened-index order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.values
            .indexed_iter()
            .filter(|&(_, &value)| value == MINE)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineField {
    type Output = i8;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.values[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_built_around_mines() {
        let field = MineField::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.safe_cell_count(), 7);
        assert_eq!(field[(0, 0)], MINE);
        assert_eq!(field[(2, 2)], MINE);
        assert_eq!(field.count_at((1, 1)), Some(2));
        assert_eq!(field.count_at((1, 0)), Some(1));
        assert_eq!(field.count_at((2, 0)), Some(0));
        assert_eq!(field.count_at((0, 0)), None);
    }

    #[test]
    fn adjacent_mines_keep_their_marker() {
        let field = MineField::from_mine_coords((3, 1), &[(0, 0), (1, 0)]).unwrap();

        assert_eq!(field[(0, 0)], MINE);
        assert_eq!(field[(1, 0)], MINE);
        assert_eq!(field.count_at((2, 0)), Some(1));
    }

    #[test]
    fn duplicate_coords_count_once() {
        let field = MineField::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(field.mine_count(), 1);
        assert_eq!(field.count_at((0, 0)), Some(1));
    }

    #[test]
    fn rejects_out_of_bounds_and_full_fields() {
        assert_eq!(
            MineField::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
        assert_eq!(
            MineField::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            MineField::from_mine_coords((0, 2), &[]),
            Err(GameError::InvalidSize)
        );
    }

    #[test]
    fn iter_mines_lists_every_mine() {
        let mines = [(0, 1), (2, 0)];
        let field = MineField::from_mine_coords((3, 2), &mines).unwrap();

        assert!(field.iter_mines().eq(mines));
    }
}
