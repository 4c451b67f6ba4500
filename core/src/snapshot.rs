use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a single cell looks like to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    #[default]
    Hidden,
    Flag,
    Question,
    /// Flag on a safe cell, only shown once the game is lost
    WrongFlag,
    Mine,
    /// The mine that ended the game
    Exploded,
    Number(u8),
}

impl Glyph {
    pub const fn as_char(self) -> char {
        match self {
            Self::Hidden => '-',
            Self::Flag => '\u{2691}',
            Self::Question => '?',
            Self::WrongFlag => 'X',
            Self::Mine => '*',
            Self::Exploded => '!',
            Self::Number(0) => '\u{25a0}',
            Self::Number(count) => (b'0' + count) as char,
        }
    }

    /// Whether the cell still hides what is under it.
    pub const fn is_covered(self) -> bool {
        matches!(
            self,
            Self::Hidden | Self::Flag | Self::Question | Self::WrongFlag
        )
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Read-only picture of a board, indexed `[x, y]`.
///
/// Its `Display` form is one line per row, glyphs separated by a space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    glyphs: Array2<Glyph>,
}

impl Snapshot {
    pub fn from_game(game: &Game) -> Self {
        let lost = game.status() == Status::Lost;
        let mine_field = game.mine_field();
        let triggered = game.triggered_mine();

        let glyphs = Array2::from_shape_fn(game.size().to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            let state = game.cell_at(coords).unwrap_or_default();
            let value = mine_field.map(|mine_field| mine_field[coords]);
            let mine_glyph = if triggered == Some(coords) {
                Glyph::Exploded
            } else {
                Glyph::Mine
            };

            match (state, value) {
                (CellState::Flagged, Some(value)) if lost && value != MINE => Glyph::WrongFlag,
                (CellState::Flagged, _) => Glyph::Flag,
                (CellState::Revealed, Some(MINE)) => mine_glyph,
                (CellState::Revealed, Some(count)) => Glyph::Number(count as u8),
                (CellState::Hidden | CellState::Questioned, Some(MINE)) if lost => mine_glyph,
                (CellState::Questioned, _) => Glyph::Question,
                (CellState::Hidden | CellState::Revealed, _) => Glyph::Hidden,
            }
        });

        Self { glyphs }
    }

    /// Every cell uncovered.
    pub fn from_mine_field(mine_field: &MineField) -> Self {
        let glyphs = Array2::from_shape_fn(mine_field.size().to_nd_index(), |(x, y)| {
            match mine_field.count_at((x as Coord, y as Coord)) {
                Some(count) => Glyph::Number(count),
                None => Glyph::Mine,
            }
        });
        Self { glyphs }
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.glyphs.dim();
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn glyph_at(&self, coords: Coord2) -> Option<Glyph> {
        self.glyphs.get(coords.to_nd_index()).copied()
    }

    /// Glyphs of row `y`, left to right.
    pub fn row(&self, y: Coord) -> impl Iterator<Item = Glyph> + '_ {
        self.glyphs.column(usize::from(y)).into_iter().copied()
    }

    pub fn count(&self, glyph: Glyph) -> usize {
        self.glyphs.iter().filter(|&&other| other == glyph).count()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, size_y) = self.size();
        for y in 0..size_y {
            for (x, glyph) in self.row(y).enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{glyph}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> Game {
        Game::from_mine_field(MineField::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn fresh_game_is_all_hidden() {
        let game = Game::new((3, 2), 1, 0).unwrap();
        let snapshot = game.snapshot();

        assert_eq!(snapshot.size(), (3, 2));
        assert_eq!(snapshot.count(Glyph::Hidden), 6);
        assert_eq!(snapshot.to_string(), "- - -\n- - -\n");
    }

    #[test]
    fn revealed_cells_show_counts_and_flags() {
        let mut game = game((3, 1), &[(0, 0)]);
        game.mark((0, 0)).unwrap();
        game.reveal((2, 0)).unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.glyph_at((0, 0)), Some(Glyph::Flag));
        assert_eq!(snapshot.glyph_at((1, 0)), Some(Glyph::Number(1)));
        assert_eq!(snapshot.glyph_at((2, 0)), Some(Glyph::Number(0)));
        assert_eq!(snapshot.to_string(), "\u{2691} 1 \u{25a0}\n");
    }

    #[test]
    fn lost_board_shows_mines_and_wrong_flags() {
        let mut game = game((3, 2), &[(0, 0), (2, 0)]);
        game.mark((1, 1)).unwrap();
        game.mark((2, 0)).unwrap();
        game.mark((0, 1)).unwrap();
        game.mark((0, 1)).unwrap();
        game.reveal((0, 0)).unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.glyph_at((0, 0)), Some(Glyph::Exploded));
        assert_eq!(snapshot.glyph_at((2, 0)), Some(Glyph::Flag));
        assert_eq!(snapshot.glyph_at((1, 1)), Some(Glyph::WrongFlag));
        assert_eq!(snapshot.glyph_at((0, 1)), Some(Glyph::Question));
        assert_eq!(snapshot.glyph_at((1, 0)), Some(Glyph::Hidden));
        assert_eq!(snapshot.to_string(), "! - \u{2691}\n? X -\n");
    }

    #[test]
    fn questioned_mine_is_shown_on_loss() {
        let mut game = game((3, 1), &[(0, 0), (1, 0)]);
        game.mark((1, 0)).unwrap();
        game.mark((1, 0)).unwrap();
        game.reveal((0, 0)).unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.glyph_at((0, 0)), Some(Glyph::Exploded));
        assert_eq!(snapshot.glyph_at((1, 0)), Some(Glyph::Mine));
        assert_eq!(snapshot.glyph_at((2, 0)), Some(Glyph::Hidden));
    }

    #[test]
    fn snapshot_has_no_side_effects() {
        let mut game = game((4, 4), &[(3, 3)]);
        game.reveal((0, 0)).unwrap();
        let before = game.clone();

        assert_eq!(game.snapshot(), game.snapshot());
        assert_eq!(game, before);
    }

    #[test]
    fn solution_uncovers_everything() {
        let mut game = Game::new((5, 5), 3, 11).unwrap();
        game.reveal((2, 2)).unwrap();

        let solution = game.solution().unwrap();

        assert_eq!(solution.count(Glyph::Mine), 3);
        assert!((0..5).all(|y| solution.row(y).all(|glyph| !glyph.is_covered())));
    }
}
