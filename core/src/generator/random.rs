use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniformly random layout where only the first opened cell is guaranteed to be safe.
///
/// Whole subsets are drawn and thrown away until one misses the first cell, so every layout that keeps the first
/// cell free is equally likely. The same seed and first cell always give the same field.
///
/// Each draw costs O(cells) and a draw misses the first cell with probability `1 - mines / cells`, so nearly full
/// boards need about `cells` draws. A 255x255 board one mine short of full takes seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig, first: Coord2) -> MineField {
        let total_cells = config.total_cells();
        let mines = if config.mines >= total_cells {
            log::warn!(
                "Cannot keep first cell safe with {} mines in {} cells, placing {}",
                config.mines,
                total_cells,
                total_cells.saturating_sub(1)
            );
            total_cells.saturating_sub(1)
        } else {
            config.mines
        };

        let first_index = usize::from(flat_index(first, config.size));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut attempts: u32 = 1;
        let picks = loop {
            let picks = index::sample(&mut rng, total_cells.into(), mines.into());
            if !picks.iter().any(|i| i == first_index) {
                break picks;
            }
            log::trace!("Sample #{} hit first cell {:?}, resampling", attempts, first);
            attempts += 1;
        };

        let mut field = MineField::empty(config.size);
        for i in picks.iter() {
            field.place_mine(from_flat_index(i as CellCount, config.size));
        }

        log::debug!(
            "Generated {}x{} field with {} mines after {} sample(s), first cell {:?}",
            config.size.0,
            config.size.1,
            field.mine_count(),
            attempts,
            first
        );
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord2, mines: CellCount, seed: u64, first: Coord2) -> MineField {
        let config = GameConfig::new(size, mines).unwrap();
        RandomMinefieldGenerator::new(seed).generate(config, first)
    }

    #[test]
    fn same_seed_gives_same_field() {
        let a = generate((16, 16), 40, 7, (3, 4));
        let b = generate((16, 16), 40, 7, (3, 4));

        assert_eq!(a, b);
    }

    #[test]
    fn places_requested_mine_count() {
        for seed in 0..50 {
            let field = generate((9, 9), 10, seed, (0, 0));
            assert_eq!(field.mine_count(), 10);
            assert_eq!(field.iter_mines().count(), 10);
        }
    }

    #[test]
    fn first_cell_is_safe_on_dense_board() {
        for seed in 0..50 {
            let field = generate((4, 4), 15, seed, (1, 2));
            assert!(!field.contains_mine((1, 2)));
            assert_eq!(field.mine_count(), 15);
        }
    }

    #[test]
    fn zero_mines_gives_empty_field() {
        let field = generate((3, 3), 0, 1, (1, 1));

        assert_eq!(field.mine_count(), 0);
        assert_eq!(field.count_at((0, 0)), Some(0));
    }

    #[test]
    fn overfull_config_still_keeps_first_cell() {
        let config = GameConfig::new_unchecked((2, 2), 4);
        let field = RandomMinefieldGenerator::new(3).generate(config, (0, 1));

        assert_eq!(field.mine_count(), 3);
        assert!(!field.contains_mine((0, 1)));
    }
}
