use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Status {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game, from the first click to a win or a loss.
///
/// Mines are only laid out on the first reveal so that cell is always safe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    mine_field: Option<MineField>,
    cells: Array2<CellState>,
    flagged_count: CellCount,
    status: Status,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(size: Coord2, mines: CellCount, seed: u64) -> Result<Self> {
        Self::from_config(GameConfig::new(size, mines)?, seed)
    }

    pub fn from_config(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self {
            config,
            seed,
            mine_field: None,
            cells: Array2::default(config.size.to_nd_index()),
            flagged_count: 0,
            status: Status::InProgress,
            triggered_mine: None,
        })
    }

    /// Game over an already laid out field, the first reveal gets no protection.
    pub fn from_mine_field(mine_field: MineField) -> Self {
        let config = mine_field.game_config();
        Self {
            config,
            seed: 0,
            cells: Array2::default(config.size.to_nd_index()),
            mine_field: Some(mine_field),
            flagged_count: 0,
            status: Status::InProgress,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, negative when the player placed too many flags.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_generated(&self) -> bool {
        self.mine_field.is_some()
    }

    pub fn mine_field(&self) -> Option<&MineField> {
        self.mine_field.as_ref()
    }

    /// Cell state, `None` when out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> Option<CellState> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.config.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Opens a cell, flooding through empty areas, or chords around an already revealed one.
    ///
    /// Flagged cells are protected, finished games are left untouched.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Status> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(self.status);
        }

        match self.cells[coords.to_nd_index()] {
            Flagged => return Ok(self.status),
            Hidden | Questioned => {
                let (config, seed) = (self.config, self.seed);
                let mine_field = &*self.mine_field.get_or_insert_with(|| {
                    RandomMinefieldGenerator::new(seed).generate(config, coords)
                });
                if mine_field.contains_mine(coords) {
                    self.triggered_mine = Some(coords);
                } else {
                    let opened = flood_reveal(mine_field, &mut self.cells, coords);
                    log::debug!("Revealed {} cell(s) from {:?}", opened, coords);
                }
            }
            Revealed => {
                if let Some(mine_field) = &self.mine_field {
                    let hit = chord_reveal(mine_field, &mut self.cells, coords);
                    if hit.is_some() {
                        self.triggered_mine = hit;
                    }
                }
            }
        }

        self.status = self.evaluate();
        match self.status {
            Status::InProgress => {}
            Status::Won => log::debug!("Game won on {:?}", coords),
            Status::Lost => log::debug!(
                "Game lost on {:?}, mine at {:?}",
                coords,
                self.triggered_mine
            ),
        }
        Ok(self.status)
    }

    /// Cycles a cell through flagged, questioned and hidden.
    pub fn mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        let Some((next, flag_delta)) = cell.next_mark() else {
            return Ok(MarkOutcome::NoChange);
        };
        log::trace!("Mark {:?}: {:?} -> {:?}", coords, *cell, next);
        *cell = next;
        self.flagged_count = self.flagged_count.saturating_add_signed(flag_delta.into());
        Ok(MarkOutcome::Changed)
    }

    /// Status derived from the board alone.
    pub fn evaluate(&self) -> Status {
        let Some(mine_field) = &self.mine_field else {
            return Status::InProgress;
        };
        if self.triggered_mine.is_some() {
            return Status::Lost;
        }

        let mut safe_left = false;
        for ((x, y), cell) in self.cells.indexed_iter() {
            match (cell.is_revealed(), mine_field.contains_mine((x as Coord, y as Coord))) {
                (true, true) => return Status::Lost,
                (false, false) => safe_left = true,
                _ => {}
            }
        }

        if safe_left {
            Status::InProgress
        } else {
            Status::Won
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_game(self)
    }

    /// Every mine and count uncovered, `None` until the field exists.
    pub fn solution(&self) -> Option<Snapshot> {
        self.mine_field.as_ref().map(Snapshot::from_mine_field)
    }
}

/// Reveals `start` and every cell reachable through zero counts, returns how many cells were opened.
fn flood_reveal(mine_field: &MineField, cells: &mut Array2<CellState>, start: Coord2) -> usize {
    let mut opened = 0;
    let mut to_visit = VecDeque::from([start]);

    while let Some(coords) = to_visit.pop_front() {
        let cell = &mut cells[coords.to_nd_index()];
        // queued more than once, or flagged
        if !cell.is_openable() {
            continue;
        }
        *cell = CellState::Revealed;
        opened += 1;

        if mine_field.count_at(coords) == Some(0) {
            to_visit.extend(
                mine_field
                    .iter_neighbors(coords)
                    .filter(|pos| cells[pos.to_nd_index()].is_openable()),
            );
        }
    }

    log::trace!("Flood from {:?} opened {} cell(s)", start, opened);
    opened
}

/// Opens the neighbors of a satisfied revealed cell, one level only. Returns the first mine opened, if any.
fn chord_reveal(
    mine_field: &MineField,
    cells: &mut Array2<CellState>,
    coords: Coord2,
) -> Option<Coord2> {
    let count = mine_field.count_at(coords)?;
    let flagged = mine_field
        .iter_neighbors(coords)
        .filter(|pos| cells[pos.to_nd_index()] == CellState::Flagged)
        .count();
    if flagged != usize::from(count) {
        return None;
    }

    let mut hit = None;
    for pos in mine_field.iter_neighbors(coords) {
        let cell = &mut cells[pos.to_nd_index()];
        if cell.is_openable() {
            *cell = CellState::Revealed;
            if mine_field.contains_mine(pos) {
                hit.get_or_insert(pos);
            }
        }
    }
    log::trace!("Chord on {:?}, mine hit: {:?}", coords, hit);
    hit
}
