use alloc::collections::VecDeque;
use core::num::Saturating;
use core::ops::BitOr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::grid_size;
use crate::*;

/// Valid transitions:
/// - Uninitialized -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Uninitialized (teardown)
/// - any -> Playing (initialize)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Uninitialized,
    Playing,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game session: the packed grid, the flag index and the undo log.
///
/// Every player command pushes exactly one undo batch per cell-opening or
/// flagging action, so `undo` always reverts whole actions.
#[derive(Clone, Debug, Default)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: Saturating<CellCount>,
    flags: FlagIndex,
    undo_log: UndoLog,
    state: BoardState,
}

impl Board {
    pub fn new(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let mut board = Self::default();
        board.initialize(config, generator)?;
        Ok(board)
    }

    pub fn new_random(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let config = GameConfig::new(size, 0);
        Self::new(config, FixedMinefieldGenerator::new(mine_coords.iter().copied()))
    }

    /// Starts a new session, reusing the grid allocation when the size matches.
    ///
    /// Nothing is touched unless the config and the generated layout are valid.
    pub fn initialize(
        &mut self,
        config: GameConfig,
        generator: impl MinefieldGenerator,
    ) -> Result<()> {
        let config = config.validate()?;
        let (width, height) = config.size;

        let mine_coords = generator.mine_coords(config);
        if mine_coords.iter().any(|&(x, y)| x >= width || y >= height) {
            return Err(GameError::InvalidCoords);
        }
        let mine_count = CellCount::try_from(mine_coords.len())
            .ok()
            .filter(|&count| count < config.total_cells())
            .ok_or(GameError::TooManyMines)?;

        self.flags.clear();
        self.undo_log.clear();
        self.revealed_count = Saturating(0);
        self.mine_count = mine_count;

        let shape = config.size.to_nd_index();
        if self.cells.shape() == shape {
            self.cells.fill(Cell::EMPTY);
        } else {
            self.cells = Array2::default(shape);
        }

        for coords in mine_coords {
            self.place_mine(coords);
        }

        self.state = BoardState::Playing;
        log::debug!(
            "Initialized {}x{} board with {} mines",
            width,
            height,
            mine_count
        );
        Ok(())
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.size(), self.mine_count)
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flag_count(&self) -> usize {
        self.flags.len()
    }

    /// How many mines have not been flagged yet, negative with too many flags
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flags.len() as isize)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_log.depth()
    }

    pub fn undo_batches(&self) -> usize {
        self.undo_log.batches()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn flags(&self) -> &FlagIndex {
        &self.flags
    }

    /// Flagged coordinates, most recently flagged first.
    pub fn list_flags(&self) -> FlagIter<'_> {
        self.flags.iter()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn check_victory(&self) -> bool {
        self.state != BoardState::Uninitialized
            && self.revealed_count.0 == self.config().safe_cells()
    }

    /// Opens a hidden cell, flood filling from it when it has no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_playing()?;
        let coords = self.validate_coords(coords)?;

        let outcome = self.reveal_cell(coords);
        Ok(self.settle(outcome))
    }

    /// Opens every hidden neighbor of a numbered cell once enough of its
    /// neighbors are flagged.
    ///
    /// Each opened neighbor is its own undo batch.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_playing()?;
        let coords = self.validate_coords(coords)?;

        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_revealed() || cell.is_mine() || cell.adjacent_count() == 0 {
            return Ok(RevealOutcome::NoChange);
        }
        if self.count_flagged_neighbors(coords) < cell.adjacent_count() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self
            .cells
            .iter_neighbors(coords)
            .map(|neighbor_coords| self.reveal_cell(neighbor_coords))
            .fold(RevealOutcome::NoChange, BitOr::bitor);
        Ok(self.settle(outcome))
    }

    /// Flags or unflags a cell, revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_playing()?;
        let coords = self.validate_coords(coords)?;

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        self.undo_log.push(coords, cell, true);
        let flagged = !cell.is_flagged();
        self.cells[coords.to_nd_index()] = cell.with_flagged(flagged);
        if flagged {
            self.flags.add(coords);
        } else {
            self.flags.remove(coords);
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reverts the last player action, `Ok(false)` when there is none.
    pub fn undo(&mut self) -> Result<bool> {
        self.check_playing()?;

        let Self {
            cells,
            flags,
            undo_log,
            revealed_count,
            ..
        } = self;
        let performed = undo_log.undo_batch(|coords, prior| {
            restore_cell(cells, flags, revealed_count, coords, prior)
        });

        if performed {
            log::debug!("Undo performed, {} actions left", self.undo_log.batches());
        }
        Ok(performed)
    }

    /// Opens the whole field once the game is lost, not undoable.
    pub fn reveal_all(&mut self) {
        self.cells.map_inplace(|cell| *cell = cell.with_revealed(true));
        self.revealed_count = Saturating(self.config().total_cells());
    }

    /// Undoes everything, then releases the grid and the flag index.
    pub fn teardown(&mut self) {
        let Self {
            cells,
            flags,
            undo_log,
            revealed_count,
            ..
        } = self;
        let undone = undo_log.drain(|coords, prior| {
            restore_cell(cells, flags, revealed_count, coords, prior)
        });
        log::debug!("Teardown reverted {} actions", undone);

        *self = Self::default();
    }

    fn place_mine(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        *cell = cell.with_mine(true);

        for pos in self.cells.iter_neighbors(coords) {
            let neighbor = &mut self.cells[pos.to_nd_index()];
            if !neighbor.is_mine() {
                *neighbor = neighbor.with_adjacent_count(neighbor.adjacent_count() + 1);
            }
        }
    }

    /// Opens one hidden cell as a new undo batch, flooding through empty cells.
    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return RevealOutcome::NoChange;
        }

        self.undo_log.push(coords, cell, true);
        self.open(coords, cell);

        if cell.is_mine() {
            return RevealOutcome::HitMine;
        }
        if cell.adjacent_count() != 0 {
            return RevealOutcome::Revealed;
        }

        let mut frontier = VecDeque::from([coords]);
        log::trace!("Starting flood-fill from {:?}", coords);

        while let Some(current) = frontier.pop_front() {
            for pos in self.cells.iter_neighbors(current) {
                let neighbor = self.cells[pos.to_nd_index()];
                if !neighbor.is_hidden() {
                    continue;
                }

                self.undo_log.push(pos, neighbor, false);
                self.open(pos, neighbor);
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    pos,
                    neighbor.adjacent_count()
                );

                if neighbor.is_empty_safe() {
                    frontier.push_back(pos);
                }
            }
        }

        RevealOutcome::Revealed
    }

    fn open(&mut self, coords: Coord2, cell: Cell) {
        self.cells[coords.to_nd_index()] = cell.with_revealed(true);
        self.revealed_count += 1;
    }

    /// Applies the state transition a reveal outcome implies.
    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        match outcome {
            RevealOutcome::HitMine => {
                self.state = BoardState::Lost;
                log::debug!("Mine hit, game lost");
                RevealOutcome::HitMine
            }
            RevealOutcome::Revealed | RevealOutcome::Won if self.check_victory() => {
                self.state = BoardState::Won;
                log::debug!("All safe cells revealed, game won");
                RevealOutcome::Won
            }
            outcome => outcome,
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_flagged())
            .count() as u8
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }
}

/// Writes `prior` back into the grid, keeping the flag index and the revealed
/// counter in step with the change.
fn restore_cell(
    cells: &mut Array2<Cell>,
    flags: &mut FlagIndex,
    revealed_count: &mut Saturating<CellCount>,
    coords: Coord2,
    prior: Cell,
) {
    let current = cells[coords.to_nd_index()];

    match (current.is_revealed(), prior.is_revealed()) {
        (true, false) => *revealed_count -= 1,
        (false, true) => *revealed_count += 1,
        _ => {}
    }

    match (current.is_flagged(), prior.is_flagged()) {
        (true, false) => {
            flags.remove(coords);
        }
        (false, true) => flags.add(coords),
        _ => {}
    }

    cells[coords.to_nd_index()] = prior;
}
