use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Uninitialized -> Generating
/// - Generating -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Generating, on reset
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Uninitialized,
    Generating,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Uninitialized
    }
}

/// A minefield together with its reveal state, from generation to a win or a loss.
pub struct Board<G = RandomMinefieldGenerator> {
    config: GameConfig,
    generator: G,
    cells: Array2<Cell>,
    mine_count: CellCount,
    opened_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: GameState,
    triggered_mine: Option<Coord2>,
    generation: u32,
    observers: Vec<Box<dyn BoardObserver + Send>>,
}

impl Board<RandomMinefieldGenerator> {
    /// Generates a random board, `seed` fixes this board and every layout drawn on reset.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }
}

impl Board<PresetMinefieldGenerator> {
    /// Board with mines exactly where `layout` puts them, resets keep the same layout.
    pub fn with_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        Self::build(config, PresetMinefieldGenerator::new(layout))
    }
}

impl<G: MinefieldGenerator> Board<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, generator))
    }

    fn build(config: GameConfig, generator: G) -> Self {
        let mut board = Self {
            config,
            generator,
            cells: Array2::default(config.size.to_nd_index()),
            mine_count: 0,
            opened_count: Saturating(0),
            flagged_count: Saturating(0),
            state: GameState::Uninitialized,
            triggered_mine: None,
            generation: 0,
            observers: Vec::new(),
        };
        board.generate();
        board
    }

    /// Throws the current grid away and generates a new one, whatever state the game is in.
    pub fn reset(&mut self) {
        log::debug!("Reset requested in state {:?}", self.state);
        self.generate();
        self.emit(BoardEvent::Reset {
            generation: self.generation,
        });
    }

    fn generate(&mut self) {
        self.state = GameState::Generating;

        let layout = self.generator.generate(&self.config);
        let size = layout.size();
        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());

        for coords in layout.mine_coords() {
            cells[coords.to_nd_index()].set_mine();
        }

        for coords in iter_coords(size) {
            if cells[coords.to_nd_index()].is_mine() {
                continue;
            }
            let count = NeighborIter::new(coords, size)
                .filter(|&pos| cells[pos.to_nd_index()].is_mine())
                .count() as u8;
            cells[coords.to_nd_index()].set_mine_count(count);
        }

        self.config.size = size;
        self.cells = cells;
        self.mine_count = layout.mine_count();
        self.opened_count = Saturating(0);
        self.flagged_count = Saturating(0);
        self.triggered_mine = None;
        self.generation = self.generation.wrapping_add(1);
        self.state = GameState::Playing;

        log::debug!(
            "Generated board #{}: {}x{} with {} mines",
            self.generation,
            size.0,
            size.1,
            self.mine_count
        );
    }

    pub fn subscribe(&mut self, observer: impl BoardObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.total_cells() - self.mine_count
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count.0 as isize)
    }

    /// Safe cells opened so far.
    pub fn opened_count(&self) -> CellCount {
        self.opened_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Increments on every generation, including the first one.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(BoardError::InvalidCoords)
        }
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.view_at(coords))
    }

    /// Views of every cell, row by row.
    pub fn cell_views(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        iter_coords(self.size()).map(move |coords| (coords, self.view_at(coords)))
    }

    /// Mine positions, only handed out once the game is over.
    pub fn mine_coords(&self) -> Option<Vec<Coord2>> {
        if !self.is_finished() {
            return None;
        }
        Some(
            iter_coords(self.size())
                .filter(|&coords| self.cells[coords.to_nd_index()].is_mine())
                .collect(),
        )
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_open() {
            return Err(BoardError::CellAlreadyOpen);
        }

        let flagged = cell.toggle_flag();
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::debug!("Flag at {coords:?}: {flagged}");
        self.emit(BoardEvent::FlagToggled { coords, flagged });

        Ok(if flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        })
    }

    pub fn open_cell(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        let outcome = match self.open_single_cell(coords) {
            CellOpen::AlreadyOpen => return Ok(OpenOutcome::AlreadyOpen),
            CellOpen::RevealedMine => {
                self.end_game(Some(coords));
                return Ok(OpenOutcome::Mine);
            }
            CellOpen::RevealedEmpty(0) => OpenOutcome::Cascade(self.flood_fill(coords)),
            CellOpen::RevealedEmpty(count) => OpenOutcome::Cleared(count),
        };

        // checked once per request, not per flooded cell
        if self.opened_count.0 == self.safe_cell_count() {
            self.end_game(None);
        }

        Ok(outcome)
    }

    /// Opens every cell reachable from the zero-count cell at `start` through other zero-count
    /// cells. `start` must already be open.
    fn flood_fill(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut opened = Vec::from([start]);
        let mut to_visit: VecDeque<_> = self.closed_safe_neighbors(start).collect();
        log::trace!("Starting flood-fill from {start:?}, initial neighbors: {to_visit:?}");

        while let Some(visit_coords) = to_visit.pop_front() {
            // queued more than once, the open guard skips the repeats
            let CellOpen::RevealedEmpty(count) = self.open_single_cell(visit_coords) else {
                continue;
            };
            opened.push(visit_coords);
            log::trace!("Flood opened cell at {visit_coords:?}, mine count: {count}");

            if count == 0 {
                let next: Vec<_> = self.closed_safe_neighbors(visit_coords).collect();
                to_visit.extend(next);
            }
        }

        log::debug!("Flood-fill from {start:?} opened {} cells", opened.len());
        opened
    }

    fn open_single_cell(&mut self, coords: Coord2) -> CellOpen {
        let cell = &mut self.cells[coords.to_nd_index()];
        let was_flagged = cell.is_flagged();
        let result = cell.open();

        if result == CellOpen::AlreadyOpen {
            return result;
        }
        if was_flagged {
            self.flagged_count -= 1;
        }
        if matches!(result, CellOpen::RevealedEmpty(_)) {
            self.opened_count += 1;
        }

        let view = self.view_at(coords);
        self.emit(BoardEvent::CellOpened { coords, view });
        result
    }

    fn closed_safe_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        NeighborIter::new(coords, self.size()).filter(move |&pos| {
            let cell = &self.cells[pos.to_nd_index()];
            !cell.is_open() && !cell.is_mine()
        })
    }

    /// Ends the game, lost when a mine was triggered and won otherwise.
    fn end_game(&mut self, triggered_mine: Option<Coord2>) {
        if self.state.is_finished() {
            return;
        }

        self.triggered_mine = triggered_mine;
        match triggered_mine {
            Some(coords) => {
                self.state = GameState::Lost;
                log::debug!("Game lost on board #{} at {coords:?}", self.generation);
                self.emit(BoardEvent::GameLost { coords });
            }
            None => {
                self.state = GameState::Won;
                log::debug!("Game won on board #{}", self.generation);
                self.emit(BoardEvent::GameWon);
            }
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(BoardError::GameOver)
        }
    }

    fn view_at(&self, coords: Coord2) -> CellView {
        CellView::of(&self.cells[coords.to_nd_index()], self.is_finished())
    }

    fn emit(&mut self, event: BoardEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl<G: fmt::Debug> fmt::Debug for Board<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("generator", &self.generator)
            .field("mine_count", &self.mine_count)
            .field("opened_count", &self.opened_count.0)
            .field("flagged_count", &self.flagged_count.0)
            .field("state", &self.state)
            .field("triggered_mine", &self.triggered_mine)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
