use std::mem;

use crate::{CellActivationError, Grid, core::piece::GamePiece};

use super::{
    line_clear::{self, ClearReport},
    piece_queue::{PieceQueue, QueueSeed},
    progress::GameProgress,
};

/// Lifecycle of one game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Created but not yet started.
    Idle,
    /// A game is in progress.
    Active,
    /// The player has run out of lives.
    GameOver,
}

/// Something the session wants collaborators (display, audio) to react to.
///
/// Events accumulate inside the session in the order they happen and are
/// handed over through [`GameSession::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A placement completed at the given cell.
    PiecePlaced { column: usize, row: usize },
    /// The piece queue changed through an advance or a swap.
    QueueChanged,
    /// The given number of lines cleared at once.
    LinesCleared(usize),
    /// The player reached the given level.
    LevelUp(usize),
    /// The last life was lost.
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    queue: PieceQueue,
    progress: GameProgress,
    session_state: SessionState,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an idle session with an empty grid of the given dimensions.
    ///
    /// Call [`Self::start`] to begin playing. For deterministic piece
    /// generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self::build(columns, rows, PieceQueue::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(columns: usize, rows: usize, seed: QueueSeed) -> Self {
        Self::build(columns, rows, PieceQueue::with_seed(seed))
    }

    fn build(columns: usize, rows: usize, queue: PieceQueue) -> Self {
        Self {
            grid: Grid::new(columns, rows),
            queue,
            progress: GameProgress::new(),
            session_state: SessionState::Idle,
            events: Vec::new(),
        }
    }

    /// Starts a new game, or restarts one already underway.
    ///
    /// The grid empties, progress resets, and pending events are dropped. On
    /// a restart the queue also deals two fresh pieces; the first start keeps
    /// the pieces dealt at construction, so a seeded session stays fully
    /// reproducible.
    pub fn start(&mut self) {
        if !self.session_state.is_idle() {
            self.queue.refill();
        }
        self.grid.reset();
        self.progress = GameProgress::new();
        self.events.clear();
        self.session_state = SessionState::Active;
    }

    /// Plays one placement at `(column, row)`.
    ///
    /// The cell's value increments (wrapping to empty past the highest piece
    /// colour), the queue advances, completed lines clear, and the player's
    /// progress absorbs the result. Events are recorded in that order.
    ///
    /// Returns the line-clear report for this placement.
    pub fn cell_activated(
        &mut self,
        column: usize,
        row: usize,
    ) -> Result<ClearReport, CellActivationError> {
        if !self.session_state.is_active() {
            return Err(CellActivationError::SessionNotActive);
        }

        let value = self
            .grid
            .get(column, row)
            .map_err(CellActivationError::OutOfBounds)?;
        let next = if value >= Grid::MAX_CELL_VALUE {
            Grid::EMPTY_CELL
        } else {
            value + 1
        };
        self.grid
            .set(column, row, next)
            .map_err(CellActivationError::OutOfBounds)?;
        self.events.push(GameEvent::PiecePlaced { column, row });

        self.queue.advance();
        self.events.push(GameEvent::QueueChanged);

        let report = line_clear::clear_full_lines(&mut self.grid);
        if !report.is_empty() {
            self.events
                .push(GameEvent::LinesCleared(report.line_count()));
        }

        let level_before = self.progress.level();
        self.progress
            .apply_clear(report.line_count(), report.cell_credit());
        for level in level_before + 1..=self.progress.level() {
            self.events.push(GameEvent::LevelUp(level));
        }

        Ok(report)
    }

    /// Rotates the current piece 90° clockwise.
    pub fn rotate_current_piece(&mut self) {
        self.queue.rotate_current();
    }

    /// Exchanges the current and following pieces.
    pub fn swap_pieces(&mut self) {
        self.queue.swap();
        self.events.push(GameEvent::QueueChanged);
    }

    /// Removes one life. Losing the last life ends the game.
    pub fn lose_life(&mut self) {
        if !self.session_state.is_active() {
            return;
        }
        self.progress.lose_life();
        if self.progress.lives() == 0 {
            self.session_state = SessionState::GameOver;
            self.events.push(GameEvent::GameOver);
        }
    }

    /// Grants one extra life.
    pub fn gain_life(&mut self) {
        self.progress.gain_life();
    }

    /// Drains and returns the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    #[must_use]
    pub fn current_piece(&self) -> GamePiece {
        self.queue.current_piece()
    }

    #[must_use]
    pub fn following_piece(&self) -> GamePiece {
        self.queue.following_piece()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.progress.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.progress.level()
    }

    #[must_use]
    pub fn lives(&self) -> usize {
        self.progress.lives()
    }

    #[must_use]
    pub fn multiplier(&self) -> usize {
        self.progress.multiplier()
    }

    #[must_use]
    pub fn score_to_next_level(&self) -> usize {
        self.progress.score_to_next_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Line;

    fn seed() -> QueueSeed {
        "0123456789abcdef0123456789abcdef".parse().unwrap()
    }

    fn started_session() -> GameSession {
        let mut session = GameSession::with_seed(5, 5, seed());
        session.start();
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let mut session = GameSession::new(5, 5);
        assert!(session.session_state().is_idle());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 0);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.grid(), &Grid::new(5, 5));
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_activation_requires_active_session() {
        let mut session = GameSession::new(5, 5);

        let err = session.cell_activated(0, 0).unwrap_err();
        assert!(matches!(err, CellActivationError::SessionNotActive));
        assert_eq!(err.to_string(), "no active game session");

        session.start();
        assert!(session.cell_activated(0, 0).is_ok());
    }

    #[test]
    fn test_out_of_bounds_activation_is_rejected() {
        let mut session = started_session();

        let err = session.cell_activated(5, 0).unwrap_err();
        assert!(matches!(err, CellActivationError::OutOfBounds(_)));
        assert_eq!(err.to_string(), "cell (5, 0) is outside the 5x5 grid");

        // The failed placement leaves no trace
        assert!(session.session_state().is_active());
        assert_eq!(session.grid(), &Grid::new(5, 5));
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_activation_wraps_cell_value() {
        let mut session = started_session();

        for expected in 1..=15 {
            session.cell_activated(0, 0).unwrap();
            assert_eq!(session.grid().get(0, 0).unwrap(), expected);
        }

        // The sixteenth activation wraps back to empty
        session.cell_activated(0, 0).unwrap();
        assert_eq!(session.grid().get(0, 0).unwrap(), Grid::EMPTY_CELL);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_placement_records_events_in_order() {
        let mut session = started_session();

        session.cell_activated(2, 3).unwrap();
        assert_eq!(
            session.take_events(),
            [
                GameEvent::PiecePlaced { column: 2, row: 3 },
                GameEvent::QueueChanged,
            ]
        );
    }

    #[test]
    fn test_row_fill_clears_and_scores() {
        let mut session = started_session();

        for column in 0..4 {
            let report = session.cell_activated(column, 0).unwrap();
            assert!(report.is_empty());
        }
        session.take_events();

        let report = session.cell_activated(4, 0).unwrap();
        assert_eq!(report.lines(), [Line::Row(0)]);
        assert_eq!(report.cell_credit(), 5);

        assert_eq!(session.score(), 50);
        assert_eq!(session.multiplier(), 2);
        assert_eq!(session.score_to_next_level(), 950);
        assert_eq!(session.grid(), &Grid::new(5, 5));
        assert_eq!(
            session.take_events(),
            [
                GameEvent::PiecePlaced { column: 4, row: 0 },
                GameEvent::QueueChanged,
                GameEvent::LinesCleared(1),
            ]
        );
    }

    #[test]
    fn test_cross_clear_counts_both_lines() {
        let mut session = started_session();

        // Fill row 0 and column 0 except their shared corner
        for column in 1..5 {
            session.cell_activated(column, 0).unwrap();
        }
        for row in 1..5 {
            session.cell_activated(0, row).unwrap();
        }
        assert_eq!(session.score(), 0);
        session.take_events();

        // The corner completes both lines at once
        let report = session.cell_activated(0, 0).unwrap();
        assert_eq!(report.lines(), [Line::Row(0), Line::Column(0)]);
        assert_eq!(report.cell_credit(), 9);

        assert_eq!(session.score(), 180);
        assert_eq!(session.multiplier(), 3);
        assert_eq!(session.score_to_next_level(), 820);
        assert_eq!(session.grid(), &Grid::new(5, 5));
        assert_eq!(
            session.take_events(),
            [
                GameEvent::PiecePlaced { column: 0, row: 0 },
                GameEvent::QueueChanged,
                GameEvent::LinesCleared(2),
            ]
        );
    }

    #[test]
    fn test_level_up_event_after_twenty_row_clears() {
        let mut session = started_session();

        let mut events = Vec::new();
        for _ in 0..20 {
            for column in 0..5 {
                session.cell_activated(column, 0).unwrap();
            }
            events.extend(session.take_events());
        }

        // Each cycle clears one row at multiplier 1 for 50 points
        assert_eq!(session.score(), 1000);
        assert_eq!(session.level(), 1);
        assert_eq!(session.score_to_next_level(), 1000);

        let level_ups: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, GameEvent::LevelUp(_)))
            .collect();
        assert_eq!(level_ups, [&GameEvent::LevelUp(1)]);

        let clears = events
            .iter()
            .filter(|event| matches!(event, GameEvent::LinesCleared(_)))
            .count();
        assert_eq!(clears, 20);
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let mut left = GameSession::with_seed(5, 5, seed());
        let mut right = GameSession::with_seed(5, 5, seed());
        left.start();
        right.start();

        for column in 0..5 {
            assert_eq!(left.current_piece(), right.current_piece());
            assert_eq!(left.following_piece(), right.following_piece());
            left.cell_activated(column, 1).unwrap();
            right.cell_activated(column, 1).unwrap();
        }

        assert_eq!(left.grid(), right.grid());
        assert_eq!(left.score(), right.score());
    }

    #[test]
    fn test_swap_is_its_own_inverse() {
        let mut session = started_session();

        let current = session.current_piece();
        let following = session.following_piece();

        session.swap_pieces();
        assert_eq!(session.current_piece(), following);
        assert_eq!(session.following_piece(), current);

        session.swap_pieces();
        assert_eq!(session.current_piece(), current);
        assert_eq!(session.following_piece(), following);

        // Swapping never touches progress
        assert_eq!(session.score(), 0);
        assert_eq!(session.multiplier(), 1);
        assert_eq!(
            session.take_events(),
            [GameEvent::QueueChanged, GameEvent::QueueChanged]
        );
    }

    #[test]
    fn test_rotate_current_piece_cycles() {
        let mut session = started_session();

        let current = session.current_piece();
        session.rotate_current_piece();
        assert_eq!(session.current_piece().kind(), current.kind());
        assert_ne!(session.current_piece().rotation(), current.rotation());

        for _ in 0..3 {
            session.rotate_current_piece();
        }
        assert_eq!(session.current_piece(), current);
    }

    #[test]
    fn test_losing_all_lives_ends_the_game() {
        let mut session = started_session();

        session.lose_life();
        session.lose_life();
        assert_eq!(session.lives(), 1);
        assert!(session.session_state().is_active());
        session.take_events();

        session.lose_life();
        assert_eq!(session.lives(), 0);
        assert!(session.session_state().is_game_over());
        assert_eq!(session.take_events(), [GameEvent::GameOver]);

        // Once over, further losses neither refire the event nor underflow
        session.lose_life();
        assert_eq!(session.lives(), 0);
        assert!(session.take_events().is_empty());

        let err = session.cell_activated(0, 0).unwrap_err();
        assert!(matches!(err, CellActivationError::SessionNotActive));
    }

    #[test]
    fn test_lose_life_before_start_is_ignored() {
        let mut session = GameSession::new(5, 5);

        session.lose_life();
        assert_eq!(session.lives(), 3);
        assert!(session.session_state().is_idle());
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_gain_life() {
        let mut session = started_session();

        session.gain_life();
        assert_eq!(session.lives(), 4);
    }

    #[test]
    fn test_first_start_keeps_constructed_pieces() {
        let mut started = GameSession::with_seed(5, 5, seed());
        let fresh = GameSession::with_seed(5, 5, seed());

        started.start();
        assert_eq!(started.current_piece(), fresh.current_piece());
        assert_eq!(started.following_piece(), fresh.following_piece());
    }

    #[test]
    fn test_restart_resets_the_session() {
        let mut session = started_session();

        for column in 0..5 {
            session.cell_activated(column, 0).unwrap();
        }
        session.cell_activated(2, 2).unwrap();
        session.lose_life();
        assert_ne!(session.score(), 0);

        session.start();
        assert!(session.session_state().is_active());
        assert_eq!(session.grid(), &Grid::new(5, 5));
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 0);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.score_to_next_level(), 1000);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = started_session();

        session.lose_life();
        session.lose_life();
        session.lose_life();
        assert!(session.session_state().is_game_over());

        session.start();
        assert!(session.session_state().is_active());
        assert_eq!(session.lives(), 3);
        assert!(session.cell_activated(0, 0).is_ok());
    }

    #[test]
    fn test_restart_deals_fresh_pieces_deterministically() {
        let mut restarted = GameSession::with_seed(5, 5, seed());
        let mut advanced = GameSession::with_seed(5, 5, seed());
        restarted.start();
        advanced.start();

        // A restart consumes the same number of spawns as two placements
        restarted.start();
        advanced.cell_activated(0, 0).unwrap();
        advanced.cell_activated(1, 0).unwrap();

        assert_eq!(restarted.current_piece(), advanced.current_piece());
        assert_eq!(restarted.following_piece(), advanced.following_piece());
    }
}
