use quintris_engine::{ClearReport, GameEvent, GameSession, Line, QueueSeed};

fn seed() -> QueueSeed {
    "000102030405060708090a0b0c0d0e0f".parse().unwrap()
}

fn place(session: &mut GameSession, column: usize, row: usize) -> ClearReport {
    session.cell_activated(column, row).unwrap()
}

#[test]
fn test_scripted_game_accumulates_score() {
    let mut session = GameSession::with_seed(5, 5, seed());
    session.start();

    // Row 0, one cell at a time; the fifth placement completes it
    for column in 0..4 {
        assert!(place(&mut session, column, 0).is_empty());
    }
    let report = place(&mut session, 4, 0);
    assert_eq!(report.lines(), [Line::Row(0)]);
    assert_eq!(report.cell_credit(), 5);
    assert_eq!(session.score(), 50);
    assert_eq!(session.multiplier(), 2);
    assert_eq!(session.score_to_next_level(), 950);

    // Column 0 next; the clear-less placements reset the multiplier first
    for row in 1..5 {
        assert!(place(&mut session, 0, row).is_empty());
    }
    assert_eq!(session.multiplier(), 1);
    let report = place(&mut session, 0, 0);
    assert_eq!(report.lines(), [Line::Column(0)]);
    assert_eq!(session.score(), 100);
    assert_eq!(session.multiplier(), 2);
    assert_eq!(session.score_to_next_level(), 900);

    // Stage row 0 and column 0 together; (0, 0) completes both at once
    for row in 1..5 {
        place(&mut session, 0, row);
    }
    for column in 1..5 {
        place(&mut session, column, 0);
    }
    let report = place(&mut session, 0, 0);
    assert_eq!(report.lines(), [Line::Row(0), Line::Column(0)]);
    assert_eq!(report.cell_credit(), 9);
    assert_eq!(session.score(), 280);
    assert_eq!(session.multiplier(), 3);
    assert_eq!(session.score_to_next_level(), 720);
    assert_eq!(session.level(), 0);
    assert_eq!(session.lives(), 3);

    // Every clear emptied the cells it touched
    for row in 0..5 {
        for column in 0..5 {
            assert!(!session.grid().is_occupied(column, row).unwrap());
        }
    }

    let events = session.take_events();
    let placed = events
        .iter()
        .filter(|event| matches!(event, GameEvent::PiecePlaced { .. }))
        .count();
    let queue_changed = events
        .iter()
        .filter(|event| matches!(event, GameEvent::QueueChanged))
        .count();
    let cleared: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::LinesCleared(count) => Some(*count),
            _ => None,
        })
        .collect();
    assert_eq!(placed, 19);
    assert_eq!(queue_changed, 19);
    assert_eq!(cleared, [1, 1, 2]);
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::LevelUp(_)))
    );
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let mut a = GameSession::with_seed(5, 5, seed());
    let mut b = GameSession::with_seed(5, 5, seed());
    a.start();
    b.start();

    assert_eq!(a.current_piece(), b.current_piece());
    assert_eq!(a.following_piece(), b.following_piece());

    for (column, row) in [(0, 0), (3, 2), (4, 4), (1, 3)] {
        a.rotate_current_piece();
        b.rotate_current_piece();
        a.swap_pieces();
        b.swap_pieces();
        place(&mut a, column, row);
        place(&mut b, column, row);
        assert_eq!(a.current_piece(), b.current_piece());
        assert_eq!(a.following_piece(), b.following_piece());
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.score(), b.score());
    }
}

#[test]
fn test_lives_exhaustion_and_restart() {
    let mut session = GameSession::with_seed(5, 5, seed());
    session.start();
    place(&mut session, 2, 2);
    session.take_events();

    session.lose_life();
    session.lose_life();
    assert_eq!(session.lives(), 1);
    assert!(session.session_state().is_active());

    session.lose_life();
    assert_eq!(session.lives(), 0);
    assert!(session.session_state().is_game_over());
    assert_eq!(session.take_events(), [GameEvent::GameOver]);
    assert!(session.cell_activated(0, 0).is_err());

    session.start();
    assert!(session.session_state().is_active());
    assert_eq!(session.score(), 0);
    assert_eq!(session.lives(), 3);
    assert_eq!(session.multiplier(), 1);
    assert!(!session.grid().is_occupied(2, 2).unwrap());

    // The machine plays again after a restart
    for column in 0..5 {
        place(&mut session, column, 4);
    }
    assert_eq!(session.score(), 50);
}

#[test]
fn test_level_up_on_small_grid() {
    let mut session = GameSession::with_seed(3, 3, seed());
    session.start();

    for _ in 0..20 {
        place(&mut session, 0, 0);
        place(&mut session, 1, 0);
        let report = place(&mut session, 2, 0);
        assert_eq!(report.lines(), [Line::Row(0)]);
    }

    assert_eq!(session.score(), 1000);
    assert_eq!(session.level(), 1);
    assert_eq!(session.score_to_next_level(), 1000);

    let events = session.take_events();
    let level_ups: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::LevelUp(level) => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(level_ups, [1]);
}

#[test]
fn test_rectangular_grid_uses_shorter_dimension() {
    let mut session = GameSession::with_seed(7, 4, seed());
    session.start();

    // Main diagonal has min(7, 4) = 4 cells
    place(&mut session, 0, 0);
    place(&mut session, 1, 1);
    place(&mut session, 2, 2);
    let report = place(&mut session, 3, 3);
    assert_eq!(report.lines(), [Line::DiagonalMain]);
    assert_eq!(session.score(), 50);

    // Column 5 is beyond the candidate range and never clears
    for row in 0..4 {
        assert!(place(&mut session, 5, row).is_empty());
    }
    assert_eq!(session.score(), 50);
    assert_eq!(session.grid().get(5, 0).unwrap(), 1);

    // A row completes over its first four columns only
    place(&mut session, 0, 0);
    place(&mut session, 1, 0);
    place(&mut session, 2, 0);
    let report = place(&mut session, 3, 0);
    assert_eq!(report.lines(), [Line::Row(0)]);
    assert_eq!(session.score(), 100);
    // The clear leaves the out-of-range columns alone
    assert_eq!(session.grid().get(5, 0).unwrap(), 1);
}
