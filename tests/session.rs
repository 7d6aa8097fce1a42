use terminal_maze::{
    new_session, Cell, Direction, GameSession, MazeGenerator, MazeSize, MoveOutcome, Phase, Point,
    TimerState, ValidationError,
};

/// Directions along the unique path from start to end
fn solution(session: &GameSession) -> Vec<Direction> {
    let grid = session.grid();
    grid.shortest_path(grid.start(), grid.end())
        .expect("end should be reachable")
        .windows(2)
        .map(|step| Direction::between(step[0], step[1]).unwrap())
        .collect()
}

#[test]
fn requested_sizes_round_to_odd() {
    assert_eq!(new_session(10).unwrap().dimensions(), (11, 11));
    assert_eq!(new_session(49).unwrap().dimensions(), (49, 49));
    assert_eq!(new_session(50).unwrap().dimensions(), (51, 51));
}

#[test]
fn sizes_outside_bounds_are_validation_errors() {
    for size in [0, 1, 9, 51, 100] {
        assert!(
            matches!(
                new_session(size),
                Err(ValidationError::SizeOutOfRange { .. })
            ),
            "size {} should be rejected",
            size
        );
    }
}

#[test]
fn end_is_reachable_at_extreme_sizes() {
    let mut gen = MazeGenerator::new(Some(2024));
    for requested in [10, 11, 49, 50] {
        for _ in 0..10 {
            let session = GameSession::new(MazeSize::new(requested).unwrap(), &mut gen);
            let grid = session.grid();
            assert_eq!(grid.get(grid.start()), Some(Cell::Start));
            assert_eq!(grid.get(grid.end()), Some(Cell::End));
            assert!(grid.shortest_path(grid.start(), grid.end()).is_some());
        }
    }
}

#[test]
fn play_eleven_by_eleven_to_the_end() {
    let mut session = new_session(10).unwrap();
    assert_eq!(session.grid().start(), Point::new(1, 1));
    assert_eq!(session.grid().end(), Point::new(9, 9));

    let steps = solution(&session);
    let (last, walk) = steps.split_last().unwrap();
    for (i, step) in walk.iter().enumerate() {
        let outcome = session.apply_move(*step);
        assert!(matches!(outcome, MoveOutcome::Accepted(_)), "{:?}", outcome);
        if i == 0 {
            assert!(matches!(session.timer(), TimerState::Running(_)));
        }
    }
    assert_eq!(session.phase(), Phase::Playing);

    assert_eq!(session.apply_move(*last), MoveOutcome::Won(Point::new(9, 9)));
    assert_eq!(session.phase(), Phase::Won);
    assert_eq!(session.position(), Point::new(9, 9));
    assert_eq!(session.moves(), steps.len());
    let frozen = session.elapsed();
    assert!(matches!(session.timer(), TimerState::Stopped(_)));
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert_eq!(session.elapsed(), frozen);
}

#[test]
fn reset_is_idempotent_and_keeps_maze() {
    let mut session = new_session(21).unwrap();
    let before = session.grid().clone();
    let steps = solution(&session);

    for step in &steps[..steps.len() / 2] {
        session.apply_move(*step);
    }
    session.reset();
    let after_first = (session.position(), session.phase(), session.timer());
    session.reset();

    assert_eq!(after_first, (Point::new(1, 1), Phase::Playing, TimerState::NotStarted));
    assert_eq!(session.position(), Point::new(1, 1));
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.timer(), TimerState::NotStarted);
    assert_eq!(session.grid(), &before);

    for step in &steps {
        session.apply_move(*step);
    }
    assert_eq!(session.phase(), Phase::Won);
    session.reset();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.timer(), TimerState::NotStarted);
    assert_eq!(session.grid(), &before);
}

#[test]
fn new_maze_replaces_grid() {
    let mut gen = MazeGenerator::new(Some(5));
    let mut session = GameSession::new(MazeSize::new(15).unwrap(), &mut gen);
    for step in solution(&session) {
        session.apply_move(step);
    }
    assert_eq!(session.phase(), Phase::Won);
    let old = session.grid().clone();

    session.new_maze(MazeSize::new(30).unwrap(), &mut gen);
    assert_eq!(session.dimensions(), (31, 31));
    assert_ne!(session.grid(), &old);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.timer(), TimerState::NotStarted);
    assert_eq!(session.position(), Point::new(1, 1));
    assert_eq!(session.previous_position(), Point::new(1, 1));
}

#[test]
fn walls_never_accept_the_player() {
    let mut session = new_session(25).unwrap();
    let grid = session.grid().clone();

    // Up and left from the start lead into the outer wall
    assert_eq!(session.apply_move(Direction::Up), MoveOutcome::Rejected);
    assert_eq!(session.apply_move(Direction::Left), MoveOutcome::Rejected);
    assert_eq!(session.timer(), TimerState::NotStarted);

    for point in grid.open_cells() {
        for direction in Direction::ALL {
            let (dr, dc) = direction.delta();
            let target = point.offset(dr, dc).and_then(|p| grid.get(p));
            let outcome = terminal_maze::resolve(&grid, point, direction);
            match target {
                None | Some(Cell::Wall) => assert_eq!(outcome, MoveOutcome::Rejected),
                Some(Cell::End) => assert!(matches!(outcome, MoveOutcome::Won(_))),
                Some(_) => assert!(matches!(outcome, MoveOutcome::Accepted(_))),
            }
        }
    }
}
