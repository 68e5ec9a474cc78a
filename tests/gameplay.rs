use gridsnake::game::Phase;
use gridsnake::input::InputLatch;
use gridsnake::{Cell, Config, Direction, Direction::*, GameState, Outcome, Snake};
use rand::{rngs::{mock::StepRng, StdRng}, seq::SliceRandom, SeedableRng};

fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
    raw.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

fn game(width: i32, height: i32, length: usize, seed: u64) -> GameState {
    GameState::with_seed(&Config::new(width, height, length), seed).unwrap()
}

#[test]
fn reversal_after_turning_up_runs_into_the_wall() {
    let mut state = game(10, 10, 3, 11);
    assert_eq!(state.snake().body(), cells(&[(2, 0), (1, 0), (0, 0)]).as_slice());

    assert_eq!(state.step(Some(Up)), Outcome::Collided);
    assert_eq!(state.snake().head(), Cell::new(2, -1));
    assert!(!state.is_alive());

    assert_eq!(state.step(Some(Down)), Outcome::AlreadyTerminated);
    assert_eq!(state.snake().direction(), Up);
    assert_eq!(state.snake().head(), Cell::new(2, -1));
}

#[test]
fn reversal_is_ignored_mid_board() {
    let mut state = game(10, 10, 3, 5);
    state.arrange(Snake::from_cells(cells(&[(5, 5), (4, 5), (3, 5)]), Right).unwrap(), Cell::new(0, 9)).unwrap();

    assert_eq!(state.step(Some(Up)), Outcome::Moved);
    assert_eq!(state.snake().head(), Cell::new(5, 4));

    assert_eq!(state.step(Some(Down)), Outcome::Moved);
    assert_eq!(state.snake().direction(), Up);
    assert_eq!(state.snake().head(), Cell::new(5, 3));
}

#[test]
fn eating_next_to_the_head() {
    let mut state = game(10, 10, 3, 21);
    state.arrange(Snake::new(3), Cell::new(2, 1)).unwrap();

    assert_eq!(state.step(Some(Down)), Outcome::Ate);
    assert_eq!(state.snake().len(), 4);
    assert_eq!(state.snake().body(), cells(&[(2, 1), (2, 0), (1, 0), (1, 0)]).as_slice());

    let food = state.food().unwrap();
    assert_ne!(food, Cell::new(2, 1));
    assert!(!state.snake().contains(food));

    // The duplicated tail peels off on the next move
    state.arrange(state.snake().clone(), Cell::new(9, 9)).unwrap();
    assert_eq!(state.step(None), Outcome::Moved);
    assert_eq!(state.snake().body(), cells(&[(2, 2), (2, 1), (2, 0), (1, 0)]).as_slice());
}

#[test]
fn tight_loop_bites_the_body() {
    let mut state = game(10, 10, 5, 3);
    state.arrange(Snake::new(5), Cell::new(9, 9)).unwrap();

    assert_eq!(state.step(Some(Down)), Outcome::Moved);
    assert_eq!(state.step(Some(Left)), Outcome::Moved);
    assert_eq!(state.step(Some(Up)), Outcome::Collided);

    assert_eq!(state.phase(), Phase::Crashed);
    assert_eq!(state.snake().head(), Cell::new(3, 0));
}

#[test]
fn following_the_tail_is_not_a_collision() {
    let mut state = game(4, 4, 4, 9);
    state.arrange(Snake::from_cells(cells(&[(0, 1), (1, 1), (1, 0), (0, 0)]), Left).unwrap(), Cell::new(3, 3)).unwrap();

    // The head enters the cell the tail is leaving on the same tick
    assert_eq!(state.step(Some(Up)), Outcome::Moved);
    assert_eq!(state.snake().head(), Cell::new(0, 0));
}

#[test]
fn dead_game_stays_put() {
    let mut state = game(6, 6, 2, 8);
    while state.step(None) != Outcome::Collided {}

    let first = state.clone();
    assert_eq!(state.step(Some(Down)), Outcome::AlreadyTerminated);
    let second = state.clone();
    assert_eq!(state.step(Some(Down)), Outcome::AlreadyTerminated);

    assert_eq!(first, second);
    assert_eq!(second, state);
}

#[test]
fn circling_a_tiny_board_fills_it() {
    let mut state = GameState::new(&Config::new(2, 2, 1), StepRng::new(0, 1 << 60)).unwrap();
    let mut outcome = Outcome::Moved;

    for _ in 0..20 {
        let head = state.snake().head();
        let dir = match (head.x, head.y) {
            (0, 0) => Right,
            (1, 0) => Down,
            (1, 1) => Left,
            _ => Up,
        };
        outcome = state.step(Some(dir));
        if outcome != Outcome::Moved && outcome != Outcome::Ate {
            break;
        }
    }

    assert_eq!(outcome, Outcome::BoardFull);
    assert_eq!(state.phase(), Phase::Won);
    assert_eq!(state.snake().len(), 4);
    assert_eq!(state.food(), None);
    assert_eq!(state.score(), 3);
    assert_eq!(state.step(Some(Right)), Outcome::AlreadyTerminated);
}

#[test]
fn random_play_keeps_invariants() {
    let mut steering = StdRng::seed_from_u64(2024);
    let directions = [Up, Down, Left, Right];

    for seed in 0..50 {
        let mut state = game(12, 8, 4, seed);

        for _ in 0..500 {
            let before_len = state.snake().len();
            let before_dir = state.snake().direction();
            let requested: Option<Direction> = directions.choose(&mut steering).copied();

            let outcome = state.step(requested);
            let after = state.snake();

            assert_ne!(after.direction(), before_dir.opposite());
            match outcome {
                Outcome::Moved => assert_eq!(after.len(), before_len),
                Outcome::Ate => assert_eq!(after.len(), before_len + 1),
                Outcome::Collided => {
                    let head = after.head();
                    assert!(!head.in_bounds(12, 8) || after.body()[1..].contains(&head));
                    assert!(!state.is_alive());
                    break;
                }
                Outcome::BoardFull => break,
                Outcome::AlreadyTerminated => panic!("stepped a finished game"),
            }

            assert!(after.head().in_bounds(12, 8));
            let food = state.food().unwrap();
            assert!(!after.contains(food));
        }
    }
}

#[test]
fn same_seed_same_game() {
    let inputs = [None, Some(Down), None, Some(Right), Some(Down), None, Some(Left), None];
    let mut a = game(16, 16, 5, 77);
    let mut b = game(16, 16, 5, 77);

    for input in inputs.iter().copied() {
        assert_eq!(a.step(input), b.step(input));
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn latch_feeds_only_the_latest_turn() {
    let mut state = game(10, 10, 3, 4);
    state.arrange(Snake::from_cells(cells(&[(5, 5), (4, 5), (3, 5)]), Right).unwrap(), Cell::new(0, 9)).unwrap();
    let mut latch = InputLatch::new();

    // Up then Left between two ticks: only Left counts, and it is a reversal
    latch.request(Up);
    latch.request(Left);
    assert_eq!(state.step(latch.take()), Outcome::Moved);
    assert_eq!(state.snake().head(), Cell::new(6, 5));

    assert_eq!(state.step(latch.take()), Outcome::Moved);
    assert_eq!(state.snake().head(), Cell::new(7, 5));
}
