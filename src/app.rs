use color_eyre::{eyre::eyre, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use gridsnake::input::InputLatch;
use gridsnake::pacing::{Clock, FramePacer, SystemClock};
use gridsnake::{Cell, Config, Direction::{*, self}, GameState, Outcome, Snapshot};

use crate::term::{Board, TermManager};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = '●';
const DEAD_SNAKE_CHAR: char = 'X';

const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const DEAD_SNAKE_COLOR: Color = Color::DarkGrey;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Pause,
    Quit,
}

/// Whether the player wants another round.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct SnakeGame {
    config: Config,
    paused: bool,
    term: TermManager,
    board: Board,
    rng: StdRng,
    pacer: FramePacer,
    clock: SystemClock,
    drawn: Vec<Cell>,
}

impl SnakeGame {
    /// Checks the terminal can hold the grid. Nothing is drawn yet.
    pub fn new(config: Config, seed: u64) -> Result<Self> {
        config.validate()?;

        let term = TermManager::new()?;
        let term_size = term.get_terminal_size();
        let board = Board::centered(term_size, config.grid_width, config.grid_height).ok_or_else(|| {
            let (need_w, need_h) = Board::required_size(config.grid_width, config.grid_height);
            eyre!(
                "terminal is {}x{} but a {}x{} grid needs at least {}x{}",
                term_size.0, term_size.1, config.grid_width, config.grid_height, need_w, need_h
            )
        })?;

        Ok(SnakeGame {
            config,
            paused: false,
            term,
            board,
            rng: StdRng::seed_from_u64(seed),
            pacer: FramePacer::new(config.tick_interval),
            clock: SystemClock,
            drawn: vec![],
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        if command_for(&self.term.read_key_blocking()?) == Some(Command::Quit) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::Continue)
    }

    /// Plays one round to the end, then waits for the player to pick again or quit.
    pub fn play(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.term.draw_border(&self.board)?;
        self.drawn.clear();
        self.paused = false;

        let seed = self.rng.gen::<u64>();
        info!("starting round with seed {}", seed);
        let mut state = GameState::with_seed(&self.config, seed)?;
        let mut latch = InputLatch::new();

        self.render(&state.snapshot())?;

        loop {
            let frame_start = self.clock.now();

            for key_ev in self.term.read_key_events_queue()? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => return Ok(Flow::Quit),
                    Some(Command::Pause) => self.toggle_pause()?,
                    Some(Command::Steer(dir)) => latch.request(dir),
                    None => {}
                }
            }

            if self.paused {
                latch.clear();
                self.pacer.wait(&self.clock, frame_start);
                continue;
            }

            let outcome = state.step(latch.take());
            self.render(&state.snapshot())?;

            match outcome {
                Outcome::Moved | Outcome::Ate => {}
                Outcome::Collided => {
                    self.game_over(&state.snapshot(), false)?;
                    break;
                }
                Outcome::BoardFull => {
                    self.game_over(&state.snapshot(), true)?;
                    break;
                }
                Outcome::AlreadyTerminated => break,
            }

            self.pacer.wait(&self.clock, frame_start);
        }

        match command_for(&self.term.read_key_blocking()?) {
            Some(Command::Quit) => Ok(Flow::Quit),
            _ => Ok(Flow::Continue),
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, snapshot: &Snapshot, win: bool) -> Result<()> {
        let s = if win {"You won!"} else {"Game over!"};

        if !win {
            for &cell in snapshot.snake {
                self.term.print_cell(&self.board, cell, DEAD_SNAKE_CHAR, DEAD_SNAKE_COLOR)?;
            }
        }

        debug!("round over: {:?}, length {}", snapshot.phase, snapshot.snake.len());

        self.term.show_message(&[
            s,
            &*format!("Score: {}", snapshot.score),
            "",
            "Press any key to play again,",
            "or Q to quit."
        ])?;
        Ok(())
    }

    /// Erases cells the snake left since the last frame, then draws the current one.
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        for &cell in &self.drawn {
            if !snapshot.snake.contains(&cell) && snapshot.food != Some(cell) {
                self.term.print_cell(&self.board, cell, ' ', Color::Reset)?;
            }
        }

        if let Some(food) = snapshot.food {
            self.term.print_cell(&self.board, food, FOOD_CHAR, FOOD_COLOR)?;
        }

        for (i, &cell) in snapshot.snake.iter().enumerate().rev() {
            let ch = if i == 0 {head_char(snapshot.direction)} else {SNAKE_BODY_CHAR};
            self.term.print_cell(&self.board, cell, ch, SNAKE_COLOR)?;
        }

        self.drawn.clear();
        self.drawn.extend_from_slice(snapshot.snake);
        self.drawn.extend(snapshot.food);

        self.term.flush()?;
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
        Ok(())
    }
}

fn head_char(direction: Direction) -> char {
    match direction {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Pause),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
