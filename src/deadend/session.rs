use std::time::Duration;

use rand::Rng;

use crate::deadend::prelude::*;

/// An input from the outside world, queued until the next logical step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// The human clicked a cell; coordinates are logical, screen transforms happen upstream.
    PlaceAt(Coord),

    /// Refill the board half and half at random without changing whose turn it is.
    ResetBoard,

    /// Empty the board and start over with the human to move.
    NewGame,
}

/// Feedback for one accepted placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub coord: Coord,
    pub player: Player,
}

/// What a single logical step did.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// One entry per accepted placement, in the order they landed.
    pub placements: Vec<Placement>,

    /// The number of queued commands consumed.
    pub commands: usize,

    /// Whose move it is after the step.
    pub turn: Turn,
}

/// A read-only copy of everything a renderer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub cells: Vec<(Coord, Occupant)>,
    pub scores: Scores,
    pub turn: Turn,
}

/// Session parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub steps_per_second: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig { rows: DEFAULT_ROWS, steps_per_second: STEPS_PER_SECOND }
    }
}

/// One game: the board, the turn controller, the randomness they draw on, and the queue feeding them.
///
/// Nothing outside the session mutates the board; callers enqueue commands and read snapshots.
#[derive(Debug)]
pub struct Session<R: Rng> {
    board: Board,
    controller: TurnController,
    queue: VecDeque<Command>,
    throttle: Throttle,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Starts a session on an empty board with the human to move.
    pub fn new(config: &SessionConfig, rng: R) -> Result<Session<R>> {
        let board = Board::new(config.rows).with_context(|| format!("cannot start a session with {} rows", config.rows))?;
        log::info!("new session: {} rows, {} cells, {} steps/s", board.rows(), board.len(), config.steps_per_second);
        Ok(Session {
            board,
            controller: TurnController::new(),
            queue: VecDeque::new(),
            throttle: Throttle::new(config.steps_per_second),
            rng,
        })
    }

    /// The board, for reading.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Queues a command for the next step.
    pub fn enqueue(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// The number of commands waiting for a step.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The scores for the current board, cached until it changes.
    pub fn scores(&self) -> Scores {
        self.board.scores()
    }

    /// Copies out every cell with its owner, the scores and the turn.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.board.cells().map(|(coord, _, occupant)| (coord, occupant)).collect(),
            scores: self.board.scores(),
            turn: self.controller.turn(),
        }
    }

    /// Runs one logical step: drains the queue in arrival order, then lets the automated player move.
    pub fn step(&mut self) -> StepReport {
        let mut placements = vec![];
        let mut commands = 0;

        while let Some(command) = self.queue.pop_front() {
            commands += 1;
            match command {
                Command::PlaceAt(coord) => {
                    if self.controller.place(&mut self.board, &coord) {
                        placements.push(Placement { coord, player: Player::One });
                    }
                },
                Command::ResetBoard => TurnController::redistribute(&mut self.board, &mut self.rng),
                Command::NewGame    => self.controller.restart(&mut self.board),
            }
        }

        if let Some(coord) = self.controller.respond(&mut self.board, &mut self.rng) {
            placements.push(Placement { coord, player: Player::Two });
        }

        StepReport { placements, commands, turn: self.controller.turn() }
    }

    /// Feeds elapsed wall time to the rate limiter and runs a step if one is due.
    pub fn tick(&mut self, elapsed: Duration) -> Option<StepReport> {
        if self.throttle.admit(elapsed) {
            Some(self.step())
        } else {
            None
        }
    }

    /// Whose move it is.
    pub fn turn(&self) -> Turn {
        self.controller.turn()
    }
}
