use rand::Rng;

use crate::deadend::prelude::*;

/// Whose move it is. `Finished` is absorbing: only a restart leaves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Turn {
    /// The human, moving through pointer input.
    #[default]
    PlayerOne,

    /// The automated opponent.
    PlayerTwo,

    /// The automated opponent found no empty cell.
    Finished,
}

impl Turn {
    /// Notates the turn.
    pub fn notate(&self) -> String {
        match self {
            Turn::PlayerOne => "X",
            Turn::PlayerTwo => "O",
            Turn::Finished  => "finished"
        }.into()
    }
}

/// Orchestrates moves on a board it does not own.
#[derive(Clone, Debug, Default)]
pub struct TurnController {
    turn: Turn,
}

impl TurnController {
    /// A controller waiting on the human's first move.
    pub fn new() -> TurnController {
        TurnController::default()
    }

    /// Applies the human's placement if it is their turn and the cell exists and is empty.
    ///
    /// Anything else is dropped without changing state; returns whether the placement landed.
    pub fn place(&mut self, board: &mut Board, coord: &Coord) -> bool {
        if self.turn != Turn::PlayerOne {
            log::trace!("ignoring placement at {coord}; it is not the human's turn ({:?})", self.turn);
            return false;
        }
        if board.occupant(coord) != Some(Occupant::Empty) {
            log::trace!("ignoring placement at {coord}; the cell is missing or taken");
            return false;
        }
        if let Err(e) = board.set_occupant(coord, Player::One.occupant()) {
            log::error!("placement at {coord} failed after validation: {e}");
            return false;
        }

        log::debug!("X placed at {coord}");
        self.turn = Turn::PlayerTwo;
        true
    }

    /// Lets the automated player occupy an empty cell chosen uniformly at random.
    ///
    /// A board with no empty cell ends the game and is left untouched.
    pub fn respond<R: Rng + ?Sized>(&mut self, board: &mut Board, rng: &mut R) -> Option<Coord> {
        if self.turn != Turn::PlayerTwo {
            return None;
        }

        let Some(coord) = sample_uniform(board.empty_cells(), rng) else {
            let scores = board.scores();
            log::info!(
                "board full; game over at {:.3} to {:.3}",
                scores.player_one.score, scores.player_two.score
            );
            self.turn = Turn::Finished;
            return None;
        };

        if let Err(e) = board.set_occupant(&coord, Player::Two.occupant()) {
            log::error!("sampled cell {coord} could not be taken: {e}");
            return None;
        }
        log::debug!("O placed at {coord}");
        self.turn = Turn::PlayerOne;
        Some(coord)
    }

    /// Empties the board and hands the move back to the human.
    pub fn restart(&mut self, board: &mut Board) {
        board.clear();
        self.turn = Turn::PlayerOne;
        log::debug!("new game on {} cells", board.len());
    }

    /// Whose move it is.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Refills the whole board half and half with random placement; whose turn it is does not change.
    ///
    /// Player one gets `len / 2` cells and player two the rest. Each cell in iteration order goes to
    /// player one with probability `remaining_one / remaining`, which fixes the totals exactly.
    pub fn redistribute<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) {
        let mut remaining_one = board.len() / 2;
        let mut remaining_two = board.len() - remaining_one;

        board.fill(|_| {
            let remaining = (remaining_one + remaining_two) as f64;
            if rng.random::<f64>() * remaining < remaining_one as f64 {
                remaining_one -= 1;
                Occupant::PlayerOne
            } else {
                remaining_two -= 1;
                Occupant::PlayerTwo
            }
        });
        log::debug!(
            "redistributed {} cells: {} X, {} O",
            board.len(), board.count(Occupant::PlayerOne), board.count(Occupant::PlayerTwo)
        );
    }
}
