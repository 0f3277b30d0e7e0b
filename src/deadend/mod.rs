/*
 *  The game-state and scoring engine for Deadend, a territory game on a rhombus of two stacked triangles.
 */

pub(crate) mod board;
pub(crate) mod consts;
pub mod coords;
pub(crate) mod forest;
pub mod notation;
pub(crate) mod sampler;
pub(crate) mod session;
pub(crate) mod throttle;
pub(crate) mod turn;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, BoardError, scores::{Scores, Territory}},
        consts::*,
        coords::{self, *},
        forest::Forest,
        notation::*,
        sampler::{Reservoir, sample_uniform},
        session::{Command, Placement, Session, SessionConfig, Snapshot, StepReport},
        throttle::Throttle,
        turn::{Turn, TurnController}
    };
}
