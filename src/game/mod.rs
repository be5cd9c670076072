//! Game session: state machine and controller

mod controller;
mod state;

pub use controller::{
    AbortStage, Controller, ControllerError, GameOutcome, LeaderboardTicket, PlayObserver,
    Solution, SolutionTicket, SubmitOutcome,
};
pub use state::{GameState, StateError, Status};
