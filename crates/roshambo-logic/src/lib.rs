//! Match Logic for Roshambo
//!
//! Rock, paper, scissors between a person at the console and one of a few
//! fixed computer strategies, over a chosen number of rounds.

mod console;
mod error;
mod game;
mod random;
mod strategy;

pub use console::{Human, Prompt, Report, EXIT_TOKEN};
pub use error::{GameError, ParseMoveError};
pub use game::{
    run_match, Match, MatchPhase, MatchResult, Outcome, RoundListener, RoundResult, Silent,
};
pub use random::SeededRng;
pub use strategy::{describe_strategy, Move, Player, Strategy, StrategyBase};

/// Who wins a round where player one plays `a` and player two plays `b`
pub fn judge(a: Move, b: Move) -> Outcome {
    if a.beats(b) {
        Outcome::PlayerOne
    } else if b.beats(a) {
        Outcome::PlayerTwo
    } else {
        Outcome::Tie
    }
}
