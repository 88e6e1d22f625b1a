//! Moves, strategies and the player capability

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, ParseMoveError};
use crate::random::SeededRng;

/// A move in rock, paper, scissors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves, in cycle order
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Whether this move wins against `other`
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }

    /// Next move in the cycle Rock -> Paper -> Scissors -> Rock
    pub fn next(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// A uniformly random move
    pub fn random(rng: &mut SeededRng) -> Move {
        Move::ALL[rng.next_range(Move::ALL.len() as u32) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Case-insensitive, ignoring surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Move::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMoveError(wanted.to_string()))
    }
}

/// Anything that can take part in a match
///
/// The defaults are the base behavior: always play rock, learn nothing.
pub trait Player {
    /// Choose this round's move
    fn select_move(&mut self, _rng: &mut SeededRng) -> Result<Move, GameError> {
        Ok(Move::Rock)
    }

    /// Called after every round with both moves that were played
    fn observe(&mut self, _own: Move, _opponent: Move) {}
}

/// Computer strategy kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyBase {
    /// Always rock.
    Rock,
    /// Uniform random choice each round.
    Random,
    /// Copy opponent's last move. Start random.
    Mirror,
    /// Rock, paper, scissors, repeat.
    Cycle,
}

impl StrategyBase {
    /// Every computer strategy an opponent can be drawn from
    pub const ALL: [StrategyBase; 4] = [
        StrategyBase::Random,
        StrategyBase::Mirror,
        StrategyBase::Cycle,
        StrategyBase::Rock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyBase::Rock => "Rock",
            StrategyBase::Random => "Random",
            StrategyBase::Mirror => "Mirror",
            StrategyBase::Cycle => "Cycle",
        }
    }
}

/// A computer strategy together with whatever it remembers between rounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Rock,
    Random,
    Mirror { last_seen: Option<Move> },
    Cycle { last_own: Option<Move> },
}

impl Strategy {
    /// Fresh strategy with no memory
    pub fn new(base: StrategyBase) -> Self {
        match base {
            StrategyBase::Rock => Strategy::Rock,
            StrategyBase::Random => Strategy::Random,
            StrategyBase::Mirror => Strategy::Mirror { last_seen: None },
            StrategyBase::Cycle => Strategy::Cycle { last_own: None },
        }
    }

    /// Draw one of the computer strategies uniformly
    pub fn random_opponent(rng: &mut SeededRng) -> Self {
        let index = rng.next_range(StrategyBase::ALL.len() as u32) as usize;
        Strategy::new(StrategyBase::ALL[index])
    }

    pub fn base(&self) -> StrategyBase {
        match self {
            Strategy::Rock => StrategyBase::Rock,
            Strategy::Random => StrategyBase::Random,
            Strategy::Mirror { .. } => StrategyBase::Mirror,
            Strategy::Cycle { .. } => StrategyBase::Cycle,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::new(StrategyBase::Rock)
    }
}

impl Player for Strategy {
    fn select_move(&mut self, rng: &mut SeededRng) -> Result<Move, GameError> {
        let chosen = match self {
            Strategy::Rock => Move::Rock,
            Strategy::Random => Move::random(rng),
            Strategy::Mirror { last_seen } => match last_seen {
                Some(seen) => *seen,
                None => Move::random(rng),
            },
            Strategy::Cycle { last_own } => {
                let next = last_own.map_or(Move::Rock, Move::next);
                *last_own = Some(next);
                next
            }
        };
        Ok(chosen)
    }

    fn observe(&mut self, own: Move, opponent: Move) {
        match self {
            Strategy::Rock | Strategy::Random => {}
            Strategy::Mirror { last_seen } => *last_seen = Some(opponent),
            // Overwrites with whatever was actually played, even if it
            // differs from the move this strategy produced.
            Strategy::Cycle { last_own } => *last_own = Some(own),
        }
    }
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(base: StrategyBase) -> &'static str {
    match base {
        StrategyBase::Rock => "Always plays rock.",
        StrategyBase::Random => "Picks a random move every round.",
        StrategyBase::Mirror => "Copies your previous move. Starts with a random one.",
        StrategyBase::Cycle => "Cycles rock, paper, scissors in order.",
    }
}
