//! Match execution engine

use std::cmp::Ordering;
use std::io;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::judge;
use crate::random::SeededRng;
use crate::strategy::{Move, Player, Strategy};

/// Who took a round, or the whole match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerOne,
    PlayerTwo,
    Tie,
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based
    pub round: u32,
    pub move_one: Move,
    pub move_two: Move,
    pub outcome: Outcome,
    pub score_one: u32,
    pub score_two: u32,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundResult>,
    pub score_one: u32,
    pub score_two: u32,
    pub round_count: u32,
}

impl MatchResult {
    /// Higher score wins, equal scores tie
    pub fn winner(&self) -> Outcome {
        match self.score_one.cmp(&self.score_two) {
            Ordering::Greater => Outcome::PlayerOne,
            Ordering::Less => Outcome::PlayerTwo,
            Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn ties(&self) -> u32 {
        self.round_count
            .saturating_sub(self.score_one)
            .saturating_sub(self.score_two)
    }

    /// Round-by-round transcript as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Where a match is in its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPhase {
    NotStarted,
    InProgress { played: u32, total: u32 },
    Finished,
}

/// Receives each round as the match runs
pub trait RoundListener {
    /// Called before either player picks a move
    fn round_started(&mut self, _round: u32, _total: u32) -> io::Result<()> {
        Ok(())
    }

    fn round_resolved(&mut self, result: &RoundResult) -> io::Result<()>;
}

/// Listener that ignores every round
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl RoundListener for Silent {
    fn round_resolved(&mut self, _result: &RoundResult) -> io::Result<()> {
        Ok(())
    }
}

/// One game session between two players
#[derive(Debug)]
pub struct Match<A, B> {
    one: A,
    two: B,
    score_one: u32,
    score_two: u32,
    phase: MatchPhase,
    rounds: Vec<RoundResult>,
}

impl<A: Player, B: Player> Match<A, B> {
    pub fn new(one: A, two: B) -> Self {
        Self {
            one,
            two,
            score_one: 0,
            score_two: 0,
            phase: MatchPhase::NotStarted,
            rounds: Vec::new(),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Running scores (player one, player two)
    pub fn scores(&self) -> (u32, u32) {
        (self.score_one, self.score_two)
    }

    pub fn player_one(&self) -> &A {
        &self.one
    }

    pub fn player_two(&self) -> &B {
        &self.two
    }

    /// Start a match of `total_rounds` rounds
    pub fn begin(&mut self, total_rounds: u32) -> Result<(), GameError> {
        if self.phase != MatchPhase::NotStarted {
            log::warn!("begin called in phase {:?}", self.phase);
            return Err(GameError::InvalidState);
        }
        if total_rounds == 0 {
            return Err(GameError::NoRounds);
        }

        self.phase = MatchPhase::InProgress {
            played: 0,
            total: total_rounds,
        };
        log::info!("match started: {} rounds", total_rounds);
        Ok(())
    }

    /// Number of the round about to be played, if any
    pub fn next_round(&self) -> Option<u32> {
        match self.phase {
            MatchPhase::InProgress { played, .. } => Some(played + 1),
            _ => None,
        }
    }

    /// Play one round: both pick, score it, let both learn
    ///
    /// If a player quits while picking, nothing is scored and the match stays
    /// on the same round.
    pub fn resolve_round(&mut self, rng: &mut SeededRng) -> Result<RoundResult, GameError> {
        let MatchPhase::InProgress { played, total } = self.phase else {
            log::warn!("resolve_round called in phase {:?}", self.phase);
            return Err(GameError::InvalidState);
        };

        let move_one = self.one.select_move(rng)?;
        let move_two = self.two.select_move(rng)?;

        let outcome = judge(move_one, move_two);
        match outcome {
            Outcome::PlayerOne => self.score_one += 1,
            Outcome::PlayerTwo => self.score_two += 1,
            Outcome::Tie => {}
        }

        self.one.observe(move_one, move_two);
        self.two.observe(move_two, move_one);

        let result = RoundResult {
            round: played + 1,
            move_one,
            move_two,
            outcome,
            score_one: self.score_one,
            score_two: self.score_two,
        };
        log::debug!(
            "round {}/{}: {} vs {} -> {:?} ({}-{})",
            result.round,
            total,
            move_one,
            move_two,
            outcome,
            self.score_one,
            self.score_two
        );
        self.rounds.push(result.clone());

        self.phase = if result.round == total {
            log::info!("match finished: {}-{}", self.score_one, self.score_two);
            MatchPhase::Finished
        } else {
            MatchPhase::InProgress {
                played: result.round,
                total,
            }
        };

        Ok(result)
    }

    /// Final result, once every round has been played
    pub fn result(&self) -> Option<MatchResult> {
        if self.phase != MatchPhase::Finished {
            return None;
        }
        Some(MatchResult {
            rounds: self.rounds.clone(),
            score_one: self.score_one,
            score_two: self.score_two,
            round_count: self.rounds.len() as u32,
        })
    }

    /// Begin and run every round, reporting each to `listener`
    pub fn play<L: RoundListener>(
        &mut self,
        total_rounds: u32,
        rng: &mut SeededRng,
        listener: &mut L,
    ) -> Result<MatchResult, GameError> {
        self.begin(total_rounds)?;

        while let Some(round) = self.next_round() {
            listener.round_started(round, total_rounds)?;
            let result = self.resolve_round(rng)?;
            listener.round_resolved(&result)?;
        }

        self.result().ok_or(GameError::InvalidState)
    }
}

/// Run a complete match between two computer strategies
///
/// # Arguments
/// * `strategy_one` - Player one's strategy
/// * `strategy_two` - Player two's strategy
/// * `rounds` - Number of rounds to play
/// * `seed` - Seed for the random strategies
pub fn run_match(
    strategy_one: Strategy,
    strategy_two: Strategy,
    rounds: u32,
    seed: u64,
) -> Result<MatchResult, GameError> {
    let mut rng = SeededRng::new(seed);
    Match::new(strategy_one, strategy_two).play(rounds, &mut rng, &mut Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyBase;

    /// Plays a fixed script of moves
    struct Scripted {
        moves: Vec<Move>,
        next: usize,
        observed: Vec<(Move, Move)>,
    }

    impl Scripted {
        fn new(moves: &[Move]) -> Self {
            Self {
                moves: moves.to_vec(),
                next: 0,
                observed: Vec::new(),
            }
        }
    }

    impl Player for Scripted {
        fn select_move(&mut self, _rng: &mut SeededRng) -> Result<Move, GameError> {
            let m = self.moves[self.next % self.moves.len()];
            self.next += 1;
            Ok(m)
        }

        fn observe(&mut self, own: Move, opponent: Move) {
            self.observed.push((own, opponent));
        }
    }

    struct Quitter;

    impl Player for Quitter {
        fn select_move(&mut self, _rng: &mut SeededRng) -> Result<Move, GameError> {
            Err(GameError::Exit)
        }
    }

    #[test]
    fn test_phases() {
        let mut rng = SeededRng::new(1);
        let mut game = Match::new(Strategy::Rock, Strategy::Rock);
        assert_eq!(game.phase(), MatchPhase::NotStarted);
        assert_eq!(game.next_round(), None);

        game.begin(2).unwrap();
        assert_eq!(game.phase(), MatchPhase::InProgress { played: 0, total: 2 });
        assert_eq!(game.next_round(), Some(1));

        game.resolve_round(&mut rng).unwrap();
        assert_eq!(game.phase(), MatchPhase::InProgress { played: 1, total: 2 });
        assert!(game.result().is_none());

        game.resolve_round(&mut rng).unwrap();
        assert_eq!(game.phase(), MatchPhase::Finished);
        assert_eq!(game.next_round(), None);
        assert_eq!(game.result().unwrap().round_count, 2);
    }

    #[test]
    fn test_begin_rejects_zero_rounds() {
        let mut game = Match::new(Strategy::Rock, Strategy::Rock);
        assert!(matches!(game.begin(0), Err(GameError::NoRounds)));
        assert_eq!(game.phase(), MatchPhase::NotStarted);
    }

    #[test]
    fn test_begin_huge_round_count() {
        let mut rng = SeededRng::new(1);
        let mut game = Match::new(Strategy::Rock, Strategy::Rock);
        game.begin(u32::MAX).unwrap();
        assert_eq!(game.phase(), MatchPhase::InProgress { played: 0, total: u32::MAX });

        game.resolve_round(&mut rng).unwrap();
        assert_eq!(game.next_round(), Some(2));
    }

    #[test]
    fn test_ties_of_inconsistent_result() {
        let result = MatchResult {
            rounds: Vec::new(),
            score_one: 3,
            score_two: 2,
            round_count: 4,
        };
        assert_eq!(result.ties(), 0);
    }

    #[test]
    fn test_begin_twice_is_invalid() {
        let mut game = Match::new(Strategy::Rock, Strategy::Rock);
        game.begin(3).unwrap();
        assert!(matches!(game.begin(3), Err(GameError::InvalidState)));
    }

    #[test]
    fn test_resolve_outside_progress_is_invalid() {
        let mut rng = SeededRng::new(1);
        let mut game = Match::new(Strategy::Rock, Strategy::Rock);
        assert!(matches!(game.resolve_round(&mut rng), Err(GameError::InvalidState)));

        game.begin(1).unwrap();
        game.resolve_round(&mut rng).unwrap();
        assert!(matches!(game.resolve_round(&mut rng), Err(GameError::InvalidState)));
        assert_eq!(game.scores(), (0, 0));
    }

    #[test]
    fn test_scoring_follows_outcomes() {
        let mut rng = SeededRng::new(1);
        let one = Scripted::new(&[Move::Paper, Move::Rock, Move::Scissors, Move::Rock]);
        let two = Scripted::new(&[Move::Rock, Move::Paper, Move::Scissors, Move::Scissors]);
        let mut game = Match::new(one, two);

        let result = game.play(4, &mut rng, &mut Silent).unwrap();
        let outcomes: Vec<Outcome> = result.rounds.iter().map(|r| r.outcome).collect();
        assert_eq!(
            outcomes,
            vec![Outcome::PlayerOne, Outcome::PlayerTwo, Outcome::Tie, Outcome::PlayerOne]
        );
        assert_eq!((result.score_one, result.score_two), (2, 1));
        assert_eq!(result.ties(), 1);
        assert_eq!(result.winner(), Outcome::PlayerOne);
    }

    #[test]
    fn test_both_players_observe_every_round() {
        let mut rng = SeededRng::new(1);
        let one = Scripted::new(&[Move::Rock, Move::Paper]);
        let two = Scripted::new(&[Move::Scissors]);
        let mut game = Match::new(one, two);
        game.play(2, &mut rng, &mut Silent).unwrap();

        assert_eq!(
            game.player_one().observed,
            vec![(Move::Rock, Move::Scissors), (Move::Paper, Move::Scissors)]
        );
        assert_eq!(
            game.player_two().observed,
            vec![(Move::Scissors, Move::Rock), (Move::Scissors, Move::Paper)]
        );
    }

    #[test]
    fn test_cumulative_scores() {
        let result = run_match(
            Strategy::new(StrategyBase::Random),
            Strategy::new(StrategyBase::Mirror),
            50,
            42,
        )
        .unwrap();

        let mut expected_one = 0u32;
        let mut expected_two = 0u32;
        for round in &result.rounds {
            match round.outcome {
                Outcome::PlayerOne => expected_one += 1,
                Outcome::PlayerTwo => expected_two += 1,
                Outcome::Tie => {}
            }
            assert_eq!(round.score_one, expected_one);
            assert_eq!(round.score_two, expected_two);
        }
        assert_eq!(result.score_one + result.score_two + result.ties(), 50);
    }

    #[test]
    fn test_match_determinism() {
        let a = Strategy::new(StrategyBase::Random);
        let b = Strategy::new(StrategyBase::Mirror);

        let result1 = run_match(a, b, 30, 7).unwrap();
        let result2 = run_match(a, b, 30, 7).unwrap();
        assert_eq!(result1, result2);
    }

    #[test]
    fn test_rock_vs_rock_ties() {
        let result = run_match(Strategy::Rock, Strategy::Rock, 5, 0).unwrap();
        assert!(result.rounds.iter().all(|r| r.outcome == Outcome::Tie));
        assert_eq!(result.winner(), Outcome::Tie);
    }

    #[test]
    fn test_cycle_vs_rock() {
        // Cycle plays rock, paper, scissors: tie, win, loss
        let result = run_match(
            Strategy::new(StrategyBase::Cycle),
            Strategy::new(StrategyBase::Rock),
            3,
            0,
        )
        .unwrap();
        let moves: Vec<Move> = result.rounds.iter().map(|r| r.move_one).collect();
        assert_eq!(moves, vec![Move::Rock, Move::Paper, Move::Scissors]);
        assert_eq!((result.score_one, result.score_two), (1, 1));
        assert_eq!(result.winner(), Outcome::Tie);
    }

    #[test]
    fn test_mirror_copies_across_match() {
        let result = run_match(
            Strategy::new(StrategyBase::Mirror),
            Strategy::new(StrategyBase::Cycle),
            6,
            3,
        )
        .unwrap();
        for pair in result.rounds.windows(2) {
            assert_eq!(pair[1].move_one, pair[0].move_two);
        }
    }

    #[test]
    fn test_quit_leaves_round_unscored() {
        let mut rng = SeededRng::new(1);
        let mut game = Match::new(Quitter, Strategy::Rock);
        game.begin(3).unwrap();

        assert!(matches!(game.resolve_round(&mut rng), Err(GameError::Exit)));
        assert_eq!(game.scores(), (0, 0));
        assert_eq!(game.next_round(), Some(1));
    }

    #[test]
    fn test_listener_sees_every_round_in_order() {
        #[derive(Default)]
        struct Recorder {
            events: Vec<String>,
        }

        impl RoundListener for Recorder {
            fn round_started(&mut self, round: u32, total: u32) -> io::Result<()> {
                self.events.push(format!("start {round}/{total}"));
                Ok(())
            }

            fn round_resolved(&mut self, result: &RoundResult) -> io::Result<()> {
                self.events.push(format!("done {}", result.round));
                Ok(())
            }
        }

        let mut rng = SeededRng::new(1);
        let mut recorder = Recorder::default();
        Match::new(Strategy::Rock, Strategy::Random)
            .play(2, &mut rng, &mut recorder)
            .unwrap();
        assert_eq!(recorder.events, vec!["start 1/2", "done 1", "start 2/2", "done 2"]);
    }

    #[test]
    fn test_result_serializes() {
        let result = run_match(Strategy::Rock, Strategy::Rock, 1, 0).unwrap();
        let json = result.to_json().unwrap();
        assert!(json.contains("\"move_one\":\"Rock\""));
        assert!(json.contains("\"outcome\":\"Tie\""));
    }
}
