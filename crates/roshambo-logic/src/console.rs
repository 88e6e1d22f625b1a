//! Console boundary: prompting a person for input, and printing the match

use std::io::{self, BufRead, Write};

use crate::error::GameError;
use crate::game::{MatchResult, Outcome, RoundListener, RoundResult};
use crate::random::SeededRng;
use crate::strategy::{Move, Player};

/// Typing this at any prompt leaves the game
pub const EXIT_TOKEN: &str = "exit";

const ROUNDS_PROMPT: &str = "How many rounds would you like to play? : ";
const ROUNDS_INVALID: &str = "Invalid input. Please enter a positive number.";
const MOVE_PROMPT: &str = "Choose 'rock', 'paper', or 'scissors': ";
const MOVE_INVALID: &str = "Invalid move. Enter 'rock', 'paper', or 'scissors'.";

/// Line-based prompt loop over any reader and writer
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until a positive round count is entered
    pub fn read_rounds(&mut self) -> Result<u32, GameError> {
        loop {
            let line = self.ask(ROUNDS_PROMPT)?;
            match line.parse::<u32>() {
                Ok(rounds) if rounds > 0 => return Ok(rounds),
                _ => {
                    log::warn!("rejected round count {:?}", line);
                    writeln!(self.output, "{}", ROUNDS_INVALID)?;
                }
            }
        }
    }

    /// Ask until one of the three moves is named
    pub fn read_move(&mut self) -> Result<Move, GameError> {
        loop {
            let line = self.ask(MOVE_PROMPT)?;
            match line.parse::<Move>() {
                Ok(m) => return Ok(m),
                Err(e) => {
                    log::warn!("{}", e);
                    writeln!(self.output, "{}", MOVE_INVALID)?;
                }
            }
        }
    }

    /// Show `prompt`, read one trimmed line, and catch the exit token
    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Raw bytes, so undecodable input is reprompted like any other junk
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(GameError::InputClosed);
        }

        let line = String::from_utf8_lossy(&raw);
        let line = line.trim();
        if line.eq_ignore_ascii_case(EXIT_TOKEN) {
            return Err(GameError::Exit);
        }
        Ok(line.to_string())
    }
}

/// A person at the console
#[derive(Debug)]
pub struct Human<R, W> {
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> Human<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            prompt: Prompt::new(input, output),
        }
    }
}

impl<R: BufRead, W: Write> Player for Human<R, W> {
    fn select_move(&mut self, _rng: &mut SeededRng) -> Result<Move, GameError> {
        self.prompt.read_move()
    }
}

/// Writes the game's announcements
#[derive(Debug)]
pub struct Report<W> {
    output: W,
}

impl<W: Write> Report<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.output, ">>>> Game start! <<<<")?;
        writeln!(self.output, "(Type '{}' at any prompt to quit.)", EXIT_TOKEN)
    }

    pub fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "Game exited by user.")
    }

    pub fn summary(&mut self, result: &MatchResult) -> io::Result<()> {
        writeln!(self.output, "\n>>>> Game Over! <<<<")?;
        writeln!(
            self.output,
            "Final Score: Player One - {}, Player Two - {}",
            result.score_one, result.score_two
        )?;
        let line = match result.winner() {
            Outcome::PlayerOne => "**** Player One is the overall winner! ****",
            Outcome::PlayerTwo => "**** Player Two is the overall winner! ****",
            Outcome::Tie => "**** The game ended in a tie! ****",
        };
        writeln!(self.output, "{}", line)
    }
}

impl<W: Write> RoundListener for Report<W> {
    fn round_started(&mut self, round: u32, total: u32) -> io::Result<()> {
        writeln!(self.output, "\nRound {} of {}", round, total)?;
        self.output.flush()
    }

    fn round_resolved(&mut self, result: &RoundResult) -> io::Result<()> {
        writeln!(self.output, "\nPlayer One plays: {}", result.move_one)?;
        writeln!(self.output, "Player Two plays: {}", result.move_two)?;
        let line = match result.outcome {
            Outcome::PlayerOne => "** Player One wins this round! **",
            Outcome::PlayerTwo => "** Player Two wins this round! **",
            Outcome::Tie => "** This round is a tie! **",
        };
        writeln!(self.output, "{}", line)?;
        writeln!(
            self.output,
            "Score after this round: Player One - {}, Player Two - {}",
            result.score_one, result.score_two
        )
    }
}
