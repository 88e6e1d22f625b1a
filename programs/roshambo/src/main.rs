//! Roshambo - rock, paper, scissors at the terminal
//!
//! One match between the person at the console and a computer strategy drawn
//! at random. `ROSHAMBO_SEED` pins the computer's choices, `RUST_LOG` controls
//! diagnostics on stderr.

mod config;

use std::io;
use std::process;

use config::Config;
use roshambo_logic::{
    describe_strategy, GameError, Human, Match, Prompt, Report, SeededRng, Strategy,
};

/// Draws the opponent, asks for the round count and plays the match.
///
/// # Errors
/// Returns `GameError::Exit` or `GameError::InputClosed` when the player
/// leaves, and `GameError::Io` if the console cannot be read or written.
fn run(config: &Config) -> Result<(), GameError> {
    let seed = config.seed_or_random();
    let mut rng = SeededRng::new(seed);

    let opponent = Strategy::random_opponent(&mut rng);
    log::info!(
        "opponent is {} ({}), seed {}",
        opponent.base().name(),
        describe_strategy(opponent.base()),
        seed
    );

    let mut report = Report::new(io::stdout());
    report.banner()?;

    // Released before the human takes the console for the rest of the match
    let rounds = Prompt::new(io::stdin().lock(), io::stdout()).read_rounds()?;

    let human = Human::new(io::stdin().lock(), io::stdout());
    let mut game = Match::new(human, opponent);
    let result = game.play(rounds, &mut rng, &mut report)?;
    report.summary(&result)?;

    match result.to_json() {
        Ok(json) => log::debug!("transcript: {}", json),
        Err(e) => log::warn!("could not serialize transcript: {}", e),
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    match run(&config) {
        Ok(()) => {}
        Err(e) if e.is_quit() => {
            log::info!("{}", e);
            if let Err(e) = Report::new(io::stdout()).farewell() {
                log::error!("{}", e);
            }
        }
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
