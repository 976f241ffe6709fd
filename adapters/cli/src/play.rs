use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use number_ladder_core::{Command, Event, GameError, Outcome, WELCOME_BANNER};
use number_ladder_engine::{self as engine, query, GameEngine, SupplySource};

use crate::render::{board_line, supply_line};

/// Plays one interactive session over the provided streams.
///
/// Returns `None` when the input ends before the game does.
pub(crate) fn run<S, I, O>(
    game: &mut GameEngine<S>,
    input: &mut I,
    output: &mut O,
    cheat: bool,
) -> Result<Option<Outcome>>
where
    S: SupplySource,
    I: BufRead,
    O: Write,
{
    writeln!(output, "{WELCOME_BANNER}")?;
    let mut events = Vec::new();
    engine::apply(game, Command::ResetGame, &mut events)?;

    loop {
        events.clear();
        engine::apply(game, Command::DrawNumber, &mut events)?;
        let Some(Event::NumberDrawn { value }) = events.first().copied() else {
            anyhow::bail!("draw produced no number");
        };

        let outcome = loop {
            writeln!(output, "{}", board_line(query::board(game)))?;
            if cheat {
                writeln!(output, "{}", supply_line(query::supply(game)))?;
            }
            write!(output, "PLACE YOUR NUMBER: {value} > ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            let Ok(index) = line.trim().parse::<usize>() else {
                writeln!(output, "'{}' is not a slot index", line.trim())?;
                continue;
            };

            events.clear();
            match engine::apply(game, Command::Place { index }, &mut events) {
                Ok(()) => break ended(&events),
                Err(GameError::InvalidPlacement(error)) => {
                    writeln!(output, "{error}, try again")?;
                }
                Err(error) => return Err(error.into()),
            }
        };

        if let Some(outcome) = outcome {
            writeln!(output, "{}", board_line(query::board(game)))?;
            match outcome {
                Outcome::Win => writeln!(output, "YOU WIN!")?,
                Outcome::Loss => writeln!(output, "GAME OVER: {value} broke the order")?,
            }
            return Ok(Some(outcome));
        }
    }
}

fn ended(events: &[Event]) -> Option<Outcome> {
    events.iter().find_map(|event| match event {
        Event::GameEnded { outcome } => Some(*outcome),
        _ => None,
    })
}

fn read_line<I: BufRead>(input: &mut I) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read placement from input")?;
    Ok((read > 0).then_some(line))
}
