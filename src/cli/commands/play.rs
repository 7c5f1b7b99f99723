//! Play command - A human against a trained agent on the terminal

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;

use super::pretrained_session;
use crate::{
    cli::output::{print_kv, print_section, render_board},
    hexapawn::{Move, Side, TerminalResult},
    pipeline::Session,
};

#[derive(Parser, Debug)]
#[command(about = "Play against a trained agent")]
pub struct PlayArgs {
    /// Side the human plays (first or second)
    #[arg(long, default_value = "first")]
    pub human: Side,

    /// Self-play games before the match
    #[arg(long, short = 't', default_value_t = 200)]
    pub train: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    if args.human == Side::Neutral {
        bail!("The human must play the first or second side");
    }

    let (mut session, report) = pretrained_session(args.train, args.seed)?;
    session.detach_agent(args.human);

    print_section("Hexapawn");
    print_kv("Training games", &report.total_games.to_string());
    print_kv("You play", &args.human.to_string());
    println!("\nEnter moves like a1-a2 or a2xb3, 'moves' to list them, 'quit' to stop.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = play_game(&mut session, args.human, stdin.lock(), stdout.lock())?;
    if result == TerminalResult::InProgress {
        println!("\nGame abandoned.");
    }
    Ok(())
}

/// Alternate between the human's input and the agent until the game ends.
///
/// Returns `TerminalResult::InProgress` if the input ends or the human quits.
pub fn play_game<R: BufRead, W: Write>(
    session: &mut Session,
    human: Side,
    mut input: R,
    mut out: W,
) -> Result<TerminalResult> {
    session.start_new_game()?;

    while !session.state().is_terminal() {
        if session.to_move() != human {
            let mv = session.make_ai_move().context("Agent failed to move")?;
            writeln!(out, "\nAgent plays {mv}")?;
            continue;
        }

        write!(out, "\n{}Your move: ", render_board(session.state()))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(TerminalResult::InProgress);
        }
        let command = line.trim();
        match command {
            "" => continue,
            "quit" | "q" => return Ok(TerminalResult::InProgress),
            "moves" | "m" => {
                let legal: Vec<String> = session.legal_moves().iter().map(Move::to_string).collect();
                writeln!(out, "Legal moves: {}", legal.join(" "))?;
            }
            _ => match command.parse::<Move>() {
                Ok(mv) => {
                    if let Err(err) = session.make_move(mv) {
                        writeln!(out, "{err}")?;
                    }
                }
                Err(err) => writeln!(out, "{err}")?,
            },
        }
    }

    let result = session.result();
    write!(out, "\n{}", render_board(session.state()))?;
    match result.winner() {
        Some(side) if side == human => writeln!(out, "You win!")?,
        Some(_) => writeln!(out, "The agent wins.")?,
        None => writeln!(out, "Draw.")?,
    }
    Ok(result)
}
