//! Inspect command - Print every matchbox of a trained agent

use anyhow::{Result, anyhow};
use clap::Parser;

use super::pretrained_session;
use crate::{
    cli::output::{print_agent_stats, print_matchbox, print_section, print_subsection},
    hexapawn::Side,
};

#[derive(Parser, Debug)]
#[command(about = "Train both agents and print one agent's matchboxes")]
pub struct InspectArgs {
    /// Self-play games before inspection
    #[arg(long, short = 't', default_value_t = 200)]
    pub train: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Agent to inspect (first or second)
    #[arg(long, default_value = "second")]
    pub side: Side,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let (session, report) = pretrained_session(args.train, args.seed)?;
    let agent = session
        .agent(args.side)
        .ok_or_else(|| anyhow!("No agent plays the {} side", args.side))?;

    print_section(&format!(
        "Matchboxes of the {} agent after {} games",
        args.side, report.total_games
    ));
    print_agent_stats(args.side, agent);

    print_subsection("Matchboxes");
    for key in agent.known_keys() {
        if let Some(matchbox) = agent.matchbox(key) {
            print_matchbox(matchbox);
        }
    }
    Ok(())
}
