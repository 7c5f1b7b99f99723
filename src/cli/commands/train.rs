//! Train command - Self-play training of both agents

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::SessionConfig,
    cli::output::{format_number, format_percent, print_agent_stats, print_kv, print_section},
    export::write_learning_curve,
    hexapawn::Side,
    menace::ReinforcementValues,
    pipeline::{JsonlObserver, ProgressObserver, Session},
};

#[derive(Parser, Debug)]
#[command(about = "Train both agents by self-play", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training games (overrides the config file)
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Beads per legal move in a newly opened matchbox
    #[arg(long)]
    pub initial_beads: Option<u32>,

    /// Reward schedule for both agents (win=3,draw=1,loss=-1)
    #[arg(long)]
    pub reward: Option<ReinforcementValues>,

    /// JSON session configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional path for writing the learning curve as CSV
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, overrides_with = "no_progress")]
    pub progress: bool,

    /// Hide progress bar
    #[arg(long = "no-progress", overrides_with = "progress")]
    pub no_progress: bool,
}

impl TrainArgs {
    /// Load the config file, if any, and apply command-line overrides
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => SessionConfig::new(),
        };

        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(beads) = self.initial_beads {
            config.first.initial_beads = beads;
            config.second.initial_beads = beads;
        }
        if let Some(reward) = self.reward {
            config.first.reinforcement = reward;
            config.second.reinforcement = reward;
        }
        config.validate().context("Invalid training configuration")?;
        Ok(config)
    }

    /// Progress is on unless `--no-progress` was the last of the pair given
    fn show_progress(&self) -> bool {
        self.progress || !self.no_progress
    }
}

#[derive(Debug, Serialize)]
struct AgentSummary {
    games_played: usize,
    games_won: usize,
    games_lost: usize,
    win_rate: f64,
    matchboxes: usize,
    total_beads: u64,
    average_entropy: f64,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    config: &'a SessionConfig,
    total_games: usize,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    first_win_rate: f64,
    second_win_rate: f64,
    recent_second_win_rate: f64,
    first: Option<AgentSummary>,
    second: Option<AgentSummary>,
}

/// Resolve the summary target: a directory gets a default file name and a
/// missing extension becomes `.json`.
fn summary_path(raw: &Path) -> PathBuf {
    let mut path = raw.to_path_buf();
    let text = raw.as_os_str().to_string_lossy();
    if text.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() || path.file_name().is_none() {
        path.push("training_summary.json");
        return path;
    }
    if path.extension().is_none() {
        path.set_extension("json");
    }
    path
}

/// Games in the trailing window used for the recent win rate
const RECENT_WINDOW: usize = 50;

fn agent_summary(session: &Session, side: Side) -> Option<AgentSummary> {
    session.agent(side).map(|agent| {
        let stats = agent.stats();
        AgentSummary {
            games_played: stats.games_played,
            games_won: stats.games_won,
            games_lost: stats.games_lost,
            win_rate: stats.win_rate(),
            matchboxes: agent.known_keys().len(),
            total_beads: agent.total_beads(),
            average_entropy: agent.average_entropy(),
        }
    })
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.session_config()?;
    let mut session = config.build_session().context("Failed to create agents")?;

    if args.show_progress() {
        session.add_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observation file {}", path.display()))?;
        session.add_observer(Box::new(observer));
    }

    let report = session
        .train(config.games, |_| {})
        .context("Training failed")?;

    print_section("Training Summary");
    print_kv("Games", &format_number(report.total_games));
    print_kv(
        "First wins",
        &format!(
            "{} ({})",
            format_number(report.first_wins),
            format_percent(report.first_win_rate)
        ),
    );
    print_kv(
        "Second wins",
        &format!(
            "{} ({})",
            format_number(report.second_wins),
            format_percent(report.second_win_rate)
        ),
    );
    let recent = report.recent_win_rate(Side::Second, RECENT_WINDOW);
    print_kv(
        &format!("Second, last {RECENT_WINDOW}"),
        &format_percent(recent),
    );
    for side in [Side::First, Side::Second] {
        if let Some(agent) = session.agent(side) {
            print_agent_stats(side, agent);
        }
    }

    if let Some(raw) = &args.summary {
        let path = summary_path(raw);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let summary = TrainingSummaryFile {
            config: &config,
            total_games: report.total_games,
            first_wins: report.first_wins,
            second_wins: report.second_wins,
            draws: report.draws,
            first_win_rate: report.first_win_rate,
            second_win_rate: report.second_win_rate,
            recent_second_win_rate: recent,
            first: agent_summary(&session, Side::First),
            second: agent_summary(&session, Side::Second),
        };
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary).context("Failed to write summary")?;
        println!("\nSummary written to {}", path.display());
    }

    if let Some(path) = &args.curve {
        let rows = write_learning_curve(path, &report.games)
            .with_context(|| format!("Failed to write learning curve to {}", path.display()))?;
        println!("Learning curve ({rows} games) written to {}", path.display());
    }

    if let Some(path) = &args.observations {
        println!("Observations written to {}", path.display());
    }

    Ok(())
}
