//! Observers for sessions and training runs
//!
//! Observers allow composable data collection during play without coupling
//! the session to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    hexapawn::{BoardState, Move, Side, TerminalResult},
    ports::Observer,
    types::CanonicalKey,
};

/// Bead counts of one matchbox, rendered as `(move, beads)` pairs
pub type MoveWeights = Vec<(String, u32)>;

fn render_weights(weights: &[(Move, u32)]) -> MoveWeights {
    weights
        .iter()
        .map(|(mv, beads)| (mv.to_string(), *beads))
        .collect()
}

/// Observation of a single step during a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    /// Step number within game
    pub step_num: usize,
    /// Side that moved
    pub side: Side,
    /// Canonical key of the state before the move
    pub key: String,
    /// Move played
    #[serde(rename = "move")]
    pub mv: String,
    /// Matchbox contents before the move, absent for externally chosen moves
    pub weights_before: Option<MoveWeights>,
    /// Matchbox contents after learning
    pub weights_after: Option<MoveWeights>,
}

/// Complete observation of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub game_num: usize,
    pub result: TerminalResult,
    pub steps: Vec<StepObservation>,
    pub total_moves: usize,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    completed: u64,
    first_wins: usize,
    second_wins: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            completed: 0,
            first_wins: 0,
            second_wins: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} S:{}", self.first_wins, self.second_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (F:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, result: TerminalResult) -> Result<()> {
        self.completed += 1;
        match result {
            TerminalResult::FirstWins => self.first_wins += 1,
            TerminalResult::SecondWins => self.second_wins += 1,
            _ => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.completed);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks results and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    total_games: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn first_win_rate(&self) -> f64 {
        self.rate(self.first_wins)
    }

    pub fn second_win_rate(&self) -> f64 {
        self.rate(self.second_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Mean number of moves per game
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            first_wins: self.first_wins,
            second_wins: self.second_wins,
            draws: self.draws,
            first_win_rate: self.first_win_rate(),
            second_win_rate: self.second_win_rate(),
            draw_rate: self.draw_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub first_win_rate: f64,
    pub second_win_rate: f64,
    pub draw_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _mv: Move,
        _weights_before: Option<&[(Move, u32)]>,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, result: TerminalResult) -> Result<()> {
        self.total_games += 1;
        match result {
            TerminalResult::FirstWins => self.first_wins += 1,
            TerminalResult::SecondWins => self.second_wins += 1,
            TerminalResult::Draw => self.draws += 1,
            TerminalResult::InProgress => {}
        }
        Ok(())
    }
}

/// JSONL observer - Writes one JSON object per finished game
pub struct JsonlObserver<W: Write + Send = BufWriter<File>> {
    writer: W,
    current_game_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a JSONL observer writing to a new file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonlObserver<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            current_game_steps: Vec::new(),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for JsonlObserver<W> {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_game_steps.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        state: &BoardState,
        mv: Move,
        weights_before: Option<&[(Move, u32)]>,
    ) -> Result<()> {
        self.current_game_steps.push(StepObservation {
            step_num,
            side: state.to_move(),
            key: state.canonical_key().into_string(),
            mv: mv.to_string(),
            weights_before: weights_before.map(render_weights),
            weights_after: None,
        });
        Ok(())
    }

    fn on_weights_updated(
        &mut self,
        _game_num: usize,
        _side: Side,
        key: &CanonicalKey,
        weights_after: &[(Move, u32)],
    ) -> Result<()> {
        let rendered = render_weights(weights_after);
        for step in self
            .current_game_steps
            .iter_mut()
            .filter(|s| s.key == key.as_str())
        {
            step.weights_after = Some(rendered.clone());
        }
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, result: TerminalResult) -> Result<()> {
        let steps = std::mem::take(&mut self.current_game_steps);
        let observation = Observation {
            game_num,
            result,
            total_moves: steps.len(),
            steps,
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
