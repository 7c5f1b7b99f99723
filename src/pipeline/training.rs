//! Training results for self-play runs

use serde::{Deserialize, Serialize};

use crate::{
    hexapawn::{Side, TerminalResult},
    menace::MenaceAgent,
};

/// One agent's cumulative record at a point in training
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    pub wins: usize,
    pub games_played: usize,
    pub win_rate: f64,
}

impl SideSummary {
    pub fn of(agent: &MenaceAgent) -> Self {
        let stats = agent.stats();
        Self {
            wins: stats.games_won,
            games_played: stats.games_played,
            win_rate: stats.win_rate(),
        }
    }
}

/// Summary of one training game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Index of the game within the training run (0-based)
    pub game_index: usize,
    pub result: TerminalResult,
    /// Number of moves played
    pub moves: usize,
    pub first: SideSummary,
    pub second: SideSummary,
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Total games played
    pub total_games: usize,

    /// Games won by the First side
    pub first_wins: usize,

    /// Games won by the Second side
    pub second_wins: usize,

    /// Drawn games
    pub draws: usize,

    /// First side's win rate over this run
    pub first_win_rate: f64,

    /// Second side's win rate over this run
    pub second_win_rate: f64,

    /// Per-game summaries in play order
    pub games: Vec<GameSummary>,
}

impl TrainingReport {
    /// Tally a list of game summaries
    pub fn new(games: Vec<GameSummary>) -> Self {
        let count = |result: TerminalResult| games.iter().filter(|g| g.result == result).count();
        let total_games = games.len();
        let first_wins = count(TerminalResult::FirstWins);
        let second_wins = count(TerminalResult::SecondWins);
        let draws = count(TerminalResult::Draw);
        let rate = |wins: usize| {
            if total_games > 0 {
                wins as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            first_wins,
            second_wins,
            draws,
            first_win_rate: rate(first_wins),
            second_win_rate: rate(second_wins),
            games,
        }
    }

    /// Win rate of `side` over the last `window` games
    pub fn recent_win_rate(&self, side: Side, window: usize) -> f64 {
        let recent: Vec<&GameSummary> = self.games.iter().rev().take(window).collect();
        if recent.is_empty() {
            return 0.0;
        }
        let wins = recent
            .iter()
            .filter(|g| g.result.winner() == Some(side))
            .count();
        wins as f64 / recent.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(game_index: usize, result: TerminalResult) -> GameSummary {
        let side = SideSummary {
            wins: 0,
            games_played: 0,
            win_rate: 0.0,
        };
        GameSummary {
            game_index,
            result,
            moves: 3,
            first: side,
            second: side,
        }
    }

    #[test]
    fn report_tallies_results() {
        let report = TrainingReport::new(vec![
            summary(0, TerminalResult::FirstWins),
            summary(1, TerminalResult::SecondWins),
            summary(2, TerminalResult::SecondWins),
            summary(3, TerminalResult::SecondWins),
        ]);

        assert_eq!(report.total_games, 4);
        assert_eq!(report.first_wins, 1);
        assert_eq!(report.second_wins, 3);
        assert_eq!(report.draws, 0);
        assert!((report.second_win_rate - 0.75).abs() < 1e-12);
        assert_eq!(report.recent_win_rate(Side::First, 2), 0.0);
        assert!((report.recent_win_rate(Side::First, 10) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_report_has_zero_rates() {
        let report = TrainingReport::new(Vec::new());
        assert_eq!(report.first_win_rate, 0.0);
        assert_eq!(report.recent_win_rate(Side::Second, 5), 0.0);
    }
}
