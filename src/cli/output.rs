//! Output formatting for CLI

use crate::{
    hexapawn::{BOARD_SIZE, BoardState, Side},
    menace::{Matchbox, MenaceAgent},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in `[0, 1]` as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a board with file letters and rank numbers, highest rank on top
pub fn render_board(state: &BoardState) -> String {
    let text = state.to_string();
    let rows: Vec<&str> = text.lines().collect();
    let mut out = String::new();
    for (row, line) in rows.iter().enumerate().rev() {
        out.push_str(&format!("  {} {}\n", row + 1, line));
    }
    let files: String = (0..BOARD_SIZE)
        .map(|col| char::from(b'a' + col as u8))
        .collect();
    out.push_str(&format!("    {files}\n"));
    out
}

pub fn print_board(state: &BoardState) {
    print!("{}", render_board(state));
}

/// Print one matchbox: its key and the bead count of every move
pub fn print_matchbox(matchbox: &Matchbox) {
    let moves: Vec<String> = matchbox
        .beads()
        .iter()
        .map(|(mv, beads)| format!("{mv}:{beads}"))
        .collect();
    println!(
        "  {}  total {:>3}  entropy {:.3}  {}",
        matchbox.key(),
        matchbox.total_beads(),
        matchbox.entropy(),
        moves.join(" ")
    );
}

/// Print an agent's cumulative record
pub fn print_agent_stats(side: Side, agent: &MenaceAgent) {
    let stats = agent.stats();
    print_subsection(&format!("{side} agent"));
    print_kv("Games played", &format_number(stats.games_played));
    print_kv("Won", &format_number(stats.games_won));
    print_kv("Lost", &format_number(stats.games_lost));
    print_kv("Win rate", &format_percent(stats.win_rate()));
    print_kv("Matchboxes", &format_number(agent.known_keys().len()));
    print_kv("Total beads", &agent.total_beads().to_string());
    print_kv("Average entropy", &format!("{:.3}", agent.average_entropy()));
}
