//! Plain-text rendering for the terminal front end.
//!
//! Pure functions from game state to strings, so the views can be tested
//! without a terminal.

use std::time::Duration;

use trivia_core::grid::GRID_WIDTH;
use trivia_core::timer::{format_elapsed, format_millis};
use trivia_core::{QuestionPrompt, TILE_COUNT};
use trivia_types::LeaderboardEntry;

/// Shown when the leaderboard has no full clears yet.
pub const EMPTY_LEADERBOARD: &str = "No entries yet (be the first!)";

/// Shown when the leaderboard request fails.
pub const LEADERBOARD_FAILED: &str = "Could not load leaderboard.";

/// Render the board: `#n` for unlocked tiles, `[ ]` for locked ones.
pub fn render_grid(unlocked: &[bool; TILE_COUNT]) -> String {
    unlocked
        .chunks(GRID_WIDTH)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, open)| {
                    let number = row
                        .saturating_mul(GRID_WIDTH)
                        .saturating_add(col)
                        .saturating_add(1);
                    if *open {
                        format!("#{number:<2}")
                    } else {
                        String::from("[ ]")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status line: `tiles: k/9  time: MM:SS.mmm`.
pub fn render_status(tiles_unlocked: u8, elapsed: Duration) -> String {
    format!(
        "tiles: {tiles_unlocked}/{TILE_COUNT}  time: {}",
        format_elapsed(elapsed)
    )
}

/// Question view. Disabled choices are hidden; the rest keep their
/// one-based number so input maps back to the choice index.
pub fn render_prompt(prompt: &QuestionPrompt) -> String {
    let mut lines = vec![format!("Tile {}: {}", prompt.tile.number(), prompt.title)];
    lines.extend(
        prompt
            .choices
            .iter()
            .filter(|choice| !choice.disabled)
            .map(|choice| format!("  {}) {}", choice.index.saturating_add(1), choice.text)),
    );
    lines.push(String::from("  b) back"));
    lines.join("\n")
}

/// Ranked leaderboard lines, or the empty-state message.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_LEADERBOARD.to_owned();
    }
    entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            format!(
                "{:>2}. {} — {}",
                rank.saturating_add(1),
                entry.username,
                format_millis(entry.time_ms)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
