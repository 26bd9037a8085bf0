use std::fmt::Write;

use crate::models::life_stats::LifeStats;
use crate::models::week_grid::{CellState, WeekGrid};
use crate::service::reflection_service::PLACEHOLDER_REFLECTION;

pub const LIVED_GLYPH: char = '·';
pub const CURRENT_GLYPH: char = '◉';
pub const FUTURE_GLYPH: char = '●';

pub const EMPTY_STATE: &str = "Set your birth date to open your life map.";

pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Lived => LIVED_GLYPH,
        CellState::Current => CURRENT_GLYPH,
        CellState::Future => FUTURE_GLYPH,
    }
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_summary(stats: &LifeStats, lifespan: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Life used      {:.1}%", stats.percent_lived);
    let _ = writeln!(out, "Weeks left     {}", format_thousands(stats.weeks_remaining.floor() as u64));
    let _ = writeln!(out, "Current age    {:.1}", stats.current_age);
    let _ = writeln!(
        out,
        "Week {} / {} (expected {} years)",
        format_thousands(stats.weeks_lived.floor() as u64),
        format_thousands(stats.total_weeks.floor() as u64),
        lifespan
    );
    out
}

pub fn render_reflection(reflection: Option<&str>) -> String {
    let text = reflection
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(PLACEHOLDER_REFLECTION);
    format!("「{}」", text)
}

/// One line per year, labelled from 1, followed by a legend.
pub fn render_grid(grid: &WeekGrid) -> String {
    let mut out = String::new();
    for (year, row) in grid.rows().enumerate() {
        let _ = write!(out, "{:>3} ", year + 1);
        out.extend(row.into_iter().map(glyph));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "    {} lived  {} this week  {} future",
        LIVED_GLYPH, CURRENT_GLYPH, FUTURE_GLYPH
    );
    out
}
