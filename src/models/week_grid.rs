use serde::Serialize;

use crate::models::life_stats::WEEKS_PER_YEAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Lived,
    Current,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub year: u32,
    pub week_index: u32,
    pub state: CellState,
}

/// Classifies a single week of the grid.
///
/// The lived check runs first, so when `weeks_lived` has a fractional part the
/// week containing "now" is already counted as lived and no cell is current.
pub fn cell_state(year: u32, week_index: u32, weeks_lived: f64) -> CellState {
    let global_week = (year as u64 * WEEKS_PER_YEAR as u64 + week_index as u64) as f64;
    if global_week < weeks_lived {
        CellState::Lived
    } else if global_week == weeks_lived.floor() {
        CellState::Current
    } else {
        CellState::Future
    }
}

/// A year-by-week grid of a life. Holds only its two inputs; every call to
/// [`WeekGrid::cells`] starts a fresh pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekGrid {
    weeks_lived: f64,
    total_years: u32,
}

pub fn classify(weeks_lived: f64, total_years: u32) -> WeekGrid {
    WeekGrid {
        weeks_lived,
        total_years,
    }
}

impl WeekGrid {
    pub fn total_years(&self) -> u32 {
        self.total_years
    }

    pub fn len(&self) -> usize {
        self.total_years as usize * WEEKS_PER_YEAR as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total_years == 0
    }

    /// Cells in year-major, week-minor order.
    pub fn cells(&self) -> Cells {
        Cells {
            weeks_lived: self.weeks_lived,
            total: self.len() as u64,
            next: 0,
        }
    }

    /// One row of states per year, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Vec<CellState>> + '_ {
        (0..self.total_years).map(move |year| {
            (0..WEEKS_PER_YEAR)
                .map(|week_index| cell_state(year, week_index, self.weeks_lived))
                .collect()
        })
    }

    pub fn current_cell(&self) -> Option<Cell> {
        self.cells().find(|cell| cell.state == CellState::Current)
    }
}

impl IntoIterator for WeekGrid {
    type Item = Cell;
    type IntoIter = Cells;

    fn into_iter(self) -> Cells {
        self.cells()
    }
}

#[derive(Debug, Clone)]
pub struct Cells {
    weeks_lived: f64,
    total: u64,
    next: u64,
}

impl Iterator for Cells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.total {
            return None;
        }
        let year = (self.next / WEEKS_PER_YEAR as u64) as u32;
        let week_index = (self.next % WEEKS_PER_YEAR as u64) as u32;
        self.next += 1;
        Some(Cell {
            year,
            week_index,
            state: cell_state(year, week_index, self.weeks_lived),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_weeks_mark_the_next_cell_current() {
        assert_eq!(cell_state(0, 9, 10.0), CellState::Lived);
        assert_eq!(cell_state(0, 10, 10.0), CellState::Current);
        assert_eq!(cell_state(0, 11, 10.0), CellState::Future);
    }

    #[test]
    fn fractional_weeks_have_no_current_cell() {
        assert_eq!(cell_state(0, 10, 10.5), CellState::Lived);
        assert_eq!(cell_state(0, 11, 10.5), CellState::Future);
        assert_eq!(classify(10.5, 2).current_cell(), None);
    }

    #[test]
    fn rows_match_cells() {
        let grid = classify(60.0, 3);
        let from_rows: Vec<CellState> = grid.rows().flatten().collect();
        let from_cells: Vec<CellState> = grid.cells().map(|c| c.state).collect();
        assert_eq!(from_rows, from_cells);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn size_hint_is_exact() {
        let mut cells = classify(0.0, 2).cells();
        assert_eq!(cells.len(), 104);
        cells.next();
        assert_eq!(cells.len(), 103);
    }
}
