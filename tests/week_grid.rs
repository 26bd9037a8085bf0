use lifeCalendar::models::week_grid::{Cell, CellState, classify};

fn state_at(cells: &[Cell], year: u32, week_index: u32) -> CellState {
    cells
        .iter()
        .find(|c| c.year == year && c.week_index == week_index)
        .map(|c| c.state)
        .expect("cell should exist")
}

#[test]
fn scenario_a_first_week_of_second_year_is_current() {
    let cells: Vec<Cell> = classify(52.0, 80).cells().collect();
    assert_eq!(state_at(&cells, 0, 0), CellState::Lived);
    assert_eq!(state_at(&cells, 1, 0), CellState::Current);
    assert_eq!(state_at(&cells, 1, 1), CellState::Future);
}

#[test]
fn scenario_b_everything_ahead() {
    let cells: Vec<Cell> = classify(0.0, 80).cells().collect();
    assert_eq!(cells[0].state, CellState::Current);
    assert!(cells[1..].iter().all(|c| c.state == CellState::Future));
}

#[test]
fn scenario_d_no_current_cell_past_the_horizon() {
    let grid = classify(60.0, 1);
    assert_eq!(grid.cells().count(), 52);
    assert!(grid.cells().all(|c| c.state == CellState::Lived));
    assert_eq!(grid.current_cell(), None);
}

#[test]
fn exact_horizon_has_no_current_cell() {
    let grid = classify(104.0, 2);
    assert!(grid.cells().all(|c| c.state != CellState::Current));
}

#[test]
fn order_is_year_major_week_minor() {
    let cells: Vec<Cell> = classify(30.0, 3).into_iter().collect();
    assert_eq!(cells.len(), 3 * 52);
    for (idx, cell) in cells.iter().enumerate() {
        assert_eq!(cell.year as usize, idx / 52);
        assert_eq!(cell.week_index as usize, idx % 52);
    }
}

#[test]
fn zero_years_is_empty() {
    let grid = classify(10.0, 0);
    assert!(grid.is_empty());
    assert_eq!(grid.cells().next(), None);
    assert_eq!(grid.rows().count(), 0);
}

#[test]
fn at_most_one_current_cell() {
    for tenths in 0..2000u32 {
        let weeks_lived = tenths as f64 / 10.0;
        let current = classify(weeks_lived, 3)
            .cells()
            .filter(|c| c.state == CellState::Current)
            .count();
        assert!(current <= 1, "weeks_lived {weeks_lived}");
        if weeks_lived >= 156.0 {
            assert_eq!(current, 0);
        }
    }
}

#[test]
fn grid_can_be_walked_twice() {
    let grid = classify(75.0, 5);
    let first: Vec<Cell> = grid.cells().collect();
    let second: Vec<Cell> = grid.cells().collect();
    assert_eq!(first, second);
}

#[test]
fn lived_count_is_ceiling_of_weeks_lived() {
    let grid = classify(10.25, 1);
    let lived = grid.cells().filter(|c| c.state == CellState::Lived).count();
    assert_eq!(lived, 11);
}
