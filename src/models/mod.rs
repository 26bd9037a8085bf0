pub mod life_stats;
pub mod week_grid;
