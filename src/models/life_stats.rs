use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::debug;

pub const WEEKS_PER_YEAR: u32 = 52;
pub const DEFAULT_LIFESPAN: u32 = 80;
pub const MIN_LIFESPAN: u32 = 1;
pub const MAX_LIFESPAN: u32 = 120;

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
const MS_PER_WEEK: f64 = MS_PER_DAY * 7.0;
const MS_PER_YEAR: f64 = MS_PER_DAY * 365.25;

/// Snapshot of how much of a life has been used up as of some instant.
///
/// Recomputed from scratch whenever an input changes; it has no identity and
/// is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifeStats {
    pub weeks_lived: f64,
    pub weeks_remaining: f64,
    pub total_weeks: f64,
    pub percent_lived: f64,
    pub current_age: f64,
}

/// The three integers sent across the reflection boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReflectionRequest {
    pub age: u32,
    pub weeks_remaining: u32,
    pub expected_lifespan: u32,
}

impl LifeStats {
    pub fn reflection_inputs(&self, expected_lifespan: u32) -> ReflectionRequest {
        ReflectionRequest {
            age: self.current_age.floor() as u32,
            weeks_remaining: self.weeks_remaining.floor() as u32,
            expected_lifespan,
        }
    }

    pub fn has_weeks_remaining(&self) -> bool {
        self.weeks_remaining > 0.0
    }
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`). Blank or malformed input
/// is simply "not configured".
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Clamps a user supplied lifespan into the accepted `[1, 120]` range.
pub fn clamp_lifespan(years: i64) -> u32 {
    years.clamp(MIN_LIFESPAN as i64, MAX_LIFESPAN as i64) as u32
}

/// Computes life statistics for `birth_date` as of `now`.
///
/// Returns `None` when there is no birth date or it lies after `now`. The
/// birth date is taken as midnight UTC.
///
/// `expected_lifespan_years` must be at least 1. It is not checked here; with
/// zero the percentage is meaningless, so go through [`clamp_lifespan`].
pub fn compute(
    birth_date: Option<NaiveDate>,
    expected_lifespan_years: u32,
    now: DateTime<Utc>,
) -> Option<LifeStats> {
    let birth = birth_date?.and_time(NaiveTime::MIN).and_utc();
    let elapsed_ms = (now - birth).num_milliseconds();
    if elapsed_ms < 0 {
        debug!(%birth, %now, "birth date is in the future, no stats");
        return None;
    }

    let elapsed_ms = elapsed_ms as f64;
    let weeks_lived = elapsed_ms / MS_PER_WEEK;
    let total_weeks = f64::from(expected_lifespan_years) * f64::from(WEEKS_PER_YEAR);
    let weeks_remaining = (total_weeks - weeks_lived).max(0.0);
    let current_age = elapsed_ms / MS_PER_YEAR;
    let percent_lived = (weeks_lived / total_weeks * 100.0).min(100.0);

    Some(LifeStats {
        weeks_lived,
        weeks_remaining,
        total_weeks,
        percent_lived,
        current_age,
    })
}

pub fn compute_from_str(
    birth_date: &str,
    expected_lifespan_years: u32,
    now: DateTime<Utc>,
) -> Option<LifeStats> {
    compute(parse_birth_date(birth_date), expected_lifespan_years, now)
}
