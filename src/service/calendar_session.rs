use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::models::life_stats::{
    self, DEFAULT_LIFESPAN, LifeStats, ReflectionRequest, clamp_lifespan, parse_birth_date,
};
use crate::models::week_grid::{self, WeekGrid};
use crate::store::{BIRTH_DATE_KEY, LIFESPAN_KEY, PreferenceStore};

/// Maps raw lifespan input to a usable value. Only the leading integer
/// counts (`"90abc"` is 90); zero or no leading digits means the default,
/// anything else is clamped into range.
pub fn lifespan_from_input(raw: &str) -> u32 {
    match leading_integer(raw) {
        Some(0) | None => DEFAULT_LIFESPAN,
        Some(years) => clamp_lifespan(years),
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    // Too many digits for i64 still means "very large".
    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// The two user inputs plus the store they are remembered in.
///
/// Store failures are logged and ignored; they never stop stats or the grid
/// from being produced.
pub struct CalendarSession<S: PreferenceStore> {
    store: S,
    birth_date: String,
    lifespan: u32,
}

impl<S: PreferenceStore> CalendarSession<S> {
    pub fn load(store: S) -> Self {
        let birth_date = match store.get(BIRTH_DATE_KEY) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "failed to read stored birth date");
                String::new()
            }
        };
        let lifespan = match store.get(LIFESPAN_KEY) {
            Ok(Some(raw)) => lifespan_from_input(&raw),
            Ok(None) => DEFAULT_LIFESPAN,
            Err(e) => {
                warn!(error = %e, "failed to read stored lifespan");
                DEFAULT_LIFESPAN
            }
        };
        debug!(birth_date = %birth_date, lifespan, "loaded calendar session");
        Self {
            store,
            birth_date,
            lifespan,
        }
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        parse_birth_date(&self.birth_date)
    }

    pub fn raw_birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    pub fn set_birth_date(&mut self, raw: &str) {
        self.birth_date = raw.trim().to_string();
    }

    pub fn set_lifespan(&mut self, years: i64) {
        self.lifespan = clamp_lifespan(years);
    }

    /// Stats for the current inputs, without touching the store.
    pub fn stats(&self, now: DateTime<Utc>) -> Option<LifeStats> {
        life_stats::compute(self.birth_date(), self.lifespan, now)
    }

    /// Recomputes stats and, when there are any, writes both inputs through
    /// to the store.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Option<LifeStats> {
        let stats = self.stats(now)?;
        if let Some(date) = self.birth_date() {
            self.persist(&date);
        }
        Some(stats)
    }

    pub fn grid(&self, now: DateTime<Utc>) -> Option<WeekGrid> {
        let stats = self.stats(now)?;
        Some(week_grid::classify(stats.weeks_lived, self.lifespan))
    }

    /// What to ask the reflection provider, if anything. Nothing is asked
    /// once no weeks remain.
    pub fn reflection_request(&self, now: DateTime<Utc>) -> Option<ReflectionRequest> {
        let stats = self.stats(now)?;
        if !stats.has_weeks_remaining() {
            return None;
        }
        Some(stats.reflection_inputs(self.lifespan))
    }

    pub fn reset(&mut self) {
        self.birth_date.clear();
        self.lifespan = DEFAULT_LIFESPAN;
        for key in [BIRTH_DATE_KEY, LIFESPAN_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "failed to remove stored preference");
            }
        }
        info!("calendar reset");
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, date: &NaiveDate) {
        let date = date.format("%Y-%m-%d").to_string();
        let lifespan = self.lifespan.to_string();
        for (key, value) in [(BIRTH_DATE_KEY, date.as_str()), (LIFESPAN_KEY, lifespan.as_str())] {
            if let Err(e) = self.store.set(key, value) {
                warn!(key, error = %e, "failed to save preference");
            }
        }
    }
}
