//! Forecast day sampling.
//!
//! The forecast endpoint returns a 3-hour-step time series. For the day
//! strip the dashboard shows one representative sample per calendar day:
//! the sample whose UTC hour is nearest 12:00, ties resolved in favour of
//! the first-seen sample.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::types::ForecastSample;

/// Maximum number of days represented in the strip.
const MAX_DAYS: usize = 5;

/// Reduce an ordered forecast series to at most one sample per UTC
/// calendar date.
///
/// Single pass; a sample replaces the current pick for its date only when
/// its distance from noon is strictly smaller. Output preserves the order
/// in which dates were first seen (no sort; chronological input yields
/// chronological output) and is truncated to 5 entries. Running the
/// sampler on its own output returns it unchanged.
pub fn daily_representatives(samples: &[ForecastSample]) -> Vec<ForecastSample> {
    let mut picks: Vec<(NaiveDate, u32, ForecastSample)> = Vec::new();

    for sample in samples {
        let Some(when) = DateTime::<Utc>::from_timestamp(sample.dt, 0) else {
            continue;
        };
        let date = when.date_naive();
        let score = when.hour().abs_diff(12);

        match picks.iter_mut().find(|(d, _, _)| *d == date) {
            Some(entry) => {
                if score < entry.1 {
                    entry.1 = score;
                    entry.2 = sample.clone();
                }
            }
            None => picks.push((date, score, sample.clone())),
        }
    }

    picks.truncate(MAX_DAYS);
    picks.into_iter().map(|(_, _, sample)| sample).collect()
}
