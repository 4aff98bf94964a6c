// Best times service
// Ranks (date, time slot) pairs by how many participants are available

use std::collections::BTreeMap;
use std::cmp::Reverse;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::models::event::{BestTime, Participant};
use crate::utils::date::format_long_day;

/// Number of recommendations shown on the results page.
pub const DEFAULT_BEST_TIMES_LIMIT: usize = 3;

/// Rank availability by count, then date, then time of day.
///
/// Each cell index maps to `date = index % dates.len()` and
/// `slot = index / dates.len()`; indices beyond `time_slots` are skipped.
pub fn best_times(
    participants: &[Participant],
    dates: &[NaiveDate],
    time_slots: &[String],
    limit: usize,
) -> Vec<BestTime> {
    if participants.is_empty() || dates.is_empty() {
        return Vec::new();
    }

    // Keyed by (date index, slot index); dates are kept in chronological order
    let mut counts: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    for participant in participants {
        for &index in &participant.availability {
            let (date, slot) = (index % dates.len(), index / dates.len());
            if slot < time_slots.len() {
                *counts.entry((date, slot)).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by_key(|&((date, slot), count)| (Reverse(count), dates[date], slot));

    ranked
        .into_iter()
        .take(limit)
        .map(|((date, slot), count)| BestTime {
            day: format_long_day(dates[date]),
            time: time_slots[slot].clone(),
            count,
        })
        .collect()
}

/// Serialize recommendations for sharing.
pub fn export_json(best: &[BestTime]) -> Result<String> {
    serde_json::to_string_pretty(best).context("failed to serialize best times")
}
