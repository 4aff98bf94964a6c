// Date and time-slot helpers
// Labels and conversions for the quarter-hour availability grid

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::models::cell::SLOT_MINUTES;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// "HH:MM" (24h) to minutes since midnight.
pub fn time_to_minutes(time: &str) -> Option<u32> {
    let (hours, minutes) = time.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Minutes since midnight of a `NaiveTime`, ignoring seconds.
pub fn naive_time_minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// "h:mm AM" (12h slot label) to minutes since midnight.
pub fn time_slot_to_minutes(slot: &str) -> Option<u32> {
    let (clock, period) = slot.trim().split_once(' ')?;
    let (hour, minute) = clock.split_once(':')?;
    let mut hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    match period {
        "AM" if hour == 12 => hour = 0,
        "AM" => {}
        "PM" if hour < 12 => hour += 12,
        "PM" => {}
        _ => return None,
    }
    Some(hour * 60 + minute)
}

/// 12-hour clock label for minutes since midnight, e.g. "6:00 AM".
pub fn slot_label(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let (hour, minute) = (minutes / 60, minutes % 60);
    format!("{}:{:02} {}", hour12(hour), minute, period(hour))
}

/// Hour row label, e.g. "6 AM".
pub fn hour_label(hour: u32) -> String {
    format!("{} {}", hour12(hour % 24), period(hour % 24))
}

fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn period(hour: u32) -> &'static str {
    if hour >= 12 {
        "PM"
    } else {
        "AM"
    }
}

/// Quarter-hour slot labels from `start_hour` through the last quarter of
/// `end_hour`.
pub fn generate_time_slots(start_hour: u32, end_hour: u32) -> Vec<String> {
    (start_hour..=end_hour.min(23))
        .flat_map(|hour| (0..60).step_by(SLOT_MINUTES as usize).map(move |minute| hour * 60 + minute))
        .map(slot_label)
        .collect()
}

pub fn generate_hour_labels(start_hour: u32, end_hour: u32) -> Vec<String> {
    (start_hour..=end_hour.min(23)).map(hour_label).collect()
}

/// Keep slots in `[start, end)`. Both bounds must be present for any
/// filtering to happen.
pub fn filter_time_slots(slots: &[String], start: Option<&str>, end: Option<&str>) -> Vec<String> {
    let bounds = start.and_then(time_to_minutes).zip(end.and_then(time_to_minutes));
    let Some((start, end)) = bounds else {
        return slots.to_vec();
    };

    slots
        .iter()
        .filter(|slot| {
            time_slot_to_minutes(slot)
                .map(|minutes| minutes >= start && minutes < end)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Group slot labels under their hour label ("9 AM"), keeping first-seen order.
pub fn group_time_slots_by_hour(slots: &[String]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for slot in slots {
        let Some(minutes) = time_slot_to_minutes(slot) else {
            continue;
        };
        let label = hour_label(minutes / 60);
        match groups.iter_mut().find(|(hour, _)| *hour == label) {
            Some((_, members)) => members.push(slot.clone()),
            None => groups.push((label, vec![slot.clone()])),
        }
    }
    groups
}

/// "14:30" -> "2:30 PM".
pub fn format_time_display(time24: &str) -> Option<String> {
    time_to_minutes(time24).map(slot_label)
}

pub fn is_valid_time_increment(time: &str) -> bool {
    time_to_minutes(time)
        .map(|minutes| minutes % SLOT_MINUTES == 0)
        .unwrap_or(false)
}

/// Round "HH:MM" to the nearest quarter hour, wrapping past midnight.
pub fn round_to_nearest_fifteen(time: &str) -> Option<String> {
    let minutes = time_to_minutes(time)?;
    let rounded = ((minutes + SLOT_MINUTES / 2) / SLOT_MINUTES * SLOT_MINUTES) % MINUTES_PER_DAY;
    Some(format!("{:02}:{:02}", rounded / 60, rounded % 60))
}

/// Every date from `start` to `end`, inclusive. Empty when inverted.
pub fn generate_date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

/// Column header, e.g. "Mon, Jan 6".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Best-time day label, e.g. "Monday, January 6".
pub fn format_long_day(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
