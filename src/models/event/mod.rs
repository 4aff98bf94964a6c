// Event module
// A meeting poll: candidate dates plus an optional time-of-day window

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::window::{DisplayWindow, GridShape};

/// Meeting poll created by an organizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingEvent {
    pub id: Option<String>,
    pub name: String,
    /// Candidate dates, ordered; a cell's date index points into this list
    pub dates: Vec<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl MeetingEvent {
    /// Create a new meeting poll
    ///
    /// # Arguments
    /// * `name` - Event name (required, non-empty)
    /// * `dates` - Candidate dates (at least one). Sorted and de-duplicated.
    ///
    /// # Examples
    /// ```
    /// use meet_grid::models::event::MeetingEvent;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let event = MeetingEvent::new("Team Sync", vec![day]).unwrap();
    /// assert_eq!(event.date_count(), 1);
    /// ```
    pub fn new(name: impl Into<String>, dates: Vec<NaiveDate>) -> Result<Self, String> {
        let mut dates = dates;
        dates.sort();
        dates.dedup();

        let event = Self {
            id: None,
            name: name.into(),
            dates,
            start_time: None,
            end_time: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Restrict availability to a time-of-day window
    pub fn with_time_range(mut self, start: NaiveTime, end: NaiveTime) -> Result<Self, String> {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Event name cannot be empty".to_string());
        }

        if self.dates.is_empty() {
            return Err("Event needs at least one candidate date".to_string());
        }

        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end <= start {
                return Err("Event end time must be after start time".to_string());
            }
        }

        Ok(())
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Grid dimensions for this event inside the given display window
    pub fn grid_shape(&self, window: DisplayWindow) -> GridShape {
        GridShape::new(
            self.dates.len(),
            window.with_event_bounds(self.start_time, self.end_time),
        )
    }
}

/// Someone who answered the poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    /// Selected cell indices
    pub availability: Vec<usize>,
}

impl Participant {
    pub fn new(id: i64, name: impl Into<String>, availability: Vec<usize>) -> Self {
        Self {
            id,
            name: name.into(),
            availability,
        }
    }
}

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTime {
    /// e.g. "Monday, March 10"
    pub day: String,
    /// e.g. "9:15 AM"
    pub time: String,
    pub count: usize,
}
