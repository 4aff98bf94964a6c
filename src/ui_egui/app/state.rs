//! Poll state behind the app: the event, submitted participants, the
//! in-progress selection and which participant the heatmap focuses on.

use crate::grid::selection::CellSelection;
use crate::models::event::{BestTime, MeetingEvent, Participant};
use crate::models::settings::GridSettings;
use crate::services::best_times::{best_times, DEFAULT_BEST_TIMES_LIMIT};
use crate::services::heatmap::Heatmap;
use crate::utils::date::generate_time_slots;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewType {
    /// Participant marks their own availability
    #[default]
    Edit,
    /// Read-only heatmap and best times
    Results,
}

#[derive(Debug, Clone)]
pub struct PollState {
    pub event: MeetingEvent,
    pub participants: Vec<Participant>,
    pub selection: CellSelection,
    pub participant_name: String,
    /// Participant shown alone in the heatmap; `None` shows the group
    pub focus: Option<i64>,
    pub view: ViewType,
    day_start_hour: u32,
    day_end_hour: u32,
}

impl PollState {
    pub fn new(event: MeetingEvent, settings: &GridSettings) -> Self {
        Self {
            event,
            participants: Vec::new(),
            selection: CellSelection::new(),
            participant_name: String::new(),
            focus: None,
            view: ViewType::Edit,
            day_start_hour: settings.day_start_hour,
            day_end_hour: settings.day_end_hour,
        }
    }

    /// Save the current selection under the entered name and start fresh.
    pub fn submit(&mut self) -> Result<&Participant, String> {
        let name = self.participant_name.trim();
        if name.is_empty() {
            return Err("Enter your name before submitting".to_string());
        }
        if self.selection.is_empty() {
            return Err("Select at least one time slot".to_string());
        }

        let id = self.participants.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let participant = Participant::new(id, name, self.selection.to_vec());
        log::info!(
            "Participant {} submitted {} slots",
            participant.name,
            participant.availability.len()
        );

        self.participants.push(participant);
        self.selection.clear();
        self.participant_name.clear();
        self.view = ViewType::Results;
        Ok(&self.participants[self.participants.len() - 1])
    }

    pub fn time_slots(&self) -> Vec<String> {
        generate_time_slots(self.day_start_hour, self.day_end_hour)
    }

    fn slot_count(&self) -> usize {
        self.time_slots().len()
    }

    /// Heatmap for the current focus. A focus on a removed participant
    /// falls back to the group.
    pub fn heatmap(&self) -> Heatmap {
        let focused = self
            .focus
            .and_then(|id| self.participants.iter().find(|p| p.id == id));
        match focused {
            Some(participant) => Heatmap::individual(participant, self.event.date_count(), self.slot_count()),
            None => Heatmap::group(&self.participants, self.event.date_count(), self.slot_count()),
        }
    }

    pub fn best_times(&self) -> Vec<BestTime> {
        best_times(
            &self.participants,
            &self.event.dates,
            &self.time_slots(),
            DEFAULT_BEST_TIMES_LIMIT,
        )
    }
}
