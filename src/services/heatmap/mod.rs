// Heatmap service
// Aggregates participant availability into per-cell counts and heat levels

use crate::models::event::Participant;

/// Intensity bracket for a read-only heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeatLevel {
    /// Nobody available
    Empty,
    /// Up to and including a quarter of participants
    Low,
    /// Above a quarter, below half
    Medium,
    /// Half up to three quarters
    High,
    /// Three quarters or more, not everyone
    VeryHigh,
    /// Everyone
    Full,
    /// Binary "available" used by the individual view
    Available,
}

/// Which participants the heatmap is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeatView {
    #[default]
    Group,
    /// One participant's own availability
    Individual,
}

/// Count, per cell index, how many participants marked it. Indices outside
/// `date_count * slot_count` are ignored; duplicate indices within one
/// participant count once.
pub fn build_heatmap(participants: &[Participant], date_count: usize, slot_count: usize) -> Vec<usize> {
    let cell_count = date_count * slot_count;
    let mut counts = vec![0usize; cell_count];
    let mut seen = vec![false; cell_count];

    for participant in participants {
        seen.iter_mut().for_each(|flag| *flag = false);
        for &index in &participant.availability {
            if index < cell_count && !seen[index] {
                seen[index] = true;
                counts[index] += 1;
            }
        }
    }
    counts
}

/// Bracket `count` against `max_participants`.
///
/// Brackets are closed at the low end of each boundary except the first,
/// so one of four lands in `Low` and three of four in `VeryHigh`.
pub fn classify(count: usize, max_participants: usize, view: HeatView) -> HeatLevel {
    if view == HeatView::Individual || max_participants == 1 {
        return if count > 0 {
            HeatLevel::Available
        } else {
            HeatLevel::Empty
        };
    }
    if count == 0 || max_participants == 0 {
        return HeatLevel::Empty;
    }
    if count >= max_participants {
        return HeatLevel::Full;
    }

    let (scaled, m) = (count * 4, max_participants);
    if scaled <= m {
        HeatLevel::Low
    } else if scaled < 2 * m {
        HeatLevel::Medium
    } else if scaled < 3 * m {
        HeatLevel::High
    } else {
        HeatLevel::VeryHigh
    }
}

/// Heat level of one cell for rendering. Editor grids and empty heatmaps
/// have no heat level; missing entries count as zero.
pub fn cell_heat_level(
    read_only: bool,
    heatmap: &[usize],
    index: usize,
    max_participants: usize,
    view: HeatView,
) -> Option<HeatLevel> {
    if !read_only || heatmap.is_empty() {
        return None;
    }
    let count = heatmap.get(index).copied().unwrap_or(0);
    Some(classify(count, max_participants, view))
}

/// Heatmap data for the read-only view: either the whole group or one
/// participant in focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    counts: Vec<usize>,
    max_participants: usize,
    view: HeatView,
}

impl Heatmap {
    pub fn group(participants: &[Participant], date_count: usize, slot_count: usize) -> Self {
        Self {
            counts: build_heatmap(participants, date_count, slot_count),
            max_participants: participants.len(),
            view: HeatView::Group,
        }
    }

    pub fn individual(participant: &Participant, date_count: usize, slot_count: usize) -> Self {
        Self {
            counts: build_heatmap(std::slice::from_ref(participant), date_count, slot_count),
            max_participants: 1,
            view: HeatView::Individual,
        }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn count(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    pub fn view(&self) -> HeatView {
        self.view
    }

    pub fn level(&self, index: usize) -> Option<HeatLevel> {
        cell_heat_level(true, &self.counts, index, self.max_participants, self.view)
    }
}
