// Integration tests for the grid engine, driven end-to-end through a
// synthetic event source, plus the results and settings pipelines
mod fixtures;

use std::time::{Duration, Instant};

use chrono::NaiveTime;
use egui::{Pos2, Vec2};
use fixtures::Harness;
use meet_grid::grid::auto_scroll::scroll_velocity;
use meet_grid::grid::{DragMode, DragPhase, GlobalEvent, PointerInput, PointerKind, Propagation};
use meet_grid::models::cell::{CellCoord, HourBlockKey};
use meet_grid::models::event::Participant;
use meet_grid::models::settings::GridSettings;
use meet_grid::models::window::DisplayWindow;
use meet_grid::services::best_times::best_times;
use meet_grid::services::heatmap::{HeatLevel, Heatmap};
use meet_grid::services::settings::SettingsService;
use meet_grid::utils::date::generate_time_slots;
use pretty_assertions::assert_eq;

fn c(hour: usize, quarter: usize, date: usize) -> CellCoord {
    CellCoord::new(hour, quarter, date)
}

fn press(h: &mut Harness, coord: CellCoord, kind: PointerKind, at: Instant) -> Propagation {
    let pos = h.center(coord);
    let input = PointerInput { kind, pos, at };
    h.with_host(|grid, host| grid.cell_down(coord, input, host))
}

fn move_to(h: &mut Harness, kind: PointerKind, pos: Pos2, at: Instant) {
    h.bus.emit(GlobalEvent::PointerMove { kind, pos, at });
    h.pump();
}

fn release(h: &mut Harness, kind: PointerKind, at: Instant) {
    h.bus.emit(GlobalEvent::PointerUp { kind, at });
    h.pump();
}

fn drag(h: &mut Harness, from: CellCoord, to: CellCoord) {
    let now = Instant::now();
    press(h, from, PointerKind::Mouse, now);
    let target = h.center(to);
    move_to(h, PointerKind::Mouse, target, now);
    release(h, PointerKind::Mouse, now);
}

#[test]
fn test_drag_fills_hour_block_and_marks_it() {
    let mut h = Harness::new(3);
    drag(&mut h, c(2, 0, 0), c(2, 3, 0));

    let expected: Vec<usize> = (0..4).map(|q| c(2, q, 0).index(3)).collect();
    assert_eq!(h.selection.to_vec(), expected);
    assert!(h.grid.completed_marks().contains(HourBlockKey::new(2, 0)));
    assert_eq!(h.grid.drag_phase(), DragPhase::Idle);
}

#[test]
fn test_backward_drag_matches_forward() {
    let mut forward = Harness::new(3);
    drag(&mut forward, c(1, 2, 0), c(3, 1, 2));

    let mut backward = Harness::new(3);
    drag(&mut backward, c(3, 1, 2), c(1, 2, 0));

    assert!(!forward.selection.is_empty());
    assert_eq!(forward.selection.to_vec(), backward.selection.to_vec());
}

#[test]
fn test_deselect_drag_only_removes_selected_cells() {
    let mut h = Harness::new(2);
    let preselected = [c(0, 0, 0), c(0, 2, 0), c(1, 1, 1), c(5, 0, 0)];
    h.selection = preselected.iter().map(|cell| cell.index(2)).collect();

    let now = Instant::now();
    press(&mut h, c(0, 0, 0), PointerKind::Mouse, now);
    assert_eq!(h.grid.drag_mode(), Some(DragMode::Deselect));
    let target = h.center(c(1, 3, 1));
    move_to(&mut h, PointerKind::Mouse, target, now);
    release(&mut h, PointerKind::Mouse, now);

    // Only the cell outside the dragged rectangle survives
    assert_eq!(h.selection.to_vec(), vec![c(5, 0, 0).index(2)]);
}

#[test]
fn test_release_outside_grid_commits_drag() {
    let mut h = Harness::new(3);
    let now = Instant::now();

    press(&mut h, c(0, 0, 0), PointerKind::Mouse, now);
    let inside = h.center(c(1, 3, 1));
    move_to(&mut h, PointerKind::Mouse, inside, now);
    // Past the last column and inside the right auto-scroll zone
    move_to(&mut h, PointerKind::Mouse, Pos2::new(470.0, 50.0), now);
    assert!(h.grid.is_auto_scrolling());

    release(&mut h, PointerKind::Mouse, now);
    assert_eq!(h.selection.len(), 16);
    assert!(!h.grid.is_auto_scrolling());
    assert_eq!(h.grid.drag_phase(), DragPhase::Idle);
}

#[test]
fn test_mouse_tap_never_drags_or_scrolls() {
    let mut h = Harness::new(3);
    let now = Instant::now();
    // Bottom auto-scroll zone
    let coord = c(9, 0, 1);
    let pos = h.center(coord);

    press(&mut h, coord, PointerKind::Mouse, now);
    move_to(&mut h, PointerKind::Mouse, pos + Vec2::new(1.0, 1.0), now);
    assert_eq!(h.grid.drag_phase(), DragPhase::Anchored);
    assert!(!h.grid.is_auto_scrolling());

    release(&mut h, PointerKind::Mouse, now + Duration::from_millis(120));
    assert_eq!(h.selection.to_vec(), vec![coord.index(3)]);
    assert_eq!(h.viewport.offset, Vec2::ZERO);
}

#[test]
fn test_touch_tap_toggles_once() {
    let mut h = Harness::new(3);
    let now = Instant::now();
    let coord = c(4, 2, 2);
    let pos = h.center(coord);

    assert_eq!(press(&mut h, coord, PointerKind::Touch, now), Propagation::PreventDefault);
    move_to(&mut h, PointerKind::Touch, pos + Vec2::new(2.0, -2.0), now);
    release(&mut h, PointerKind::Touch, now + Duration::from_millis(150));

    assert_eq!(h.selection.to_vec(), vec![coord.index(3)]);
    assert!(!h.grid.is_auto_scrolling());
}

#[test]
fn test_touch_tap_on_full_hour_block_opens_it() {
    let mut h = Harness::new(3);
    let block = HourBlockKey::new(2, 1);
    h.selection = block.cells().map(|cell| cell.index(3)).collect();
    let now = Instant::now();
    let rect = h.layout.hour_block_rect(block);

    // Bottom quarter row of the block
    let input = PointerInput::touch(Pos2::new(rect.center().x, rect.bottom() - 4.0), now);
    h.with_host(|grid, host| grid.full_hour_down(block, rect, input, host));
    release(&mut h, PointerKind::Touch, now + Duration::from_millis(90));

    assert_eq!(h.selection.len(), 3);
    assert!(!h.selection.contains(c(2, 3, 1).index(3)));
}

#[test]
fn test_vertical_touch_drag_paints_range() {
    let mut h = Harness::new(3);
    let now = Instant::now();

    press(&mut h, c(0, 0, 2), PointerKind::Touch, now);
    let target = h.center(c(0, 3, 2));
    move_to(&mut h, PointerKind::Touch, target, now);
    assert!(h.grid.is_dragging());
    release(&mut h, PointerKind::Touch, now + Duration::from_millis(600));

    assert_eq!(h.selection.len(), 4);
    assert!(h.grid.completed_marks().contains(HourBlockKey::new(0, 2)));
}

#[test]
fn test_horizontal_touch_swipe_scrolls_without_selecting() {
    let mut h = Harness::new(3);
    let now = Instant::now();
    let start = h.center(c(2, 0, 2));

    press(&mut h, c(2, 0, 2), PointerKind::Touch, now);
    move_to(&mut h, PointerKind::Touch, start - Vec2::new(60.0, 5.0), now);
    move_to(&mut h, PointerKind::Touch, start - Vec2::new(90.0, -40.0), now);
    release(&mut h, PointerKind::Touch, now + Duration::from_millis(200));

    assert!(h.selection.is_empty());
    assert_eq!(h.viewport.offset.x, 90.0);
    assert_eq!(h.viewport.scrollbar, 90.0);
}

#[test]
fn test_auto_scroll_velocity_grows_toward_edge() {
    let bounds = h_bounds();
    assert_eq!(scroll_velocity(Pos2::new(240.0, 300.0), bounds, 60.0, 10.0), Vec2::ZERO);

    let speeds: Vec<f32> = [590.0, 610.0, 640.0, 680.0]
        .iter()
        .map(|y| scroll_velocity(Pos2::new(240.0, *y), bounds, 60.0, 10.0).y)
        .collect();
    assert!(speeds[0] > 0.0);
    assert!(speeds.windows(2).all(|pair| pair[1] > pair[0]));
}

fn h_bounds() -> egui::Rect {
    egui::Rect::from_min_size(Pos2::ZERO, Vec2::new(480.0, 640.0))
}

#[test]
fn test_tick_drives_auto_scroll_until_release() {
    let mut h = Harness::new(3);
    let now = Instant::now();

    press(&mut h, c(0, 0, 1), PointerKind::Mouse, now);
    move_to(&mut h, PointerKind::Mouse, Pos2::new(100.0, 630.0), now);
    for step in 1..=3 {
        h.bus.emit(GlobalEvent::Tick { at: now + Duration::from_millis(16 * step) });
    }
    h.pump();
    let scrolled = h.viewport.offset.y;
    assert!(scrolled > 0.0);
    // The content moved under the held pointer, so the drag grew with it
    assert_eq!(h.grid.drag_range().map(|range| range.current()), Some(c(10, 0, 1)));
    assert!(h.selection.contains(c(10, 0, 1).index(3)));

    release(&mut h, PointerKind::Mouse, now);
    h.bus.emit(GlobalEvent::Tick { at: now + Duration::from_millis(80) });
    h.pump();
    assert_eq!(h.viewport.offset.y, scrolled);
}

#[test]
fn test_cancel_keeps_partial_toggles() {
    let mut h = Harness::new(3);
    let now = Instant::now();

    press(&mut h, c(0, 0, 0), PointerKind::Mouse, now);
    let target = h.center(c(0, 2, 0));
    move_to(&mut h, PointerKind::Mouse, target, now);
    let partial = h.selection.to_vec();

    h.bus.emit(GlobalEvent::PointerCancel { at: now });
    h.pump();
    release(&mut h, PointerKind::Mouse, now);

    assert_eq!(partial.len(), 3);
    assert_eq!(h.selection.to_vec(), partial);
    assert_eq!(h.grid.drag_phase(), DragPhase::Idle);
}

#[test]
fn test_disabled_cells_reject_presses_and_sweeps() {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    let window = DisplayWindow::default().with_event_bounds(Some(nine), Some(ten));
    let mut h = Harness::with_window(1, window);

    press(&mut h, c(0, 0, 0), PointerKind::Mouse, Instant::now());
    assert_eq!(h.grid.drag_phase(), DragPhase::Idle);
    assert!(h.selection.is_empty());

    // 9 AM is hour row 3; sweep down into the disabled 10 AM row
    drag(&mut h, c(3, 0, 0), c(4, 3, 0));
    let expected: Vec<usize> = (0..4).map(|q| c(3, q, 0).index(1)).collect();
    assert_eq!(h.selection.to_vec(), expected);
}

#[test]
fn test_unmount_removes_listeners() {
    let mut h = Harness::new(2);
    let now = Instant::now();
    press(&mut h, c(0, 0, 0), PointerKind::Mouse, now);
    move_to(&mut h, PointerKind::Mouse, Pos2::new(5.0, 300.0), now);
    assert!(h.grid.is_auto_scrolling());
    let swept = h.selection.to_vec();

    h.grid.unmount(&mut h.bus);
    assert_eq!(h.bus.subscriber_count(), 0);
    assert!(!h.grid.is_auto_scrolling());

    // A second mount subscribes afresh and nothing stale is delivered
    h.grid.mount(&mut h.bus);
    assert_eq!(h.bus.subscriber_count(), 1);
    release(&mut h, PointerKind::Mouse, now);
    assert_eq!(h.selection.to_vec(), swept);
}

#[test]
fn test_results_pipeline() {
    let dates = fixtures::dates::first_week_2025();
    let slots = generate_time_slots(6, 23);
    let participants = vec![
        Participant::new(1, "Ana", vec![c(3, 0, 1).index(3), c(3, 1, 1).index(3)]),
        Participant::new(2, "Bo", vec![c(3, 0, 1).index(3)]),
        Participant::new(3, "Cy", vec![c(3, 0, 1).index(3), c(0, 0, 0).index(3)]),
        Participant::new(4, "Di", vec![]),
    ];

    let heatmap = Heatmap::group(&participants, dates.len(), slots.len());
    assert_eq!(heatmap.level(c(3, 0, 1).index(3)), Some(HeatLevel::VeryHigh));
    assert_eq!(heatmap.level(c(3, 1, 1).index(3)), Some(HeatLevel::Low));
    assert_eq!(heatmap.level(c(3, 2, 1).index(3)), Some(HeatLevel::Empty));

    let best = best_times(&participants, &dates, &slots, 3);
    assert_eq!(best[0].day, "Tuesday, January 7");
    assert_eq!(best[0].time, "9:00 AM");
    assert_eq!(best[0].count, 3);
    assert_eq!(best[1].day, "Monday, January 6");
    assert_eq!(best[1].time, "6:00 AM");
}

#[test]
fn test_settings_persistence() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = SettingsService::new(dir.path().join("settings.toml"));

    let mut settings = service.load().unwrap();
    assert_eq!(settings, GridSettings::default());

    settings.auto_scroll_margin_px = 40.0;
    settings.day_end_hour = 20;
    service.save(&settings).unwrap();

    let reloaded = service.load().unwrap();
    assert_eq!(reloaded.auto_scroll_margin_px, 40.0);
    assert_eq!(reloaded.display_window().hour_count(), 15);
}
