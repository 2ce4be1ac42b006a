use timeline_core::{
    build_sections, CalendarDate, LayoutIndex, MonthGrid, ScrollCommand, ScrollReason,
    SectionMetrics, SyncConfig, SyncController, TaskCounts, WeekStart, YearMonth,
};

// Default metrics give every empty day a 216-unit section, so in the May 2024
// grid (Apr 28 .. Jun 8) a date's offset is `216 * days since Apr 28`.
const DAY: f64 = 216.0;

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("valid test date")
}

fn layout_for(year: i32, month: i32) -> LayoutIndex {
    let grid = MonthGrid::generate_for(YearMonth::new(year, month), WeekStart::Sunday);
    LayoutIndex::build(build_sections(
        grid.dates(),
        &TaskCounts::new(),
        &SectionMetrics::default(),
    ))
}

fn scroll_to(offset: f64) -> Option<ScrollCommand> {
    Some(ScrollCommand {
        offset,
        animated: false,
    })
}

/// Controller selected on `initial` whose mount scroll has landed and whose
/// debounce window has closed by t=1000.
fn mounted(initial: CalendarDate, layout: &LayoutIndex) -> SyncController {
    let mut controller = SyncController::new(initial, SyncConfig::default());
    let output = controller.on_layout_ready(layout, 0);
    assert_eq!(output.scroll, scroll_to(layout.offset_of(&initial).unwrap()));
    controller
}

#[test]
fn mount_scroll_reveals_initial_date_once() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    assert_eq!(controller.state().last_known_scroll_offset, 12.0 * DAY);
    assert!(controller.pending_scroll().is_none());
    assert!(controller.on_layout_ready(&may, 10).is_empty());
}

#[test]
fn tap_in_visible_month_scrolls_once_to_layout_offset() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    let output = controller.tap_date(date(2024, 5, 15), &may, 1_000);

    assert_eq!(output.scroll, scroll_to(17.0 * DAY));
    assert!(!output.visible_month_changed);
    let state = controller.state();
    assert_eq!(state.selected_date, date(2024, 5, 15));
    assert_eq!(state.visible_month, YearMonth::new(2024, 5));
    assert_eq!(state.last_known_scroll_offset, 17.0 * DAY);
    assert!(state.is_programmatic_scroll_in_flight);
    assert!(controller.on_layout_ready(&may, 1_001).is_empty());
}

#[test]
fn tap_more_than_one_day_earlier_may_scroll_backward() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 15), &may);

    let output = controller.tap_date(date(2024, 5, 10), &may, 1_000);

    assert_eq!(output.scroll, scroll_to(12.0 * DAY));
    assert_eq!(controller.selected_date(), date(2024, 5, 10));
}

#[test]
fn tap_one_day_earlier_below_floor_selects_without_scrolling() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 15), &may);

    let output = controller.tap_date(date(2024, 5, 14), &may, 1_000);

    assert!(output.is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 14));
    assert!(controller.state().is_programmatic_scroll_in_flight);
}

#[test]
fn suppressed_tap_keeps_earlier_tap_scroll_from_reselecting() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 15), &may);

    let first = controller.tap_date(date(2024, 5, 20), &may, 1_000);
    assert_eq!(first.scroll, scroll_to(22.0 * DAY));

    // May 19 sits below the backward floor of the May 20 scroll.
    let second = controller.tap_date(date(2024, 5, 19), &may, 1_050);
    assert!(second.is_empty());
    assert!(controller.state().is_programmatic_scroll_in_flight);

    // The host is still settling the first tap's scroll.
    assert!(controller.on_scroll(22.0 * DAY, &may, 1_060).is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 19));

    controller.tick(1_170);
    assert!(!controller.state().is_programmatic_scroll_in_flight);
}

#[test]
fn small_backward_correction_within_tolerance_is_allowed() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 15), &may);

    // User drifts 28 units into May 15; re-tapping it snaps back to the header.
    let drift = 17.0 * DAY + 28.0;
    assert!(controller.on_scroll(drift, &may, 1_000).is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 15));

    let output = controller.tap_date(date(2024, 5, 15), &may, 1_100);
    assert_eq!(output.scroll, scroll_to(17.0 * DAY));
}

#[test]
fn tap_in_other_month_defers_scroll_until_its_layout_exists() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    // June 3 is visible as a trailing day of the May grid.
    let output = controller.tap_date(date(2024, 6, 3), &may, 1_000);
    assert!(output.visible_month_changed);
    assert_eq!(output.scroll, None);
    assert_eq!(controller.visible_month(), YearMonth::new(2024, 6));
    assert_eq!(controller.selected_date(), date(2024, 6, 3));
    let pending = controller.pending_scroll().expect("scroll should be pending");
    assert_eq!(pending.reason, ScrollReason::DateTap);
    assert_eq!(pending.floor, 0.0);

    // A layout that does not materialize June 3 keeps the request waiting.
    assert!(controller.on_layout_ready(&layout_for(2024, 3), 1_010).is_empty());
    assert!(controller.pending_scroll().is_some());

    // June grid starts May 26; June 3 sits 8 days in. The target is far
    // behind the old May offset, but the month changed so the floor is 0.
    let june = layout_for(2024, 6);
    let output = controller.on_layout_ready(&june, 1_020);
    assert_eq!(output.scroll, scroll_to(8.0 * DAY));
    assert!(controller.pending_scroll().is_none());

    assert!(controller.on_layout_ready(&june, 1_030).is_empty());
}

#[test]
fn tap_with_unpopulated_layout_waits_for_next_pass() {
    let mut controller = SyncController::new(date(2024, 5, 10), SyncConfig::default());

    let output = controller.tap_date(date(2024, 5, 15), &LayoutIndex::empty(), 5);
    assert!(output.is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 15));

    let output = controller.on_layout_ready(&layout_for(2024, 5), 10);
    assert_eq!(output.scroll, scroll_to(17.0 * DAY));
}

#[test]
fn next_month_clamps_day_to_month_length() {
    let march = layout_for(2024, 3);
    let mut controller = mounted(date(2024, 3, 31), &march);

    let output = controller.navigate_month(1, 1_000);

    assert!(output.visible_month_changed);
    assert_eq!(controller.selected_date(), date(2024, 4, 30));
    assert_eq!(controller.visible_month(), YearMonth::new(2024, 4));

    // April grid starts Mar 31; April 30 is 30 days in.
    let output = controller.on_layout_ready(&layout_for(2024, 4), 1_010);
    assert_eq!(output.scroll, scroll_to(30.0 * DAY));
}

#[test]
fn month_navigation_across_leap_february_and_year_end() {
    let mut controller = SyncController::new(date(2024, 1, 31), SyncConfig::default());

    controller.navigate_month(1, 0);
    assert_eq!(controller.selected_date(), date(2024, 2, 29));

    controller.navigate_month(-2, 0);
    assert_eq!(controller.selected_date(), date(2023, 12, 29));
    assert_eq!(controller.visible_month(), YearMonth::new(2023, 12));

    controller.navigate_month(1, 0);
    assert_eq!(controller.visible_month(), YearMonth::new(2024, 1));
    let pending = controller.pending_scroll().expect("navigation defers its scroll");
    assert_eq!(pending.reason, ScrollReason::MonthNavigation);
    assert_eq!(pending.date, date(2024, 1, 29));
}

#[test]
fn scroll_exactly_at_header_selects_it_and_lookahead_is_exclusive() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);
    let may_15 = 17.0 * DAY;

    assert!(controller.on_scroll(may_15, &may, 1_000).is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 15));

    controller.on_scroll(may_15 + 99.0, &may, 1_010);
    assert_eq!(controller.selected_date(), date(2024, 5, 15));

    // May 16's header enters the 100-unit band.
    controller.on_scroll(may_15 + DAY - 100.0, &may, 1_020);
    assert_eq!(controller.selected_date(), date(2024, 5, 16));
}

#[test]
fn scroll_events_inside_debounce_window_do_not_select() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    controller.tap_date(date(2024, 5, 15), &may, 1_000);

    let may_20 = 22.0 * DAY;
    assert!(controller.on_scroll(may_20, &may, 1_050).is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 15));
    assert_eq!(controller.state().last_known_scroll_offset, may_20);
    assert!(controller.state().is_programmatic_scroll_in_flight);

    controller.on_scroll(may_20, &may, 1_200);
    assert_eq!(controller.selected_date(), date(2024, 5, 20));
    assert!(!controller.state().is_programmatic_scroll_in_flight);
}

#[test]
fn custom_debounce_window_is_honored() {
    let may = layout_for(2024, 5);
    let config = SyncConfig {
        debounce_ms: 400,
        ..SyncConfig::default()
    };
    let mut controller = SyncController::new(date(2024, 5, 10), config);
    controller.on_layout_ready(&may, 0);

    controller.on_scroll(22.0 * DAY, &may, 399);
    assert_eq!(controller.selected_date(), date(2024, 5, 10));

    controller.on_scroll(22.0 * DAY, &may, 400);
    assert_eq!(controller.selected_date(), date(2024, 5, 20));
}

#[test]
fn forward_scroll_into_next_month_follows_and_reanchors() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    // June 1 starts 34 days into the May grid; its header is 44 units below
    // the viewport top, inside the lookahead band.
    let june_1_in_may = 34.0 * DAY;
    let output = controller.on_scroll(june_1_in_may - 44.0, &may, 1_000);

    assert!(output.visible_month_changed);
    assert_eq!(controller.selected_date(), date(2024, 6, 1));
    assert_eq!(controller.visible_month(), YearMonth::new(2024, 6));
    let pending = controller.pending_scroll().expect("re-anchor pending");
    assert_eq!(pending.reason, ScrollReason::MonthFollow);
    assert_eq!(pending.anchor_delta, -44.0);

    // While the list regenerates, stale scroll events are ignored.
    assert!(controller.on_scroll(june_1_in_may, &may, 1_005).is_empty());
    assert_eq!(controller.selected_date(), date(2024, 6, 1));

    // June grid starts May 26; June 1 is 6 days in.
    let output = controller.on_layout_ready(&layout_for(2024, 6), 1_010);
    assert_eq!(output.scroll, scroll_to(6.0 * DAY - 44.0));
}

#[test]
fn small_backward_jitter_across_month_boundary_is_ignored() {
    let may = layout_for(2024, 5);
    let june = layout_for(2024, 6);
    let mut controller = mounted(date(2024, 5, 10), &may);
    controller.on_scroll(34.0 * DAY - 44.0, &may, 1_000);
    controller.on_layout_ready(&june, 1_010);
    assert_eq!(controller.selected_date(), date(2024, 6, 1));

    // May 31 (5 days into the June grid) is one day back: not enough.
    let output = controller.on_scroll(5.0 * DAY - 80.0, &june, 2_000);
    assert!(output.is_empty());
    assert_eq!(controller.selected_date(), date(2024, 6, 1));
    assert_eq!(controller.visible_month(), YearMonth::new(2024, 6));

    // May 28 is four days back: the month follows.
    let output = controller.on_scroll(2.0 * DAY - 32.0, &june, 3_000);
    assert!(output.visible_month_changed);
    assert_eq!(controller.selected_date(), date(2024, 5, 28));
    assert_eq!(controller.visible_month(), YearMonth::new(2024, 5));

    // May 28 is 30 days into the May grid.
    let output = controller.on_layout_ready(&may, 3_010);
    assert_eq!(output.scroll, scroll_to(30.0 * DAY - 32.0));
}

#[test]
fn second_tap_inside_debounce_window_wins() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    let first = controller.tap_date(date(2024, 5, 15), &may, 1_000);
    assert_eq!(first.scroll, scroll_to(17.0 * DAY));
    let second = controller.tap_date(date(2024, 5, 20), &may, 1_050);
    assert_eq!(second.scroll, scroll_to(22.0 * DAY));

    assert_eq!(controller.selected_date(), date(2024, 5, 20));
    assert!(controller.on_layout_ready(&may, 1_060).is_empty());
    controller.on_scroll(17.0 * DAY, &may, 1_100);
    assert_eq!(controller.selected_date(), date(2024, 5, 20));
}

#[test]
fn second_tap_cancels_first_taps_pending_scroll() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    let first = controller.tap_date(date(2024, 6, 3), &may, 1_000);
    assert!(first.visible_month_changed);
    let second = controller.tap_date(date(2024, 5, 20), &may, 1_050);
    assert!(second.visible_month_changed);
    assert_eq!(controller.visible_month(), YearMonth::new(2024, 5));

    // A late layout pass for June does not resurrect the June 3 scroll.
    assert!(controller.on_layout_ready(&layout_for(2024, 6), 1_060).is_empty());

    let output = controller.on_layout_ready(&may, 1_070);
    assert_eq!(output.scroll, scroll_to(22.0 * DAY));
    assert!(controller.on_layout_ready(&may, 1_080).is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 20));
}

#[test]
fn month_navigation_cancels_outstanding_tap_scroll() {
    let mut controller = SyncController::new(date(2024, 5, 10), SyncConfig::default());
    controller.tap_date(date(2024, 5, 15), &LayoutIndex::empty(), 0);
    assert_eq!(
        controller.pending_scroll().map(|pending| pending.reason),
        Some(ScrollReason::DateTap)
    );

    controller.navigate_month(1, 10);
    let pending = controller.pending_scroll().expect("navigation pending");
    assert_eq!(pending.reason, ScrollReason::MonthNavigation);
    assert_eq!(pending.date, date(2024, 6, 15));
}

#[test]
fn invalid_scroll_offsets_degrade_to_no_ops() {
    let may = layout_for(2024, 5);
    let mut controller = mounted(date(2024, 5, 10), &may);

    assert!(controller.on_scroll(f64::NAN, &may, 1_000).is_empty());
    assert!(controller.on_scroll(f64::INFINITY, &may, 1_000).is_empty());
    assert_eq!(controller.state().last_known_scroll_offset, 12.0 * DAY);

    assert!(controller
        .on_scroll(12.0 * DAY, &LayoutIndex::empty(), 1_000)
        .is_empty());
    assert_eq!(controller.selected_date(), date(2024, 5, 10));
}

#[test]
fn blocked_month_navigation_keeps_mount_reveal() {
    let mut controller = SyncController::new(date(9999, 11, 15), SyncConfig::default());

    let output = controller.navigate_month(1, 0);

    assert!(output.is_empty());
    assert_eq!(controller.visible_month(), YearMonth::MAX);
    let pending = controller.pending_scroll().expect("mount reveal survives");
    assert_eq!(pending.reason, ScrollReason::Initial);
    assert_eq!(pending.date, date(9999, 11, 15));
}

#[test]
fn dates_outside_supported_months_are_clamped_on_entry() {
    let controller = SyncController::new(date(1, 1, 1), SyncConfig::default());
    assert_eq!(controller.selected_date(), date(1, 2, 1));
    assert_eq!(controller.visible_month(), YearMonth::MIN);

    let earliest = layout_for(1, 2);
    let mut controller = mounted(date(1, 2, 10), &earliest);
    let leading = earliest.first_date().expect("grid is never empty");
    assert_eq!(leading.year_month(), YearMonth::MIN);

    let output = controller.tap_date(leading, &earliest, 1_000);
    assert!(!output.visible_month_changed);
    assert_eq!(controller.selected_date(), date(1, 2, 1));
    assert_eq!(output.scroll, scroll_to(earliest.offset_of(&date(1, 2, 1)).unwrap()));
}
