//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `timeline_core` linkage.
//! - Print the current month grid and a short scripted interaction trace.

use chrono::Local;
use timeline_core::{
    CalendarDate, HostCommand, HostEvent, Rect, Region, TapTarget, TimelineConfig, TimelineEngine,
};

fn main() {
    println!("timeline_core ping={}", timeline_core::ping());
    println!("timeline_core version={}", timeline_core::core_version());

    let today = CalendarDate::from(Local::now().date_naive());
    let mut engine = TimelineEngine::new(today, TimelineConfig::default());
    print_grid(&engine);

    let script = [
        HostEvent::LayoutMeasured {
            region: Region::DayList,
            rect: Rect::new(0.0, 364.0, 390.0, 480.0),
            at_ms: 0,
        },
        HostEvent::Tap {
            target: TapTarget::NextMonth,
            at_ms: 1_000,
        },
        HostEvent::LayoutMeasured {
            region: Region::DayList,
            rect: Rect::new(0.0, 364.0, 390.0, 480.0),
            at_ms: 1_016,
        },
        HostEvent::Tap {
            target: TapTarget::Today,
            at_ms: 2_000,
        },
        HostEvent::LayoutMeasured {
            region: Region::DayList,
            rect: Rect::new(0.0, 364.0, 390.0, 480.0),
            at_ms: 2_016,
        },
    ];
    for event in script {
        for command in engine.handle(event) {
            print_command(&command);
        }
    }
    println!("timeline_core selected={}", engine.selected_date());
}

fn print_grid(engine: &TimelineEngine) {
    let grid = engine.month_grid();
    println!("timeline_core month={}", grid.month());
    for week in grid.weeks() {
        let row = week
            .iter()
            .map(|date| {
                if grid.is_in_month(date) {
                    format!("{:>3}", date.day())
                } else {
                    "  .".to_string()
                }
            })
            .collect::<String>();
        println!("{row}");
    }
}

fn print_command(command: &HostCommand) {
    match command {
        HostCommand::RenderMonth { month } => println!("-> render_month {month}"),
        HostCommand::ScrollTo { offset, .. } => println!("-> scroll_to {offset:.1}"),
        HostCommand::MoveSheet { position, .. } => println!("-> move_sheet {position:.3}"),
        HostCommand::AnimateSheet { target, .. } => {
            println!("-> animate_sheet {}", target.as_str())
        }
    }
}
