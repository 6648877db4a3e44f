use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use gs_core::{GameState, TimelineEvent};

pub fn run(file: &Path) -> Result<(), String> {
    let state = super::load_scenario(file)?;
    let timeline = &state.timeline;

    println!("  Timeline for '{}'", state.title);
    println!(
        "  Base {} | Start {} | End {}",
        timeline.base_time, timeline.start_time, timeline.end_time
    );
    println!();

    if timeline.is_empty() {
        println!("  No events found in the timeline.");
        return Ok(());
    }

    let before = timeline.crime_events();
    let during = timeline.play_events();

    if !before.is_empty() {
        println!("  Before play begins");
        println!("{}", table(&state, &before));
        println!();
    }
    if !during.is_empty() {
        println!("  During play");
        println!("{}", table(&state, &during));
        println!();
    }
    println!("  {} events", timeline.len());

    Ok(())
}

fn table(state: &GameState, events: &[&TimelineEvent]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Event", "Type", "Who", "Where", "Description"]);
    for event in events {
        let who = event
            .character_id
            .as_ref()
            .map(|id| state.character(id).map_or(id.to_string(), |c| c.name.clone()))
            .unwrap_or_else(|| "-".into());
        let place = event
            .place_id
            .as_ref()
            .map(|id| state.place(id).map_or(id.to_string(), |p| p.name.clone()))
            .unwrap_or_else(|| "-".into());
        table.add_row(vec![
            event.time.to_string(),
            event.id.clone(),
            format!("{:?}", event.event_type),
            who,
            place,
            super::preview(&event.description, 50),
        ]);
    }
    table
}
