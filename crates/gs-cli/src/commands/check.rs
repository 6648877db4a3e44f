use std::path::Path;

use colored::Colorize;

pub fn run(file: &Path) -> Result<(), String> {
    let state = super::load_scenario(file)?;

    println!("  {} All checks passed for '{}'.", "ok".green(), state.title);
    println!(
        "  {} characters, {} places, {} clues, {} events",
        state.characters.len(),
        state.places.len(),
        state.clues.len(),
        state.timeline.len()
    );

    Ok(())
}
