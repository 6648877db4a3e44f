pub mod check;
pub mod play;
pub mod timeline;

use std::path::Path;

use colored::Colorize;
use gs_content::BootstrapError;
use gs_core::GameState;

/// Read a scenario file as text.
fn read_scenario(file: &Path) -> Result<String, String> {
    std::fs::read_to_string(file).map_err(|e| format!("cannot read {}: {e}", file.display()))
}

/// Read and validate a scenario file, printing every issue on failure.
fn load_scenario(file: &Path) -> Result<GameState, String> {
    let raw = read_scenario(file)?;
    gs_content::bootstrap(&raw).map_err(|e| {
        print_issues(&e);
        format!("{} is not a valid scenario", file.display())
    })
}

/// Print bootstrap issues to stderr.
fn print_issues(err: &BootstrapError) {
    let issues = err.issues();
    if issues.is_empty() {
        eprintln!("  {} {err}", "x".red());
        return;
    }
    for issue in issues {
        eprintln!("  {} {issue}", "x".red());
    }
    eprintln!(
        "  {} issue{}",
        issues.len(),
        if issues.len() == 1 { "" } else { "s" }
    );
}

/// Shorten prose for table cells.
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else if line.is_empty() {
        "-".to_string()
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_chars() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("", 10), "-");
        assert_eq!(preview("ééééééééééé", 6), "ééé...");
    }
}
