use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use gs_content::UnavailableGenerator;
use gs_content::scenario::MANOR_JSON;
use gs_core::{Clue, EntityId, GamePhase, GameState};
use gs_engine::{Action, ActionKind, EngineConfig, Verdict};
use gs_play::{GameSession, Outcome, PlayError, SessionConfig, Source};

const HELP: &str = "\
  investigate [place]          search a place (default: where you are)
  question <who> [question]    question someone in the same room
  move <place>                 walk somewhere else
  accuse <who> [clue ...]      name the culprit; ends the game
  look                         describe your surroundings
  status                       show the clock
  help                         show this list
  quit                         leave the case";

enum Input {
    Act(Action),
    Look,
    Status,
    Help,
    Quit,
}

pub fn run(file: Option<&Path>, offline: bool, seed: u64, timeout_ms: u64) -> Result<(), String> {
    let raw = match file {
        Some(path) => super::read_scenario(path)?,
        None => MANOR_JSON.to_string(),
    };
    let mut config = SessionConfig::default()
        .with_engine(EngineConfig::default().with_seed(seed))
        .with_timeout(Duration::from_millis(timeout_ms));
    if offline {
        config = config.offline();
    }

    // No generator transport is wired in; questions fall back to local replies.
    let mut session = GameSession::from_raw(&raw, Arc::new(UnavailableGenerator), config)
        .map_err(|e| {
            if let PlayError::Bootstrap(err) = &e {
                super::print_issues(err);
            }
            format!("failed to start session: {e}")
        })?;
    session
        .advance_phase(GamePhase::Investigation)
        .map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    let state = session.state();
    println!("  {}", state.title.bold());
    if !state.description.is_empty() {
        println!("  {}", state.description);
    }
    println!(
        "  You have until {} to name the culprit.",
        state.timeline.end_time
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    look(state);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse(input, session.state()) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => println!("{HELP}\n"),
            Ok(Input::Status) => println!("  {}\n", session.status_line()),
            Ok(Input::Look) => look(session.state()),
            Ok(Input::Act(action)) => match runtime.block_on(session.act(action.clone())) {
                Ok(outcome) => narrate(&action, &outcome),
                Err(e) => println!("  {}\n", e.to_string().yellow()),
            },
            Err(msg) => println!("  {}\n", msg.yellow()),
        }

        if session.state().phase.is_terminal() {
            break;
        }
    }

    Ok(())
}

fn parse(input: &str, state: &GameState) -> Result<Input, String> {
    let mut words = input.split_whitespace();
    let command = words.next().unwrap_or("").to_lowercase();
    let rest: Vec<&str> = words.collect();

    let input = match command.as_str() {
        "quit" | "q" | "exit" => Input::Quit,
        "help" | "h" | "?" => Input::Help,
        "status" | "time" => Input::Status,
        "look" | "l" => Input::Look,
        "investigate" | "search" | "i" => {
            let place = match rest.first() {
                Some(word) => place_id(state, word),
                None => state.player.current_location.clone(),
            };
            Input::Act(Action::investigate(place))
        }
        "move" | "go" | "m" => {
            let word = rest.first().ok_or("move where?")?;
            Input::Act(Action::move_to(place_id(state, word)))
        }
        "question" | "ask" => {
            let word = rest.first().ok_or("question whom?")?;
            let question = rest[1..].join(" ");
            let question = (!question.is_empty()).then_some(question);
            Input::Act(Action::question(character_id(state, word), question))
        }
        "accuse" => {
            let word = rest.first().ok_or("accuse whom?")?;
            let evidence = rest[1..].iter().map(|w| EntityId::new(*w)).collect();
            Input::Act(Action::accuse(character_id(state, word), evidence))
        }
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(input)
}

/// Match a word against place IDs and names, ignoring case.
fn place_id(state: &GameState, word: &str) -> EntityId {
    state
        .places
        .iter()
        .find(|p| p.id.as_str().eq_ignore_ascii_case(word) || p.name.eq_ignore_ascii_case(word))
        .map_or_else(|| EntityId::new(word), |p| p.id.clone())
}

/// Match a word against character IDs and first names, ignoring case.
fn character_id(state: &GameState, word: &str) -> EntityId {
    state
        .characters
        .iter()
        .find(|c| {
            c.id.as_str().eq_ignore_ascii_case(word)
                || c.name
                    .split_whitespace()
                    .any(|part| part.eq_ignore_ascii_case(word))
        })
        .map_or_else(|| EntityId::new(word), |c| c.id.clone())
}

fn look(state: &GameState) {
    let Some(place) = state.player_place() else {
        println!("  You are nowhere in particular.\n");
        return;
    };
    println!("  {} ({})", place.name.bold(), state.current_time);
    if !place.description.is_empty() {
        println!("  {}", place.description);
    }
    let people: Vec<String> = state
        .visible_characters_here()
        .iter()
        .map(|c| format!("{} [{}]", c.name, c.id))
        .collect();
    if !people.is_empty() {
        println!("  Here: {}", people.join(", "));
    }
    let exits: Vec<String> = state
        .reachable_places()
        .iter()
        .map(|p| format!("{} [{}]", p.name, p.id))
        .collect();
    if !exits.is_empty() {
        println!("  Exits: {}", exits.join(", "));
    }
    println!();
}

/// Clues now visible at the place an investigation searched.
fn found_clues<'a>(state: &'a GameState, action: &Action) -> Vec<&'a Clue> {
    match action {
        Action::Investigate { place_id } => state.unlocked_clues_at(place_id),
        _ => Vec::new(),
    }
}

fn narrate(action: &Action, outcome: &Outcome) {
    let resolution = &outcome.resolution;
    let state = &resolution.state;

    if let Source::Fallback(reason) = &outcome.source {
        tracing::debug!(?reason, "reply came from the local fallback");
    }

    match resolution.action {
        ActionKind::Investigate => {
            let clues = found_clues(state, action);
            if clues.is_empty() {
                println!("  You search carefully but find nothing of note.");
            }
            for clue in clues {
                println!("  {} [{}]: {}", clue.name.bold(), clue.id, clue.description);
            }
        }
        ActionKind::Move => look(state),
        ActionKind::Question | ActionKind::Accuse => {}
    }
    if let Some(reply) = &resolution.reply {
        println!("  {reply}");
    }
    for event in &resolution.fired {
        let text = if event.description.is_empty() {
            event.id.as_str()
        } else {
            event.description.as_str()
        };
        println!("  {} {}", format!("[{}]", event.time).dimmed(), text.italic());
    }

    match resolution.verdict {
        Verdict::Solved => println!(
            "\n  {}",
            "Case solved. The culprit is in custody.".green().bold()
        ),
        Verdict::WrongAccusation => {
            let culprit = state.criminal().map_or("someone else", |c| c.name.as_str());
            println!(
                "\n  {} It was {culprit}.",
                "Wrong accusation. The case is lost.".red().bold()
            );
        }
        Verdict::OutOfTime => println!(
            "\n  {}",
            "Dawn breaks. The culprit has escaped.".red().bold()
        ),
        Verdict::Ongoing | Verdict::AlreadyOver => {}
    }
    println!("  {}\n", gs_play::status_line(state).dimmed());
}
