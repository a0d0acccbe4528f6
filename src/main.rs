//! Terminal front end for the catalog synchronizer.
//!
//! Reads one command per line from stdin, feeds the resulting events through
//! [`handle_event`], executes the returned actions and re-renders the catalog
//! to stdout whenever the visible state changed.
//!
//! # Threads
//!
//! ```text
//! stdin reader ──┐
//!                ├── mpsc ──► event loop ──► Dispatcher ──► request threads
//! request threads┘                                              │
//!        ▲                                                      │
//!        └──────────────────── WorkerResponse ◄─────────────────┘
//! ```
//!
//! # Commands
//!
//! - `search <text>` or `/<text>`: filter by title or body
//! - `clear`: drop the filter
//! - `more`: load the next page
//! - `select <n>`: select the n-th listed article (1-based)
//! - `refresh`: re-fetch the selected article
//! - `quit` (or end of input): exit

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};
use std::thread;

use catalog_sync::api::HttpArticleApi;
use catalog_sync::observability::init_tracing;
use catalog_sync::ui::render;
use catalog_sync::worker::{CatalogWorker, Dispatcher, WorkerResponse};
use catalog_sync::{handle_event, initialize, Action, AppState, Config, Event, Result};

const HELP: &str = "commands: search <text> | /<text> | clear | more | select <n> | refresh | quit";

/// Everything the event loop reacts to.
enum Inbound {
    Line(String),
    EndOfInput,
    Response(WorkerResponse),
}

impl From<WorkerResponse> for Inbound {
    fn from(response: WorkerResponse) -> Self {
        Self::Response(response)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Search(String),
    Clear,
    More,
    Select(usize),
    Refresh,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if let Some(text) = line.strip_prefix('/') {
        return Command::Search(text.to_string());
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match verb {
        "search" | "s" => Command::Search(rest.to_string()),
        "clear" | "c" => Command::Clear,
        "more" | "m" => Command::More,
        "select" | "open" => rest
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map_or(Command::Help, Command::Select),
        "refresh" | "r" => Command::Refresh,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Help,
    }
}

/// Turns a command into an event. `None` means nothing to do.
fn command_event(command: Command, state: &AppState, out: &mut impl Write) -> io::Result<Option<Event>> {
    let event = match command {
        Command::Search(text) => Event::SearchSubmitted(text),
        Command::Clear => Event::SearchCleared,
        Command::More => Event::LoadMore,
        Command::Select(n) => match state.catalog().articles().get(n - 1) {
            Some(article) => Event::Select(article.clone()),
            None => {
                writeln!(out, "No article #{n}.")?;
                return Ok(None);
            }
        },
        Command::Refresh => Event::RefreshSelected,
        Command::Quit => Event::Quit,
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(None);
        }
    };
    Ok(Some(event))
}

fn spawn_input_reader(tx: Sender<Inbound>) -> io::Result<()> {
    thread::Builder::new()
        .name("catalog-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(Inbound::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(Inbound::EndOfInput);
        })?;
    Ok(())
}

/// Executes actions in order. Returns `false` once a shutdown was requested.
fn execute(dispatcher: &Dispatcher<Inbound>, actions: Vec<Action>) -> bool {
    for action in actions {
        match action {
            Action::PostToWorker(message) => {
                if let Err(e) = dispatcher.post(message) {
                    tracing::error!(error = %e, "failed to dispatch request");
                }
            }
            Action::Shutdown => {
                dispatcher.dispose();
                return false;
            }
        }
    }
    true
}

fn run() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config);

    let span = tracing::info_span!("session", api_base_url = %config.api_base_url);
    let _guard = span.enter();

    let api = HttpArticleApi::new(&config)?;
    let (tx, rx) = mpsc::channel::<Inbound>();
    let dispatcher = Dispatcher::new(CatalogWorker::new(Box::new(api)), tx.clone());
    spawn_input_reader(tx)?;

    let (mut state, actions) = initialize(&config);
    let mut stdout = io::stdout().lock();
    render(&state, &mut stdout)?;
    writeln!(stdout, "{HELP}")?;
    if !execute(&dispatcher, actions) {
        return Ok(());
    }

    for inbound in rx {
        let event = match inbound {
            Inbound::Line(line) => match command_event(parse_command(&line), &state, &mut stdout)? {
                Some(event) => event,
                None => continue,
            },
            Inbound::EndOfInput => Event::Quit,
            Inbound::Response(response) => Event::from(response),
        };

        let (should_render, actions) = handle_event(&mut state, &event)?;
        if should_render {
            render(&state, &mut stdout)?;
        }
        if !execute(&dispatcher, actions) {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("catalog-sync: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_forms() {
        assert_eq!(parse_command("/rust async"), Command::Search("rust async".into()));
        assert_eq!(parse_command("search  rust "), Command::Search(" rust".into()));
        assert_eq!(parse_command("search"), Command::Search(String::new()));
    }

    #[test]
    fn parses_simple_verbs() {
        assert_eq!(parse_command(" clear "), Command::Clear);
        assert_eq!(parse_command("more"), Command::More);
        assert_eq!(parse_command("refresh"), Command::Refresh);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn select_requires_positive_index() {
        assert_eq!(parse_command("select 2"), Command::Select(2));
        assert_eq!(parse_command("select 0"), Command::Help);
        assert_eq!(parse_command("select two"), Command::Help);
        assert_eq!(parse_command("dance"), Command::Help);
    }

    #[test]
    fn select_out_of_range_reports_instead_of_emitting() {
        let state = AppState::new(&Config::default());
        let mut out = Vec::new();
        let event = command_event(Command::Select(1), &state, &mut out).unwrap();
        assert!(event.is_none());
        assert_eq!(String::from_utf8(out).unwrap(), "No article #1.\n");
    }
}
