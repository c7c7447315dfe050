//! Interactive session over stdin.
//!
//! Each line is one user event. The session stays alive until `quit` or
//! end of input; every command is accepted in every phase.

use nearby_core::{AppConfig, Category};
use nearby_session::Event;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{print_notices, print_places, print_status, StaticMapSurface};
use crate::{build_coordinator, PositionArgs};

const HELP: &str = "commands: category <restaurant|cafe>, locate, recommend, show, help, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReplCommand {
    Event(Event),
    Show,
    Help,
    Quit,
}

pub(crate) fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("category", [name]) => name
            .parse::<Category>()
            .map(|c| ReplCommand::Event(Event::SelectCategory(c)))
            .map_err(|e| e.to_string()),
        ("category", _) => Err("usage: category <restaurant|cafe>".to_string()),
        ("locate", []) => Ok(ReplCommand::Event(Event::RequestLocation)),
        ("recommend", []) => Ok(ReplCommand::Event(Event::RequestRecommendations)),
        ("show", []) => Ok(ReplCommand::Show),
        ("help", _) => Ok(ReplCommand::Help),
        ("quit" | "exit", []) => Ok(ReplCommand::Quit),
        (other, _) => Err(format!("unknown command '{other}'")),
    }
}

pub(crate) async fn run_session(config: &AppConfig, position: PositionArgs) -> anyhow::Result<()> {
    let mut coordinator = build_coordinator(config, position)?;
    let mut surface = StaticMapSurface::new(config.maps_api_key.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    print_status(coordinator.state());

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(ReplCommand::Quit) => break,
            Ok(ReplCommand::Help) => println!("{HELP}"),
            Ok(ReplCommand::Show) => {
                print_status(coordinator.state());
                print_places(coordinator.state());
                coordinator.render(&mut surface)?;
            }
            Ok(ReplCommand::Event(event)) => {
                coordinator.dispatch(event).await;
                print_notices(&coordinator.take_notices());
                print_status(coordinator.state());
                if event == Event::RequestRecommendations {
                    print_places(coordinator.state());
                    coordinator.render(&mut surface)?;
                }
            }
            Err(message) => println!("! {message}"),
        }
    }

    tracing::debug!("session ended");
    Ok(())
}
