use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use plantdex_api::{ExternalSearch, PerenualClient};
use plantdex_core::Settings;
use plantdex_core::view::CardAction;
use plantdex_service::SearchController;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
Type a query to search (runs after a short pause).
  :search      search the last input now
  :next, :n    next result
  :prev, :p    previous result
  :details, :d toggle plant details
  :image       image search link for the current plant
  :wiki        Wikipedia search link for the current plant
  :broken      report that the picture failed to load
  :quit, :q    exit";

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand<'a> {
    Input(&'a str),
    Search,
    Next,
    Previous,
    Details,
    Link(CardAction),
    Broken,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> BrowseCommand<'_> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return BrowseCommand::Input(line);
    };
    match command.trim() {
        "search" | "s" => BrowseCommand::Search,
        "next" | "n" => BrowseCommand::Next,
        "prev" | "p" => BrowseCommand::Previous,
        "details" | "d" => BrowseCommand::Details,
        "image" => BrowseCommand::Link(CardAction::Image),
        "wiki" => BrowseCommand::Link(CardAction::Wiki),
        "broken" => BrowseCommand::Broken,
        "help" | "h" | "?" => BrowseCommand::Help,
        "quit" | "q" => BrowseCommand::Quit,
        other => BrowseCommand::Unknown(other),
    }
}

pub(crate) async fn run(settings: &Settings, debounce: Duration, open: bool) -> Result<()> {
    let client = PerenualClient::from_settings(settings)?;
    tracing::info!(base_url = client.base_url(), ?debounce, "browsing");
    let controller = SearchController::new(Arc::new(client));
    let input = controller.debounced_input(debounce);

    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let text = render::widget(&updates.borrow_and_update());
            print!("{text}");
        }
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_input = String::new();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            BrowseCommand::Input(text) => {
                last_input = text.to_owned();
                input.trigger(last_input.clone());
            },
            BrowseCommand::Search => drop(controller.search(last_input.clone())),
            BrowseCommand::Next => {
                if !controller.next() {
                    println!("(no next result)");
                }
            },
            BrowseCommand::Previous => {
                if !controller.previous() {
                    println!("(no previous result)");
                }
            },
            BrowseCommand::Details => {
                if controller.current_card().is_none() {
                    println!("(no plant shown)");
                } else {
                    drop(controller.toggle_details());
                }
            },
            BrowseCommand::Link(action) => follow_link(&controller, action, open),
            BrowseCommand::Broken => {
                if !controller.image_failed() {
                    println!("(fallback picture already shown)");
                }
            },
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(other) => println!("unknown command :{other}, try :help"),
        }
    }

    printer.abort();
    Ok(())
}

fn follow_link(controller: &SearchController, action: CardAction, open: bool) {
    let Some(search) = ExternalSearch::for_action(action) else {
        return;
    };
    let Some(card) = controller.current_card() else {
        println!("(no plant shown)");
        return;
    };
    let url = match search.url_for(&card.name) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(error = %e, "could not build link");
            return;
        },
    };

    if open {
        open_in_browser(url.as_str());
    } else {
        println!("{url}");
    }
}

fn open_in_browser(url: &str) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    let mut command = std::process::Command::new(opener);
    command.arg(url);
    match spawn_reaped(command) {
        Ok(_) => tracing::debug!(opener, url, "link opened"),
        Err(e) => {
            tracing::warn!(opener, error = %e, "failed to launch browser");
            println!("{url}");
        },
    }
}

/// Spawns `command` and reaps it on a background thread.
fn spawn_reaped(
    mut command: std::process::Command,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    let mut child = command.spawn()?;
    Ok(std::thread::spawn(move || {
        if let Err(e) = child.wait() {
            tracing::warn!(error = %e, "failed to reap link opener");
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_are_input() {
        assert_eq!(parse_line("rose"), BrowseCommand::Input("rose"));
        assert_eq!(parse_line(""), BrowseCommand::Input(""));
        assert_eq!(parse_line(" a b "), BrowseCommand::Input(" a b "));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_opener_is_reaped() {
        let reaper = spawn_reaped(std::process::Command::new("true")).unwrap();
        reaper.join().unwrap();
    }

    #[test]
    fn test_missing_opener_is_an_error() {
        let command = std::process::Command::new("plantdex-no-such-opener");
        assert!(spawn_reaped(command).is_err());
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line(":n"), BrowseCommand::Next);
        assert_eq!(parse_line(":prev"), BrowseCommand::Previous);
        assert_eq!(parse_line(" :details "), BrowseCommand::Details);
        assert_eq!(parse_line(":image"), BrowseCommand::Link(CardAction::Image));
        assert_eq!(parse_line(":wiki"), BrowseCommand::Link(CardAction::Wiki));
        assert_eq!(parse_line(":broken"), BrowseCommand::Broken);
        assert_eq!(parse_line(":search"), BrowseCommand::Search);
        assert_eq!(parse_line(":q"), BrowseCommand::Quit);
        assert_eq!(parse_line(":zap"), BrowseCommand::Unknown("zap"));
    }
}
