use chrono::{DateTime, Utc};
use review_core::{Decision, Msg, ZoomChange};

/// One parsed line from the rater's terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Msg(Msg),
    Help,
    Unknown(String),
    Quit,
}

/// Turns a command line into the events it stands for. `start <label>`
/// yields the label edit followed by the start request.
pub fn parse_line(line: &str, at: DateTime<Utc>) -> Vec<AppEvent> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" => Vec::new(),
        "start" | "s" => {
            let mut events = Vec::with_capacity(2);
            if !rest.is_empty() {
                events.push(AppEvent::Msg(Msg::RaterLabelChanged(rest.to_string())));
            }
            events.push(AppEvent::Msg(Msg::StartClicked));
            events
        }
        "name" => vec![AppEvent::Msg(Msg::RaterLabelChanged(rest.to_string()))],
        "n" | "next" => vec![AppEvent::Msg(Msg::AdvanceClicked { at })],
        "e" | "export" => vec![AppEvent::Msg(Msg::ExportClicked { at })],
        "+" => vec![AppEvent::Msg(Msg::ZoomChanged(ZoomChange::In))],
        "-" => vec![AppEvent::Msg(Msg::ZoomChanged(ZoomChange::Out))],
        "0" => vec![AppEvent::Msg(Msg::ZoomChanged(ZoomChange::Reset))],
        "h" | "help" | "?" => vec![AppEvent::Help],
        "q" | "quit" | "exit" => vec![AppEvent::Quit],
        other => match other.parse::<Decision>() {
            Ok(decision) => vec![AppEvent::Msg(Msg::DecisionMade { decision, at })],
            Err(_) => vec![AppEvent::Unknown(line.to_string())],
        },
    }
}

pub const HELP: &str = "\
Commands:
  start [name]      begin the session (name optional if already set)
  name <name>       set the rater name
  a | accept        accept the current image
  d | deny | r      deny / reposition the current image
  n | next          move to the next image (export mode)
  e | export        write decisions to CSV (export mode)
  + | - | 0         zoom in, out, reset
  q | quit          leave";
