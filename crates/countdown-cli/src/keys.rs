//! Line commands typed into a running session.

use countdown_core::Command;

pub const HELP: &str = "\
commands:
  <enter> | space   start / pause
  esc               reset
  start | pause | reset
  m <minutes>       edit the minutes field
  s <seconds>       edit the seconds field
  set M:SS          edit both fields
  status            print the current state
  help              show this list
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Command),
    SetMinutes(String),
    SetSeconds(String),
    SetDuration { minutes: String, seconds: String },
    Status,
    Help,
    Quit,
}

/// Map one input line to an action. Field text is passed through as typed;
/// unparsable values read as zero later.
pub fn parse(line: &str) -> Result<Action, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return key("Space");
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_ascii_lowercase();
    let rest = words.collect::<Vec<_>>().join(" ");

    match (head.as_str(), rest.is_empty()) {
        ("space", true) => key("Space"),
        ("esc" | "escape", true) => key("Escape"),
        ("start", true) => Ok(Action::Dispatch(Command::Start)),
        ("pause" | "p", true) => Ok(Action::Dispatch(Command::Pause)),
        ("reset" | "r", true) => Ok(Action::Dispatch(Command::Reset)),
        ("status", true) => Ok(Action::Status),
        ("help" | "?", true) => Ok(Action::Help),
        ("quit" | "q" | "exit", true) => Ok(Action::Quit),
        ("m" | "min" | "minutes", false) => Ok(Action::SetMinutes(rest)),
        ("s" | "sec" | "seconds", false) => Ok(Action::SetSeconds(rest)),
        ("set", false) => Ok(parse_duration(&rest)),
        _ => Err(format!("unknown command: {}", line.trim())),
    }
}

fn key(code: &str) -> Result<Action, String> {
    Command::from_key(code)
        .map(Action::Dispatch)
        .ok_or_else(|| format!("unbound key: {code}"))
}

/// `"1:30"` or `"1 30"`; a lone value is taken as minutes.
fn parse_duration(text: &str) -> Action {
    let (minutes, seconds) = match text.split_once(':') {
        Some((m, s)) => (m, s),
        None => match text.split_once(' ') {
            Some((m, s)) => (m, s),
            None => (text, ""),
        },
    };
    Action::SetDuration {
        minutes: minutes.trim().to_string(),
        seconds: seconds.trim().to_string(),
    }
}
