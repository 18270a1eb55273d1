//! Line-based keyboard input → control events
//!
//! Each line read from stdin maps to zero or more [`ControlEvent`]s:
//!
//! | input              | event                          |
//! |--------------------|--------------------------------|
//! | `l`, `leibniz`     | `StartSingle(Leibniz)`         |
//! | `e`, `euler`       | `StartSingle(Euler)`           |
//! | `c`, `chudnovsky`  | `StartSingle(Chudnovsky)`      |
//! | `r`, `race`        | `StartRace`                    |
//! | `x`, `reset`       | `Reset`                        |
//! | `+`, `++`, ...     | `AdjustTarget(+n)`             |
//! | `-`, `--`, ...     | `AdjustTarget(-n)`             |
//! | `q`, `quit`        | `Shutdown`                     |
//!
//! End of input also sends `Shutdown`.

use pirace_core::controller::{ControlEvent, ControlSender};
use pirace_core::{ProducerId, RaceError};
use std::io::BufRead;
use std::thread;
use std::time::Duration;

pub const HELP: &str = "\
commands:
  l / leibniz      run Leibniz alone
  e / euler        run Euler (Basel) alone
  c / chudnovsky   run Chudnovsky alone
  r / race         race all producers
  x / reset        stop and reset every producer
  + / -            raise / lower the digit target (repeat for more: +++)
  q / quit         exit";

/// Result of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Event(ControlEvent),
    Help,
    Nothing,
    Unknown(String),
}

/// Map one line of input to an action
pub fn parse_line(line: &str) -> InputAction {
    let word = line.trim().to_lowercase();

    if word.is_empty() {
        return InputAction::Nothing;
    }
    if word.chars().all(|c| c == '+') {
        return InputAction::Event(ControlEvent::AdjustTarget(word.len() as i32));
    }
    if word.chars().all(|c| c == '-') {
        return InputAction::Event(ControlEvent::AdjustTarget(-(word.len() as i32)));
    }

    let event = match word.as_str() {
        "l" | "leibniz" => ControlEvent::StartSingle(ProducerId::Leibniz),
        "e" | "euler" | "basel" => ControlEvent::StartSingle(ProducerId::Euler),
        "c" | "chudnovsky" => ControlEvent::StartSingle(ProducerId::Chudnovsky),
        "r" | "race" => ControlEvent::StartRace,
        "x" | "reset" => ControlEvent::Reset,
        "q" | "quit" | "exit" => ControlEvent::Shutdown,
        "h" | "help" | "?" => return InputAction::Help,
        _ => return InputAction::Unknown(word),
    };
    InputAction::Event(event)
}

/// Read lines until quit or end of input, forwarding events to the controller
pub fn run(reader: impl BufRead, sender: &mut ControlSender) {
    println!("{}", HELP);

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Failed to read input: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            InputAction::Event(ControlEvent::Shutdown) => break,
            InputAction::Event(event) => {
                if sender.send(event).is_err() {
                    log::warn!("{}; dropped {:?}", RaceError::ControlQueueFull, event);
                }
            }
            InputAction::Help => println!("{}", HELP),
            InputAction::Nothing => {}
            InputAction::Unknown(word) => println!("unknown command '{}'\n{}", word, HELP),
        }
    }

    send_shutdown(sender);
}

/// Deliver `Shutdown`, waiting for queue space if necessary
fn send_shutdown(sender: &mut ControlSender) {
    loop {
        if sender.has_space() && sender.send(ControlEvent::Shutdown).is_ok() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pirace_core::controller::control_channel;
    use std::io::Cursor;

    #[test]
    fn test_parse_producers() {
        assert_eq!(
            parse_line("l"),
            InputAction::Event(ControlEvent::StartSingle(ProducerId::Leibniz))
        );
        assert_eq!(
            parse_line("  Euler "),
            InputAction::Event(ControlEvent::StartSingle(ProducerId::Euler))
        );
        assert_eq!(
            parse_line("chudnovsky"),
            InputAction::Event(ControlEvent::StartSingle(ProducerId::Chudnovsky))
        );
    }

    #[test]
    fn test_parse_target_adjustments() {
        assert_eq!(parse_line("+"), InputAction::Event(ControlEvent::AdjustTarget(1)));
        assert_eq!(parse_line("+++"), InputAction::Event(ControlEvent::AdjustTarget(3)));
        assert_eq!(parse_line("--"), InputAction::Event(ControlEvent::AdjustTarget(-2)));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_line(""), InputAction::Nothing);
        assert_eq!(parse_line("?"), InputAction::Help);
        assert_eq!(parse_line("race"), InputAction::Event(ControlEvent::StartRace));
        assert_eq!(parse_line("x"), InputAction::Event(ControlEvent::Reset));
        assert_eq!(parse_line("+-"), InputAction::Unknown("+-".to_string()));
    }

    #[test]
    fn test_run_forwards_events_and_ends_with_shutdown() {
        let (mut tx, mut rx) = control_channel();
        run(Cursor::new("r\nbogus\n++\n"), &mut tx);

        assert_eq!(rx.pop(), Some(ControlEvent::StartRace));
        assert_eq!(rx.pop(), Some(ControlEvent::AdjustTarget(2)));
        assert_eq!(rx.pop(), Some(ControlEvent::Shutdown));
        assert_eq!(rx.pop(), None);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (mut tx, mut rx) = control_channel();
        run(Cursor::new("q\nr\n"), &mut tx);

        assert_eq!(rx.pop(), Some(ControlEvent::Shutdown));
        assert_eq!(rx.pop(), None);
    }
}
