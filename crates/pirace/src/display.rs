//! Terminal display adapter
//!
//! Redraws a small status table whenever a state changes, and otherwise at
//! most once per refresh period. Matched digits of each estimate are wrapped
//! in brackets: `3.[1415]926536`.

use pirace_core::controller::{DisplayAdapter, ProducerView, RaceMode, RaceState, RenderModel};
use pirace_core::meter::MATCH_PRECISION;
use std::io::Write;
use std::time::{Duration, Instant};

pub struct TerminalDisplay {
    refresh: Duration,
    last_draw: Option<Instant>,
    last_model: Option<RenderModel>,
}

impl TerminalDisplay {
    pub fn new(refresh: Duration) -> Self {
        Self {
            refresh,
            last_draw: None,
            last_model: None,
        }
    }

    fn due(&self, model: &RenderModel) -> bool {
        let Some(last) = &self.last_model else {
            return true;
        };
        if state_changed(last, model) {
            return true;
        }
        let running = model.producers.iter().any(|p| p.indicator);
        running
            && self
                .last_draw
                .map(|at| at.elapsed() >= self.refresh)
                .unwrap_or(true)
    }
}

impl DisplayAdapter for TerminalDisplay {
    fn render(&mut self, model: &RenderModel) {
        if !self.due(model) {
            return;
        }

        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(format_model(model).as_bytes()).and_then(|_| out.flush()) {
            log::warn!("Failed to draw frame: {}", e);
        }

        self.last_draw = Some(Instant::now());
        self.last_model = Some(model.clone());
    }
}

/// Anything other than live numbers changed
fn state_changed(a: &RenderModel, b: &RenderModel) -> bool {
    a.state != b.state
        || a.digit_target != b.digit_target
        || a.complete != b.complete
        || a.producers
            .iter()
            .zip(b.producers.iter())
            .any(|(x, y)| x.state != y.state)
}

fn mode_label(mode: RaceMode) -> String {
    match mode {
        RaceMode::None => "-".to_string(),
        RaceMode::Single(id) => id.name().to_string(),
        RaceMode::Race => "race".to_string(),
    }
}

fn state_label(state: RaceState) -> String {
    match state {
        RaceState::Idle => "idle".to_string(),
        RaceState::Armed(mode) => format!("armed ({})", mode_label(mode)),
        RaceState::Running(mode) => format!("running ({})", mode_label(mode)),
        RaceState::Resetting => "resetting".to_string(),
    }
}

/// Estimate with its matched fractional digits bracketed
pub fn mark_matched(value: f64, matching: u32) -> String {
    let formatted = format!("{:.*}", MATCH_PRECISION, value);
    let Some((int, frac)) = formatted.split_once('.') else {
        return formatted;
    };
    let split = (matching as usize).min(frac.len());
    if split == 0 {
        return formatted;
    }
    format!("{}.[{}]{}", int, &frac[..split], &frac[split..])
}

fn format_producer(view: &ProducerView) -> String {
    let led = if view.indicator { '●' } else { '○' };
    format!(
        "{} {:<10} {:<16} {:>2}/{:<2} steps {:>12}  {:>8.3}s  {}",
        led,
        view.label,
        mark_matched(view.estimate, view.matching_digits),
        view.matching_digits,
        view.digit_target,
        view.step_count,
        view.elapsed.as_secs_f64(),
        view.state
    )
}

/// Render a full frame as text
pub fn format_model(model: &RenderModel) -> String {
    let mut frame = format!(
        "\n{} | target {} digits\n",
        state_label(model.state),
        model.digit_target
    );
    for view in &model.producers {
        frame.push_str(&format_producer(view));
        frame.push('\n');
    }
    if model.complete {
        frame.push_str("*** complete - reset (x) to run again ***\n");
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use pirace_core::controller::{control_channel, RaceController};
    use pirace_core::producer::YieldPolicy;

    fn idle_model() -> RenderModel {
        let (_tx, rx) = control_channel();
        RaceController::new(6, YieldPolicy::default(), rx).render()
    }

    #[test]
    fn test_mark_matched() {
        assert_eq!(mark_matched(3.14159, 5), "3.[14159]00000");
        assert_eq!(mark_matched(3.0, 0), "3.0000000000");
        assert_eq!(mark_matched(std::f64::consts::PI, 10), "3.[1415926536]");
    }

    #[test]
    fn test_idle_frame_lists_every_producer() {
        let frame = format_model(&idle_model());
        assert!(frame.contains("idle | target 6 digits"));
        for name in ["Leibniz", "Euler", "Chudnovsky"] {
            assert!(frame.contains(name), "{name} missing");
        }
        assert!(!frame.contains("complete"));
    }

    #[test]
    fn test_first_frame_always_due() {
        let display = TerminalDisplay::new(Duration::from_secs(60));
        assert!(display.due(&idle_model()));
    }

    #[test]
    fn test_unchanged_idle_frame_not_redrawn() {
        let model = idle_model();
        let mut display = TerminalDisplay::new(Duration::ZERO);
        display.last_model = Some(model.clone());
        display.last_draw = Some(Instant::now());
        assert!(!display.due(&model));

        let mut changed = model.clone();
        changed.digit_target = 7;
        assert!(display.due(&changed));
    }
}
