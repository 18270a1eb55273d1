//! Controller and producer states

use crate::types::ProducerId;

/// Which producers a run involves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaceMode {
    #[default]
    None,
    Single(ProducerId),
    /// Every producer
    Race,
}

impl RaceMode {
    /// Whether `id` takes part in this mode
    pub fn includes(&self, id: ProducerId) -> bool {
        match self {
            RaceMode::None => false,
            RaceMode::Single(p) => *p == id,
            RaceMode::Race => true,
        }
    }

    /// Producers taking part, in slot order
    pub fn producers(self) -> impl Iterator<Item = ProducerId> {
        ProducerId::ALL.into_iter().filter(move |id| self.includes(*id))
    }
}

/// Race controller state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaceState {
    #[default]
    Idle,
    /// Mode accepted; producers start on the next tick
    Armed(RaceMode),
    Running(RaceMode),
    /// Producers are being torn down
    Resetting,
}

impl RaceState {
    /// Mode of the current run (`None` while idle or resetting)
    pub fn mode(&self) -> RaceMode {
        match self {
            RaceState::Armed(mode) | RaceState::Running(mode) => *mode,
            RaceState::Idle | RaceState::Resetting => RaceMode::None,
        }
    }
}

/// Per-producer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProducerState {
    #[default]
    Idle,
    Running,
    /// Reached the digit target; thread paused
    Converged,
    /// Being torn down
    Reset,
}

impl ProducerState {
    pub fn name(&self) -> &'static str {
        match self {
            ProducerState::Idle => "Idle",
            ProducerState::Running => "Running",
            ProducerState::Converged => "Converged",
            ProducerState::Reset => "Reset",
        }
    }
}

impl std::fmt::Display for ProducerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_membership() {
        let single = RaceMode::Single(ProducerId::Euler);
        assert!(single.includes(ProducerId::Euler));
        assert!(!single.includes(ProducerId::Leibniz));
        assert_eq!(single.producers().collect::<Vec<_>>(), vec![ProducerId::Euler]);

        assert_eq!(RaceMode::Race.producers().count(), ProducerId::ALL.len());
        assert_eq!(RaceMode::None.producers().count(), 0);
    }

    #[test]
    fn test_state_mode() {
        assert_eq!(RaceState::Idle.mode(), RaceMode::None);
        assert_eq!(RaceState::Armed(RaceMode::Race).mode(), RaceMode::Race);
        assert_eq!(RaceState::Resetting.mode(), RaceMode::None);
    }
}
