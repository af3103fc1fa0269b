//! Module: station
//!
//! Purpose: connection-lifecycle state machine for one association attempt.
//!
//! States: `Idle → Connecting → {Connected, Failed}`, terminal on either
//! branch. The machine is single-shot per run: once settled it absorbs all
//! further events. A link drop after the terminal connected state has no
//! defined recovery path here.
//!
//! The transition function is pure; side effects (issuing a connect request,
//! publishing the outcome) are returned as a [`Step`] and executed by the
//! caller. That keeps retry state owned by this machine alone — no globals —
//! and makes every transition host-testable.

use core::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle notification delivered by the network stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// The station interface started; association may begin.
    Started,
    /// The link went down while associating.
    Disconnected,
    /// Network-layer address acquired; association is complete.
    AddressAcquired,
}

/// Connection lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaState {
    Idle,
    Connecting,
    Connected,
    Failed,
}

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Issue (or reissue) a connect request to the network stack.
    Connect,
}

/// Terminal result of one connection effort. Produced exactly once per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Connected,
    Failed,
}

/// Result of feeding one event to the machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub action: Option<Action>,
    pub outcome: Option<Outcome>,
}

impl Step {
    const EMPTY: Step = Step {
        action: None,
        outcome: None,
    };
}

/// One association attempt: current state plus the bounded-retry budget.
pub struct StationMachine {
    state: StaState,
    retry_count: u32,
    max_retries: u32,
}

impl StationMachine {
    pub fn new(max_retries: u32) -> Self {
        Self {
            state: StaState::Idle,
            retry_count: 0,
            max_retries,
        }
    }

    pub fn state(&self) -> StaState {
        self.state
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Advance the machine by one lifecycle event.
    ///
    /// Link-down while the retry budget lasts is absorbed here (increment and
    /// reconnect); budget exhaustion and address acquisition settle the
    /// machine and report an [`Outcome`]. Terminal states return an empty
    /// step for every event.
    pub fn on_event(&mut self, event: LinkEvent) -> Step {
        match (self.state, event) {
            (StaState::Idle, LinkEvent::Started) => {
                self.state = StaState::Connecting;
                Step {
                    action: Some(Action::Connect),
                    outcome: None,
                }
            }
            (StaState::Connecting, LinkEvent::Disconnected) => {
                if self.retry_count < self.max_retries {
                    self.retry_count += 1;
                    Step {
                        action: Some(Action::Connect),
                        outcome: None,
                    }
                } else {
                    self.state = StaState::Failed;
                    Step {
                        action: None,
                        outcome: Some(Outcome::Failed),
                    }
                }
            }
            (StaState::Connecting, LinkEvent::AddressAcquired) => {
                self.retry_count = 0;
                self.state = StaState::Connected;
                Step {
                    action: None,
                    outcome: Some(Outcome::Connected),
                }
            }
            // Everything else: out-of-order notifications and any event after
            // a terminal state. Ignored.
            _ => Step::EMPTY,
        }
    }
}

const OUTCOME_PENDING: u8 = 0;
const OUTCOME_CONNECTED: u8 = 1;
const OUTCOME_FAILED: u8 = 2;

/// Single-shot terminal-outcome cell.
///
/// The event relay publishes from its own context; the orchestrator polls
/// from the main task. First publish wins, later ones are ignored, which
/// enforces the produce-exactly-once invariant across contexts without a
/// lock.
pub struct OutcomeCell {
    value: AtomicU8,
}

impl OutcomeCell {
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(OUTCOME_PENDING),
        }
    }

    /// Publish the outcome. Returns `false` if one was already set.
    pub fn publish(&self, outcome: Outcome) -> bool {
        let raw = match outcome {
            Outcome::Connected => OUTCOME_CONNECTED,
            Outcome::Failed => OUTCOME_FAILED,
        };
        self.value
            .compare_exchange(OUTCOME_PENDING, raw, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn get(&self) -> Option<Outcome> {
        match self.value.load(Ordering::Acquire) {
            OUTCOME_CONNECTED => Some(Outcome::Connected),
            OUTCOME_FAILED => Some(Outcome::Failed),
            _ => None,
        }
    }
}

impl Default for OutcomeCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_triggers_connect() {
        let mut machine = StationMachine::new(3);
        let step = machine.on_event(LinkEvent::Started);
        assert_eq!(step.action, Some(Action::Connect));
        assert_eq!(step.outcome, None);
        assert_eq!(machine.state(), StaState::Connecting);
    }

    #[test]
    fn test_outcome_cell_first_publish_wins() {
        let cell = OutcomeCell::new();
        assert_eq!(cell.get(), None);
        assert!(cell.publish(Outcome::Failed));
        assert!(!cell.publish(Outcome::Connected));
        assert_eq!(cell.get(), Some(Outcome::Failed));
    }
}
