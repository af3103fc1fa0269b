//! Connection state machine tests: bounded retry, terminal outcomes, and
//! single-shot semantics.

use wifi_csi_sta::station::{
    Action, LinkEvent, Outcome, OutcomeCell, StaState, StationMachine, Step,
};

fn connecting_machine(max_retries: u32) -> StationMachine {
    let mut machine = StationMachine::new(max_retries);
    let step = machine.on_event(LinkEvent::Started);
    assert_eq!(step.action, Some(Action::Connect));
    machine
}

#[test]
fn test_idle_ignores_disconnect_and_address() {
    let mut machine = StationMachine::new(3);
    assert_eq!(machine.on_event(LinkEvent::Disconnected), Step::default());
    assert_eq!(machine.on_event(LinkEvent::AddressAcquired), Step::default());
    assert_eq!(machine.state(), StaState::Idle);
}

#[test]
fn test_disconnect_below_budget_retries() {
    let max_retries = 4;
    let mut machine = connecting_machine(max_retries);

    for expected_count in 1..=max_retries {
        let step = machine.on_event(LinkEvent::Disconnected);
        assert_eq!(step.action, Some(Action::Connect));
        assert_eq!(step.outcome, None);
        assert_eq!(machine.retry_count(), expected_count);
        assert_eq!(machine.state(), StaState::Connecting);
    }
}

#[test]
fn test_disconnect_at_budget_fails() {
    let mut machine = connecting_machine(2);
    machine.on_event(LinkEvent::Disconnected);
    machine.on_event(LinkEvent::Disconnected);
    assert_eq!(machine.retry_count(), 2);

    let step = machine.on_event(LinkEvent::Disconnected);
    assert_eq!(step.action, None);
    assert_eq!(step.outcome, Some(Outcome::Failed));
    assert_eq!(machine.state(), StaState::Failed);
}

#[test]
fn test_zero_budget_fails_on_first_disconnect() {
    let mut machine = connecting_machine(0);
    let step = machine.on_event(LinkEvent::Disconnected);
    assert_eq!(step.outcome, Some(Outcome::Failed));
    assert_eq!(machine.state(), StaState::Failed);
}

#[test]
fn test_address_acquired_connects_and_resets_retries() {
    let mut machine = connecting_machine(5);
    machine.on_event(LinkEvent::Disconnected);
    machine.on_event(LinkEvent::Disconnected);
    assert_eq!(machine.retry_count(), 2);

    let step = machine.on_event(LinkEvent::AddressAcquired);
    assert_eq!(step.action, None);
    assert_eq!(step.outcome, Some(Outcome::Connected));
    assert_eq!(machine.state(), StaState::Connected);
    assert_eq!(machine.retry_count(), 0);
}

#[test]
fn test_connected_is_terminal() {
    let mut machine = connecting_machine(3);
    machine.on_event(LinkEvent::AddressAcquired);

    // A later link drop produces no transition and no second outcome.
    assert_eq!(machine.on_event(LinkEvent::Disconnected), Step::default());
    assert_eq!(machine.on_event(LinkEvent::Started), Step::default());
    assert_eq!(machine.on_event(LinkEvent::AddressAcquired), Step::default());
    assert_eq!(machine.state(), StaState::Connected);
}

#[test]
fn test_failed_is_terminal() {
    let mut machine = connecting_machine(0);
    machine.on_event(LinkEvent::Disconnected);

    // A late address acquisition after failure is ignored.
    assert_eq!(machine.on_event(LinkEvent::AddressAcquired), Step::default());
    assert_eq!(machine.on_event(LinkEvent::Disconnected), Step::default());
    assert_eq!(machine.state(), StaState::Failed);
}

#[test]
fn test_outcome_produced_exactly_once() {
    let cell = OutcomeCell::new();
    let mut machine = connecting_machine(1);

    let mut published = 0;
    for event in [
        LinkEvent::Disconnected,
        LinkEvent::AddressAcquired,
        LinkEvent::Disconnected,
        LinkEvent::AddressAcquired,
    ] {
        if let Some(outcome) = machine.on_event(event).outcome {
            if cell.publish(outcome) {
                published += 1;
            }
        }
    }

    assert_eq!(published, 1);
    assert_eq!(cell.get(), Some(Outcome::Connected));
}
