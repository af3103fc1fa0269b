//! Module: platform::wifi
//!
//! Purpose: WiFi lifecycle against ESP-IDF — driver bring-up and the event
//! relay that feeds system-event-loop notifications into the
//! `StationMachine`.
//!
//! The relay runs in the event-loop task. It holds the machine behind a
//! mutex shared with nothing else, issues reconnect requests from the event
//! context (the driver expects this), and publishes the terminal outcome
//! through the lock-free `OutcomeCell` the orchestrator polls. It never
//! touches the output transport.

use std::sync::{Arc, Mutex};

use esp_idf_svc::eventloop::{EspSubscription, EspSystemEventLoop, System};
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::netif::IpEvent;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::{esp, esp_wifi_connect, EspError};
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi, WifiEvent};
use log::{debug, error};

use crate::config::{AuthThreshold, StationConfig};
use crate::station::{Action, LinkEvent, Outcome, OutcomeCell, StationMachine};

const OUTCOME_POLL_MS: u32 = 100;

/// One station association run: the driver handle plus the event-relay
/// subscriptions that keep the machine fed.
///
/// Dropping the session tears down the subscriptions and the driver, so it
/// must outlive capture.
pub struct WifiSession<'d> {
    _wifi: EspWifi<'d>,
    outcome: &'static OutcomeCell,
    _wifi_sub: EspSubscription<'static, System>,
    _ip_sub: EspSubscription<'static, System>,
}

impl<'d> WifiSession<'d> {
    /// Configure the driver, wire the event relay, and start the interface.
    /// The start notification kicks the machine out of `Idle`; association
    /// proceeds from there without further involvement of the caller.
    pub fn start(
        modem: impl Peripheral<P = Modem> + 'd,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
        config: &StationConfig,
        outcome: &'static OutcomeCell,
    ) -> Result<Self, EspError> {
        let mut wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))?;
        wifi.set_configuration(&Configuration::Client(client_configuration(config)))?;

        let machine = Arc::new(Mutex::new(StationMachine::new(config.max_retries)));

        let wifi_sub = {
            let machine = machine.clone();
            sysloop.subscribe::<WifiEvent, _>(move |event| match event {
                WifiEvent::StaStarted => relay(&machine, outcome, LinkEvent::Started),
                WifiEvent::StaDisconnected(_) => {
                    relay(&machine, outcome, LinkEvent::Disconnected)
                }
                _ => (),
            })?
        };

        let ip_sub = {
            let machine = machine.clone();
            sysloop.subscribe::<IpEvent, _>(move |event| {
                if let IpEvent::DhcpIpAssigned(_) = event {
                    relay(&machine, outcome, LinkEvent::AddressAcquired);
                }
            })?
        };

        wifi.start()?;

        Ok(Self {
            _wifi: wifi,
            outcome,
            _wifi_sub: wifi_sub,
            _ip_sub: ip_sub,
        })
    }

    /// Block until the machine settles. No timeout: the station waits for
    /// the access point as long as it takes, as a capture node should.
    pub fn wait_for_outcome(&self) -> Outcome {
        loop {
            if let Some(outcome) = self.outcome.get() {
                return outcome;
            }
            FreeRtos::delay_ms(OUTCOME_POLL_MS);
        }
    }
}

/// Feed one lifecycle event to the machine and execute the step it returns.
fn relay(machine: &Mutex<StationMachine>, outcome: &OutcomeCell, event: LinkEvent) {
    let step = {
        let Ok(mut machine) = machine.lock() else {
            return;
        };
        debug!("link event {:?} in state {:?}", event, machine.state());
        machine.on_event(event)
    };

    if let Some(Action::Connect) = step.action {
        // Reconnects are issued from the event context, matching the
        // driver's expectations. A connect request the driver refuses is not
        // a link-level disconnect: it ends the run instead of burning the
        // retry budget.
        if let Err(err) = esp!(unsafe { esp_wifi_connect() }) {
            error!("connect request refused: {err}");
            outcome.publish(Outcome::Failed);
            return;
        }
    }

    if let Some(result) = step.outcome {
        outcome.publish(result);
    }
}

fn client_configuration(config: &StationConfig) -> ClientConfiguration {
    ClientConfiguration {
        ssid: config.ssid.clone(),
        password: config.password.clone(),
        auth_method: auth_method(config.auth_threshold),
        ..Default::default()
    }
}

fn auth_method(threshold: AuthThreshold) -> AuthMethod {
    match threshold {
        AuthThreshold::Open => AuthMethod::None,
        AuthThreshold::Wep => AuthMethod::WEP,
        AuthThreshold::WpaPsk => AuthMethod::WPA,
        AuthThreshold::Wpa2Psk => AuthMethod::WPA2Personal,
        AuthThreshold::WpaWpa2Psk => AuthMethod::WPAWPA2Personal,
        AuthThreshold::Wpa3Psk => AuthMethod::WPA3Personal,
        AuthThreshold::Wpa2Wpa3Psk => AuthMethod::WPA2WPA3Personal,
        AuthThreshold::WapiPsk => AuthMethod::WAPIPersonal,
    }
}
