//! wifi-csi-sta - Main entry point
//!
//! Orchestration: bring up the persistent store, load the station
//! configuration, associate (bounded retry), and on success enable CSI
//! capture. From then on the radio drives the pipeline; the main task only
//! reports capture totals at a slow cadence.

#[cfg(target_os = "espidf")]
mod app {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::sys::EspError;
    use log::{error, info};

    use wifi_csi_sta::csi::CsiConfig;
    use wifi_csi_sta::platform::capture::{self, CAPTURE_STATS};
    use wifi_csi_sta::platform::nvs::{self, NvsConfigError};
    use wifi_csi_sta::platform::wifi::WifiSession;
    use wifi_csi_sta::station::{Outcome, OutcomeCell};

    const STATS_REPORT_INTERVAL_MS: u32 = 30_000;

    /// Terminal outcome of the single association run. Written by the event
    /// relay, polled by `run`.
    static OUTCOME: OutcomeCell = OutcomeCell::new();

    #[derive(Debug)]
    enum StartupError {
        Esp(EspError),
        Config(NvsConfigError),
    }

    impl From<EspError> for StartupError {
        fn from(e: EspError) -> Self {
            StartupError::Esp(e)
        }
    }

    impl From<NvsConfigError> for StartupError {
        fn from(e: NvsConfigError) -> Self {
            StartupError::Config(e)
        }
    }

    pub fn main() {
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();

        info!("{}", env!("VERSION_STRING"));

        if let Err(err) = run() {
            error!("startup failed: {err:?}");
        }
    }

    fn run() -> Result<(), StartupError> {
        let peripherals = Peripherals::take()?;
        let sysloop = EspSystemEventLoop::take()?;

        let nvs = nvs::take_partition()?;
        let config = nvs::load_station_config(nvs.clone())?;
        info!(
            "station config: ssid={} max_retries={} auth={:?}",
            config.ssid, config.max_retries, config.auth_threshold
        );

        let session = WifiSession::start(peripherals.modem, sysloop, nvs, &config, &OUTCOME)?;

        match session.wait_for_outcome() {
            Outcome::Connected => {
                info!("connected to {}", config.ssid);
                match capture::activate(&CsiConfig::default()) {
                    Ok(_capture) => {
                        info!("CSI capture enabled");
                        report_loop();
                    }
                    Err(err) => {
                        // Connection stands; only the capture subsystem is down.
                        error!("{err}");
                        park();
                    }
                }
            }
            Outcome::Failed => {
                error!("failed to connect to {}, retry budget exhausted", config.ssid);
                park();
            }
        }
    }

    /// Idle loop while capture runs. Reporting happens here, never on the
    /// driver's event path.
    fn report_loop() -> ! {
        loop {
            FreeRtos::delay_ms(STATS_REPORT_INTERVAL_MS);
            let snap = CAPTURE_STATS.snapshot();
            info!(
                "csi: received={} emitted={} discarded={} truncated={} write_failures={}",
                snap.received, snap.emitted, snap.discarded, snap.truncated, snap.write_failures
            );
        }
    }

    /// Terminal park: the run is over, keep the task alive for the logs.
    fn park() -> ! {
        loop {
            FreeRtos::delay_ms(1_000);
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    app::main();
}

/// Host builds compile the portable library and its tests only; the firmware
/// entry point does nothing off-device.
#[cfg(not(target_os = "espidf"))]
fn main() {}
