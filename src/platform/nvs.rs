//! Module: platform::nvs
//!
//! Purpose: read the station configuration from NVS at startup.
//!
//! Namespace `sta_cfg`, keys `ssid` (str), `password` (str), `max_retry`
//! (u32), `auth` (u8 threshold code). Credentials fall back to the
//! compile-time `CSI_WIFI_SSID` / `CSI_WIFI_PASS` environment values when the
//! store has none; a run with neither is rejected before any radio call.
//! This module never writes the store.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use esp_idf_svc::sys::{
    esp, nvs_flash_erase, EspError, ESP_ERR_NVS_NEW_VERSION_FOUND, ESP_ERR_NVS_NO_FREE_PAGES,
};
use log::warn;

use crate::config::{AuthThreshold, ConfigError, StationConfig, PASSWORD_MAX, SSID_MAX};

/// NVS namespace for station configuration.
pub const NVS_NAMESPACE: &str = "sta_cfg";

const SSID_KEY: &str = "ssid";
const PASSWORD_KEY: &str = "password";
const MAX_RETRY_KEY: &str = "max_retry";
const AUTH_KEY: &str = "auth";

/// Compile-time credential fallback for stores that were never provisioned.
const COMPILED_SSID: Option<&str> = option_env!("CSI_WIFI_SSID");
const COMPILED_PASSWORD: Option<&str> = option_env!("CSI_WIFI_PASS");

/// Configuration store errors. All are fatal at startup.
#[derive(Debug)]
pub enum NvsConfigError {
    /// NVS flash or namespace initialization failed.
    InitFailed(EspError),
    /// NVS read error.
    IoError(EspError),
    /// Stored values do not form a usable configuration.
    Invalid(ConfigError),
}

impl From<EspError> for NvsConfigError {
    fn from(e: EspError) -> Self {
        NvsConfigError::IoError(e)
    }
}

impl From<ConfigError> for NvsConfigError {
    fn from(e: ConfigError) -> Self {
        NvsConfigError::Invalid(e)
    }
}

/// Take the default NVS partition, recovering from a stale or truncated page
/// layout by erasing and retrying once, the standard bring-up sequence for
/// this flash layout.
pub fn take_partition() -> Result<EspDefaultNvsPartition, EspError> {
    match EspDefaultNvsPartition::take() {
        Ok(partition) => Ok(partition),
        Err(err)
            if err.code() == ESP_ERR_NVS_NO_FREE_PAGES as i32
                || err.code() == ESP_ERR_NVS_NEW_VERSION_FOUND as i32 =>
        {
            warn!("NVS flash unusable ({err}), erasing and retrying");
            esp!(unsafe { nvs_flash_erase() })?;
            EspDefaultNvsPartition::take()
        }
        Err(err) => Err(err),
    }
}

/// Load the station configuration, consulting the store once and falling
/// back to compiled defaults for anything missing.
pub fn load_station_config(
    partition: EspDefaultNvsPartition,
) -> Result<StationConfig, NvsConfigError> {
    let store = EspNvs::new(partition, NVS_NAMESPACE, true).map_err(NvsConfigError::InitFailed)?;

    let mut ssid_buf = [0u8; SSID_MAX + 1];
    let ssid = match read_str(&store, SSID_KEY, &mut ssid_buf)? {
        Some(value) => value,
        None => COMPILED_SSID.unwrap_or(""),
    };

    let mut password_buf = [0u8; PASSWORD_MAX + 1];
    let password = match read_str(&store, PASSWORD_KEY, &mut password_buf)? {
        Some(value) => value,
        None => COMPILED_PASSWORD.unwrap_or(""),
    };

    let mut config = StationConfig::new(ssid, password)?;

    if let Some(max_retries) = store.get_u32(MAX_RETRY_KEY)? {
        config.max_retries = max_retries;
    }

    if let Some(code) = store.get_u8(AUTH_KEY)? {
        match AuthThreshold::from_code(code) {
            Some(threshold) => config.auth_threshold = threshold,
            None => warn!("unknown auth threshold code {code} in NVS, keeping default"),
        }
    }

    Ok(config)
}

fn read_str<'a>(
    store: &EspNvs<NvsDefault>,
    key: &str,
    buf: &'a mut [u8],
) -> Result<Option<&'a str>, NvsConfigError> {
    Ok(store.get_str(key, buf)?)
}
