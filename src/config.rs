//! Module: config
//!
//! Purpose: station configuration — credentials, retry budget, and the
//! minimum auth mode the station will associate with. Read once at startup
//! from the persistent store (see `platform::nvs`), never written back.

/// Maximum SSID length the radio accepts.
pub const SSID_MAX: usize = 32;
/// Maximum passphrase length the radio accepts.
pub const PASSWORD_MAX: usize = 64;

/// Default retry budget when the store has none.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Minimum auth mode accepted during association.
///
/// Codes are what the persistent store uses; the mapping to the radio
/// driver's auth-method type lives in the platform layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AuthThreshold {
    Open = 0,
    Wep = 1,
    WpaPsk = 2,
    #[default]
    Wpa2Psk = 3,
    WpaWpa2Psk = 4,
    Wpa3Psk = 5,
    Wpa2Wpa3Psk = 6,
    WapiPsk = 7,
}

impl AuthThreshold {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AuthThreshold::Open),
            1 => Some(AuthThreshold::Wep),
            2 => Some(AuthThreshold::WpaPsk),
            3 => Some(AuthThreshold::Wpa2Psk),
            4 => Some(AuthThreshold::WpaWpa2Psk),
            5 => Some(AuthThreshold::Wpa3Psk),
            6 => Some(AuthThreshold::Wpa2Wpa3Psk),
            7 => Some(AuthThreshold::WapiPsk),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Configuration rejected before any radio call was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No SSID in the store and no compiled fallback.
    MissingSsid,
    SsidTooLong,
    PasswordTooLong,
}

/// Immutable station configuration for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationConfig {
    pub ssid: heapless::String<SSID_MAX>,
    pub password: heapless::String<PASSWORD_MAX>,
    pub max_retries: u32,
    pub auth_threshold: AuthThreshold,
}

impl StationConfig {
    /// Build a validated configuration with default retry budget and auth
    /// threshold.
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConfigError> {
        if ssid.is_empty() {
            return Err(ConfigError::MissingSsid);
        }
        let mut ssid_buf = heapless::String::new();
        ssid_buf
            .push_str(ssid)
            .map_err(|_| ConfigError::SsidTooLong)?;
        let mut password_buf = heapless::String::new();
        password_buf
            .push_str(password)
            .map_err(|_| ConfigError::PasswordTooLong)?;
        Ok(Self {
            ssid: ssid_buf,
            password: password_buf,
            max_retries: DEFAULT_MAX_RETRIES,
            auth_threshold: AuthThreshold::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = StationConfig::new("lab-ap", "hunter22").unwrap();
        assert_eq!(config.ssid.as_str(), "lab-ap");
        assert_eq!(config.password.as_str(), "hunter22");
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.auth_threshold, AuthThreshold::Wpa2Psk);
    }

    #[test]
    fn test_empty_ssid_rejected() {
        assert_eq!(
            StationConfig::new("", "pw").unwrap_err(),
            ConfigError::MissingSsid
        );
    }

    #[test]
    fn test_overlong_ssid_rejected() {
        let ssid = "x".repeat(SSID_MAX + 1);
        assert_eq!(
            StationConfig::new(&ssid, "pw").unwrap_err(),
            ConfigError::SsidTooLong
        );
    }

    #[test]
    fn test_overlong_password_rejected() {
        let password = "x".repeat(PASSWORD_MAX + 1);
        assert_eq!(
            StationConfig::new("ap", &password).unwrap_err(),
            ConfigError::PasswordTooLong
        );
    }

    #[test]
    fn test_auth_threshold_codes_round_trip() {
        for code in 0..=7u8 {
            let threshold = AuthThreshold::from_code(code).unwrap();
            assert_eq!(threshold.code(), code);
        }
        assert_eq!(AuthThreshold::from_code(8), None);
    }
}
