//! Module: capture
//!
//! Purpose: capture activation sequence. Three radio operations must succeed
//! in order — sink registration, CSI configuration, enable — before capture
//! is considered active. A failed step aborts the sequence immediately and
//! names itself in the error; no partial-activation state is retained.
//!
//! The radio operations sit behind [`CsiRadio`] so the sequencing contract
//! (order, short-circuit, per-step errors) is testable without hardware. The
//! ESP-IDF implementation lives in `platform::capture`.

use crate::csi::CsiConfig;

/// Which activation step failed, carrying the radio's error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureError<E> {
    /// Registering the measurement sink with the radio failed.
    Register(E),
    /// Applying the CSI feature flags failed.
    Configure(E),
    /// Turning on CSI reporting failed.
    Enable(E),
}

impl<E: core::fmt::Display> core::fmt::Display for CaptureError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CaptureError::Register(e) => write!(f, "CSI sink registration failed: {}", e),
            CaptureError::Configure(e) => write!(f, "CSI configuration failed: {}", e),
            CaptureError::Enable(e) => write!(f, "CSI enable failed: {}", e),
        }
    }
}

/// Radio-driver operations consumed by activation.
pub trait CsiRadio {
    type RadioError;

    /// Register the measurement sink with the radio's event source.
    fn register_sink(&mut self) -> Result<(), Self::RadioError>;
    /// Apply the estimation feature flags.
    fn apply_config(&mut self, config: &CsiConfig) -> Result<(), Self::RadioError>;
    /// Turn CSI reporting on or off.
    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::RadioError>;
}

/// Run the activation sequence: register, configure, enable.
///
/// Invoked only after the connection outcome is `Connected`. On error the
/// remaining steps are not attempted and capture stays inactive.
pub fn activate<R: CsiRadio>(
    radio: &mut R,
    config: &CsiConfig,
) -> Result<(), CaptureError<R::RadioError>> {
    radio.register_sink().map_err(CaptureError::Register)?;
    radio.apply_config(config).map_err(CaptureError::Configure)?;
    radio.set_enabled(true).map_err(CaptureError::Enable)?;
    Ok(())
}
