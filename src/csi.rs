//! Module: csi
//!
//! Purpose: CSI measurement data model. A `CsiRecord` is a borrowed view of
//! one measurement delivered by the radio driver; a `CsiConfig` is the set of
//! channel-estimation feature flags applied to the radio before capture
//! starts.
//!
//! Safety: Safe. No unsafe blocks. The record borrows the driver's buffer,
//! so it cannot outlive a single callback invocation.

/// Upper bound on the CSI sample buffer delivered by the ESP-IDF driver.
///
/// The driver documents at most 612 bytes of raw CSI per packet (all LTF
/// fields enabled on a 40 MHz HT packet).
pub const MAX_CSI_SAMPLES: usize = 612;

/// One CSI measurement, borrowed from the radio driver.
///
/// `samples` is the raw per-subcarrier amplitude/phase byte stream exactly as
/// the driver produced it. Its internal encoding is opaque here; it is carried
/// through to the output line untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsiRecord<'a> {
    /// Received signal strength of the triggering packet, dBm scale.
    pub rssi: i32,
    /// Raw CSI bytes, in driver order.
    pub samples: &'a [i8],
}

impl<'a> CsiRecord<'a> {
    pub fn new(rssi: i32, samples: &'a [i8]) -> Self {
        Self { rssi, samples }
    }

    /// A record with no samples carries no measurement and must be discarded
    /// without producing output. Expected at link edges, not an error.
    pub fn is_valid(&self) -> bool {
        !self.samples.is_empty()
    }
}

/// Channel-estimation feature flags applied to the radio before capture.
///
/// Immutable after activation. Defaults match the station's production
/// configuration: all long-training-field sources enabled, merged, with the
/// channel filter off (adjacent sub-carriers stay independent) and automatic
/// scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsiConfig {
    /// Capture legacy long training field (L-LTF) data.
    pub lltf: bool,
    /// Capture HT long training field (HT-LTF) data.
    pub htltf: bool,
    /// Capture space-time-block-code HT-LTF2 data.
    pub stbc_htltf2: bool,
    /// Generate HT-LTF data by averaging L-LTF and HT-LTF on HT packets.
    pub ltf_merge: bool,
    /// Smooth adjacent sub-carriers with the channel filter.
    pub channel_filter: bool,
    /// Scale CSI manually instead of automatically.
    pub manual_scale: bool,
    /// Left-shift applied when `manual_scale` is set (0..=15).
    pub scale_shift: u8,
}

impl Default for CsiConfig {
    fn default() -> Self {
        Self {
            lltf: true,
            htltf: true,
            stbc_htltf2: true,
            ltf_merge: true,
            channel_filter: false,
            manual_scale: false,
            scale_shift: 0,
        }
    }
}
