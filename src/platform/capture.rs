//! Module: platform::capture
//!
//! Purpose: CSI activation against the ESP-IDF radio and the `extern "C"`
//! trampoline from the driver's callback into the sink.
//!
//! The raw `esp_wifi_set_csi_*` API has no safe wrapper, so this is the one
//! module that touches it. The sink lives in a static cell: it is installed
//! before the callback is registered, and afterwards only the driver's
//! (serialized) callback context touches it.

use core::cell::UnsafeCell;
use core::ffi::c_void;

use esp_idf_svc::sys::{
    esp, esp_wifi_set_csi, esp_wifi_set_csi_config, esp_wifi_set_csi_rx_cb, wifi_csi_config_t,
    wifi_csi_info_t, EspError,
};

use crate::capture::{self, CaptureError, CsiRadio};
use crate::csi::{CsiConfig, CsiRecord};
use crate::platform::console::ConsoleWriter;
use crate::sink::CsiSink;
use crate::stats::CaptureStats;

/// Counters shared between the sink (driver context) and the orchestrator's
/// reporting loop.
pub static CAPTURE_STATS: CaptureStats = CaptureStats::new();

struct SinkCell(UnsafeCell<Option<CsiSink<ConsoleWriter>>>);

// SAFETY: the cell is written once by `activate` before the callback is
// registered with the driver, and read only from the driver's callback
// context afterward. The driver serializes callback invocations.
unsafe impl Sync for SinkCell {}

static SINK: SinkCell = SinkCell(UnsafeCell::new(None));

/// Witness of a fully-activated capture pipeline.
///
/// There is deliberately no deactivation path: capture runs until the
/// process ends.
pub struct CsiCapture {
    _private: (),
}

/// Activate CSI capture: install the sink, then register, configure, and
/// enable in order. Invoked only after the connection outcome is
/// `Connected`. Any step failure leaves capture inactive.
pub fn activate(config: &CsiConfig) -> Result<CsiCapture, CaptureError<EspError>> {
    // Install the sink before the driver can know about the callback. If a
    // later step fails the installed sink is unreachable and harmless.
    unsafe {
        *SINK.0.get() = Some(CsiSink::new(ConsoleWriter::new(), &CAPTURE_STATS));
    }

    let mut radio = EspCsiRadio;
    capture::activate(&mut radio, config)?;
    Ok(CsiCapture { _private: () })
}

/// `CsiRadio` over the raw ESP-IDF CSI API.
struct EspCsiRadio;

impl CsiRadio for EspCsiRadio {
    type RadioError = EspError;

    fn register_sink(&mut self) -> Result<(), EspError> {
        esp!(unsafe { esp_wifi_set_csi_rx_cb(Some(csi_rx_trampoline), core::ptr::null_mut()) })
    }

    fn apply_config(&mut self, config: &CsiConfig) -> Result<(), EspError> {
        let raw = raw_config(config);
        esp!(unsafe { esp_wifi_set_csi_config(&raw) })
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), EspError> {
        esp!(unsafe { esp_wifi_set_csi(enabled) })
    }
}

fn raw_config(config: &CsiConfig) -> wifi_csi_config_t {
    wifi_csi_config_t {
        lltf_en: config.lltf,
        htltf_en: config.htltf,
        stbc_htltf2_en: config.stbc_htltf2,
        ltf_merge_en: config.ltf_merge,
        channel_filter_en: config.channel_filter,
        manu_scale: config.manual_scale,
        shift: config.scale_shift,
        ..Default::default()
    }
}

/// Driver callback: one invocation per completed measurement, on the radio's
/// event path. Screens the raw pointers, then hands a borrowed record to the
/// sink; an absent buffer is passed on as an empty record so the sink's
/// validity filter accounts for it. Must never block or fail.
unsafe extern "C" fn csi_rx_trampoline(_ctx: *mut c_void, info: *mut wifi_csi_info_t) {
    if info.is_null() {
        return;
    }
    let info = &*info;

    let samples: &[i8] = if info.buf.is_null() {
        &[]
    } else {
        core::slice::from_raw_parts(info.buf as *const i8, info.len as usize)
    };
    let record = CsiRecord::new(info.rx_ctrl.rssi() as i32, samples);

    if let Some(sink) = (*SINK.0.get()).as_mut() {
        sink.on_record(&record);
    }
}
