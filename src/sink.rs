//! Module: sink
//!
//! Purpose: the CSI callback sink. The radio driver invokes it once per
//! measurement on its own event-processing path; the sink validates the
//! record, formats one output line, and writes it to the transport.
//!
//! Rules on this path:
//! - Never block and never allocate; the line buffer is owned and fixed-size.
//! - Never return an error to the driver. The driver has no recovery path,
//!   so a transport failure is counted and the call returns normally.
//! - Never retain the record past the call; the borrow makes that impossible.
//!
//! The driver serializes invocations (platform contract), so the sink carries
//! no internal locking.

use crate::csi::CsiRecord;
use crate::format::{format_record, LineBuf};
use crate::stats::CaptureStats;

/// The transport rejected a line. Transient by assumption; the sink drops the
/// record and moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteError;

/// Output transport seam for the sink.
///
/// `write_line` receives one complete, newline-terminated line and must write
/// it whole or fail; the sink never retries.
pub trait RecordWriter {
    fn write_line(&mut self, line: &[u8]) -> Result<(), WriteError>;
}

/// Per-measurement sink: validate, format, write, account.
pub struct CsiSink<W> {
    writer: W,
    line: LineBuf,
    stats: &'static CaptureStats,
}

impl<W: RecordWriter> CsiSink<W> {
    pub fn new(writer: W, stats: &'static CaptureStats) -> Self {
        Self {
            writer,
            line: LineBuf::new(),
            stats,
        }
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Handle one measurement. Infallible by contract: every failure mode is
    /// absorbed into the counters.
    pub fn on_record(&mut self, record: &CsiRecord<'_>) {
        self.stats.record_received();

        if !record.is_valid() {
            // Empty records are expected at link edges. Not an error.
            self.stats.record_discarded();
            return;
        }

        if !format_record(record.rssi, record.samples, &mut self.line) {
            self.stats.record_truncated();
            return;
        }

        match self.writer.write_line(self.line.as_bytes()) {
            Ok(()) => self.stats.record_emitted(),
            Err(WriteError) => self.stats.record_write_failure(),
        }
    }
}
