//! Module: format
//!
//! Purpose: CSI output line formatting. Pure and deterministic: identical
//! inputs always produce byte-identical lines.
//!
//! Line grammar, one line per valid measurement:
//!
//! ```text
//! CSI_DATA,<rssi>,[ <b0> <b1> ... <bN-1> ]\n
//! ```
//!
//! Exactly one space after `[`, before `]`, and between sample tokens; no
//! trailing space before `]`. Nothing else is ever emitted on this path.
//!
//! Safety: Safe. No unsafe blocks, no allocation; formatting writes into a
//! caller-owned fixed buffer.

use core::fmt::Write;

use crate::csi::MAX_CSI_SAMPLES;

/// Fixed capacity of one output line.
///
/// Worst case: `CSI_DATA,` + an 11-char rssi + `,[ ` + 612 samples at up to
/// 5 bytes each (`-128` plus separator) + ` ]\n`. Rounded up.
pub const LINE_CAPACITY: usize = 32 + MAX_CSI_SAMPLES * 5;

/// Fixed-size line buffer.
///
/// Writes past capacity are dropped and flagged as overflow instead of
/// panicking, so the hot path stays total. An overflowed line is never valid
/// output.
pub struct LineBuf {
    buf: [u8; LINE_CAPACITY],
    len: usize,
    overflow: bool,
}

impl LineBuf {
    pub const fn new() -> Self {
        Self {
            buf: [0; LINE_CAPACITY],
            len: 0,
            overflow: false,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.overflow = false;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn overflowed(&self) -> bool {
        self.overflow
    }
}

impl Default for LineBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for LineBuf {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = LINE_CAPACITY - self.len;
        if bytes.len() > remaining {
            self.overflow = true;
        }
        let to_write = bytes.len().min(remaining);
        self.buf[self.len..self.len + to_write].copy_from_slice(&bytes[..to_write]);
        self.len += to_write;
        Ok(())
    }
}

/// Format one measurement into `line`.
///
/// Returns `false` if the line did not fit; the buffer then holds a truncated
/// prefix and must not be written to the transport.
///
/// The formatter is total: an empty sample slice yields `CSI_DATA,<rssi>,[  ]`
/// (two spaces, no tokens). Record-validity filtering is the sink's job, not
/// the formatter's.
pub fn format_record(rssi: i32, samples: &[i8], line: &mut LineBuf) -> bool {
    line.clear();

    let _ = write!(line, "CSI_DATA,{},[ ", rssi);
    let mut first = true;
    for sample in samples {
        if first {
            first = false;
        } else {
            let _ = line.write_str(" ");
        }
        let _ = write!(line, "{}", sample);
    }
    let _ = line.write_str(" ]\n");

    !line.overflowed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_to_string(rssi: i32, samples: &[i8]) -> (bool, String) {
        let mut line = LineBuf::new();
        let ok = format_record(rssi, samples, &mut line);
        (ok, String::from_utf8(line.as_bytes().to_vec()).unwrap())
    }

    #[test]
    fn test_single_sample() {
        let (ok, line) = format_to_string(-70, &[42]);
        assert!(ok);
        assert_eq!(line, "CSI_DATA,-70,[ 42 ]\n");
    }

    #[test]
    fn test_extreme_sample_values() {
        let (ok, line) = format_to_string(0, &[i8::MIN, i8::MAX]);
        assert!(ok);
        assert_eq!(line, "CSI_DATA,0,[ -128 127 ]\n");
    }

    #[test]
    fn test_max_length_record_fits() {
        let samples = [i8::MIN; MAX_CSI_SAMPLES];
        let mut line = LineBuf::new();
        assert!(format_record(i32::MIN, &samples, &mut line));
        assert!(!line.overflowed());
    }

    #[test]
    fn test_linebuf_overflow_is_flagged_not_fatal() {
        let mut line = LineBuf::new();
        for _ in 0..LINE_CAPACITY {
            let _ = line.write_str("x");
        }
        assert!(!line.overflowed());
        let _ = line.write_str("y");
        assert!(line.overflowed());
        assert_eq!(line.as_bytes().len(), LINE_CAPACITY);
    }

    #[test]
    fn test_clear_resets_overflow() {
        let mut line = LineBuf::new();
        for _ in 0..=LINE_CAPACITY {
            let _ = line.write_str("x");
        }
        assert!(line.overflowed());
        line.clear();
        assert!(!line.overflowed());
        assert!(line.as_bytes().is_empty());
    }
}
