//! Module: platform::console
//!
//! Purpose: serial console transport for CSI lines. Writes go to stdout,
//! which ESP-IDF routes to the UART console; each line is flushed so offline
//! consumers see complete records without waiting for buffer pressure.

use std::io::Write;

use crate::sink::{RecordWriter, WriteError};

/// `RecordWriter` over the UART console.
pub struct ConsoleWriter;

impl ConsoleWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordWriter for ConsoleWriter {
    fn write_line(&mut self, line: &[u8]) -> Result<(), WriteError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(line)
            .and_then(|()| stdout.flush())
            .map_err(|_| WriteError)
    }
}
