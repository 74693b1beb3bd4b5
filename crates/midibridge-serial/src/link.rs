use std::io::Read;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, SerialError};

/// An open serial device, read side only.
///
/// The link is owned exclusively by the bridge loop for its lifetime and
/// released exactly once via [`close`](SerialLink::close) (or `Drop`).
/// Reads are bounded by the timeout configured at open time, so a caller
/// blocked in `read` always regains control.
pub struct SerialLink {
    inner: Option<Box<dyn serialport::SerialPort>>,
    port_name: String,
}

impl SerialLink {
    /// Default bit rate for hobbyist USB-serial devices.
    pub const DEFAULT_BAUD: u32 = 115_200;

    /// Default read timeout.
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

    /// CDC devices need a moment after the port opens before they emit.
    const SETTLE_DELAY: Duration = Duration::from_millis(200);

    /// Open and configure a serial port (blocking).
    pub fn open(port: &str, baud: u32, read_timeout: Duration) -> Result<Self> {
        let inner = serialport::new(port, baud)
            .timeout(read_timeout)
            .open()
            .map_err(|source| SerialError::Open {
                port: port.to_string(),
                source,
            })?;

        std::thread::sleep(Self::SETTLE_DELAY);
        info!(port, baud, ?read_timeout, "opened serial link");

        Ok(Self {
            inner: Some(inner),
            port_name: port.to_string(),
        })
    }

    /// Update the read timeout for subsequent reads.
    pub fn set_read_timeout(&mut self, timeout: Duration) -> Result<()> {
        match &mut self.inner {
            Some(port) => port
                .set_timeout(timeout)
                .map_err(|err| SerialError::Io(err.into())),
            None => Err(SerialError::Io(closed_error())),
        }
    }

    /// The device path this link was opened on.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Release the underlying device. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if let Some(port) = self.inner.take() {
            drop(port);
            debug!(port = %self.port_name, "closed serial link");
        }
        Ok(())
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            Some(port) => port.read(buf),
            None => Err(closed_error()),
        }
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("port", &self.port_name)
            .field("open", &self.inner.is_some())
            .finish()
    }
}

fn closed_error() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::NotConnected, "serial link closed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_nonexistent_port_reports_the_path() {
        let err = SerialLink::open("/dev/does-not-exist-9999", 115_200, Duration::from_secs(1))
            .unwrap_err();
        match err {
            SerialError::Open { port, .. } => assert_eq!(port, "/dev/does-not-exist-9999"),
            other => panic!("expected open error, got {other}"),
        }
    }
}
