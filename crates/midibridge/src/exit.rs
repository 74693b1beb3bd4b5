use std::fmt;
use std::io;

use midibridge_midi::MidiSinkError;
use midibridge_serial::SerialError;
use midibridge_wire::FrameError;

use midibridge::bridge::BridgeError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const SERIAL_ERROR: i32 = 3;
pub const MIDI_ERROR: i32 = 4;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => SERIAL_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn serial_error(context: &str, err: SerialError) -> CliError {
    match err {
        SerialError::Io(source) => io_error(context, source),
        SerialError::Open { ref source, .. } => {
            // Serial devices commonly fail with EACCES when the user is not
            // in the dialout/uucp group; surface that as its own code.
            let code = match source.kind {
                serialport::ErrorKind::Io(io::ErrorKind::PermissionDenied) => PERMISSION_DENIED,
                _ => SERIAL_ERROR,
            };
            CliError::new(code, format!("{context}: {err}"))
        }
        other => CliError::new(SERIAL_ERROR, format!("{context}: {other}")),
    }
}

pub fn midi_error(context: &str, err: MidiSinkError) -> CliError {
    CliError::new(MIDI_ERROR, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::LinkClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn bridge_error(context: &str, err: BridgeError) -> CliError {
    match err {
        BridgeError::Source(err) => frame_error(context, err),
        BridgeError::Sink(err) => midi_error(context, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_maps_to_its_own_code() {
        let err = io_error(
            "open failed",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }

    #[test]
    fn link_closed_maps_to_failure() {
        let err = frame_error("read failed", FrameError::LinkClosed);
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("read failed"));
    }

    #[test]
    fn sink_errors_map_to_midi_code() {
        let err = bridge_error("bridge failed", BridgeError::Sink(MidiSinkError::Closed));
        assert_eq!(err.code, MIDI_ERROR);
    }
}
