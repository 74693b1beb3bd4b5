use midir::{MidiOutput, MidiOutputConnection};
use tracing::{debug, info};

use midibridge_wire::MidiMessage;

use crate::error::{MidiSinkError, Result};
use crate::sink::MidiSink;

/// A virtual MIDI output port backed by the platform MIDI backend
/// (ALSA on Linux, CoreMIDI on macOS).
///
/// Owned exclusively by the bridge loop and released exactly once via
/// [`close`](MidiSink::close) (or `Drop`).
pub struct VirtualMidiOut {
    conn: Option<MidiOutputConnection>,
    port_name: String,
}

impl VirtualMidiOut {
    /// Create a virtual output port that other applications can subscribe to.
    ///
    /// `client_name` identifies the backend client; `port_name` is the
    /// display name subscribers see.
    #[cfg(unix)]
    pub fn create(client_name: &str, port_name: &str) -> Result<Self> {
        use midir::os::unix::VirtualOutput;

        let midi_out = MidiOutput::new(client_name)?;
        let conn = midi_out
            .create_virtual(port_name)
            .map_err(|err| MidiSinkError::Connect {
                name: port_name.to_string(),
                reason: err.to_string(),
            })?;

        info!(client = client_name, port = port_name, "created virtual MIDI output port");

        Ok(Self {
            conn: Some(conn),
            port_name: port_name.to_string(),
        })
    }

    /// Virtual ports are a Unix-backend concept; Windows MM has no
    /// equivalent, so creation fails cleanly there.
    #[cfg(not(unix))]
    pub fn create(_client_name: &str, _port_name: &str) -> Result<Self> {
        Err(MidiSinkError::VirtualUnsupported)
    }

    /// The display name of the virtual port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl MidiSink for VirtualMidiOut {
    fn send(&mut self, message: &MidiMessage) -> Result<()> {
        match &mut self.conn {
            Some(conn) => {
                conn.send(&message.to_bytes())?;
                Ok(())
            }
            None => Err(MidiSinkError::Closed),
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close();
            debug!(port = %self.port_name, "closed virtual MIDI output port");
        }
        Ok(())
    }
}

impl std::fmt::Debug for VirtualMidiOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualMidiOut")
            .field("port", &self.port_name)
            .field("open", &self.conn.is_some())
            .finish()
    }
}
