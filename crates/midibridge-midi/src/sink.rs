use midibridge_wire::MidiMessage;

use crate::error::Result;

/// A destination for fully-formed MIDI messages.
///
/// Emission is fire-and-forget: one `send` per forwarded frame, no
/// acknowledgment, no delivery confirmation. Messages must reach
/// subscribers in send order.
pub trait MidiSink {
    /// Transmit one message to the sink's subscribers.
    fn send(&mut self, message: &MidiMessage) -> Result<()>;

    /// Release the sink resource. Idempotent.
    fn close(&mut self) -> Result<()>;
}
