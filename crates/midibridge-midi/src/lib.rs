//! Virtual MIDI output sink.
//!
//! Exposes the bridge to the host as a software-only MIDI source: other
//! MIDI-aware applications subscribe to the virtual port and observe every
//! forwarded message. The [`MidiSink`] trait is the seam the bridge loop
//! sends through, so tests can substitute a recording sink.

pub mod error;
pub mod ports;
pub mod sink;
pub mod virtual_out;

pub use error::{MidiSinkError, Result};
pub use ports::list_output_ports;
pub use sink::MidiSink;
pub use virtual_out::VirtualMidiOut;
