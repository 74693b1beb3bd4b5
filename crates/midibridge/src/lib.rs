//! Bridge a byte-oriented serial link to a virtual MIDI output port.
//!
//! A microcontroller emits raw 3-byte MIDI frames over USB-serial; this
//! crate presents them to the host as a virtual MIDI source any MIDI-aware
//! application can subscribe to.
//!
//! # Crate Structure
//!
//! - [`serial`]: serial transport (open, enumerate, timeout, release)
//! - [`wire`]: fixed 3-byte framing and Channel Voice classification
//! - [`midi`]: virtual MIDI output sink
//! - [`bridge`]: the run loop wiring source to sink with cooperative
//!   cancellation

pub mod bridge;

/// Re-export serial transport types.
pub mod serial {
    pub use midibridge_serial::*;
}

/// Re-export wire protocol types.
pub mod wire {
    pub use midibridge_wire::*;
}

/// Re-export MIDI sink types.
pub mod midi {
    pub use midibridge_midi::*;
}
