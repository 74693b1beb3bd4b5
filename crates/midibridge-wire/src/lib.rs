//! Fixed-width MIDI frame acquisition and Channel Voice classification.
//!
//! This is the core value-add layer of midibridge. The wire protocol is a
//! bare stream of 3-byte frames with no delimiter and no checksum:
//! - Byte 0: status (high nibble = message category, low nibble = channel)
//! - Bytes 1-2: data bytes (only the low 7 bits are significant)
//!
//! The translator is stateless and frame-synchronous: every frame is
//! classified independently, with no running status and no partial-frame
//! reassembly. A short read discards whatever arrived and the loop simply
//! tries again.
//!
//! Known limitation: there is no resynchronization to the next valid status
//! byte. A single dropped byte on the wire shifts framing until the sender
//! next pauses long enough to produce a short-read gap.

pub mod classify;
pub mod error;
pub mod message;
pub mod reader;
pub mod status;

pub use classify::{classify, Disposition, FRAME_LEN};
pub use error::{FrameError, Result};
pub use message::MidiMessage;
pub use reader::{FrameReader, ReadOutcome};
pub use status::{
    category, category_name, channel, is_channel_voice, is_two_byte, CHANNEL_AFTERTOUCH,
    CHANNEL_MASK, CONTROL_CHANGE, DATA_MASK, NOTE_OFF, NOTE_ON, PITCH_BEND, POLY_AFTERTOUCH,
    PROGRAM_CHANGE, STATUS_MASK,
};
