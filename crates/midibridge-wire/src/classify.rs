use crate::message::MidiMessage;
use crate::status::{
    category, CHANNEL_AFTERTOUCH, CONTROL_CHANGE, NOTE_OFF, NOTE_ON, PITCH_BEND, POLY_AFTERTOUCH,
    PROGRAM_CHANGE,
};

/// Every frame is exactly 3 bytes: status, data1, data2.
pub const FRAME_LEN: usize = 3;

/// Disposition of one validated 3-byte frame.
///
/// Classification is a pure function of the frame bytes; whether the dropped
/// variants produce diagnostic output is the caller's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// A supported Channel Voice message; forward it to the sink.
    Forward(MidiMessage),
    /// Program Change or Channel Aftertouch. These are genuinely 2-byte MIDI
    /// messages: fixed 3-byte framing cannot tell their trailing byte apart
    /// from the next frame's status byte, so they are dropped rather than
    /// forwarded corrupt.
    Unsupported { status: u8 },
    /// Any other status category: stray bytes, line noise, device reset
    /// banners. Expected under normal operation; dropped without error.
    Unknown { status: u8 },
}

/// Classify a 3-byte frame by its status category.
///
/// Frames in the five supported categories become a [`MidiMessage`] with both
/// data bytes masked to 7 bits. Everything else is dropped, silently as far
/// as this function is concerned.
pub fn classify(frame: [u8; FRAME_LEN]) -> Disposition {
    match category(frame[0]) {
        NOTE_OFF | NOTE_ON | POLY_AFTERTOUCH | CONTROL_CHANGE | PITCH_BEND => {
            Disposition::Forward(MidiMessage::from_frame(frame))
        }
        PROGRAM_CHANGE | CHANNEL_AFTERTOUCH => Disposition::Unsupported { status: frame[0] },
        _ => Disposition::Unknown { status: frame[0] },
    }
}
