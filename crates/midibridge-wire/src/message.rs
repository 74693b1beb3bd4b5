use crate::classify::FRAME_LEN;
use crate::status::{self, DATA_MASK};

/// A complete 3-byte MIDI Channel Voice message, ready for a sink.
///
/// Only ever constructed from a frame whose status category is one of the
/// five supported Channel Voice categories. Data bytes are already masked to
/// 7 bits; the status byte is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiMessage {
    /// Status byte: high nibble = category, low nibble = channel.
    pub status: u8,
    /// First data byte, masked to 0-127.
    pub data1: u8,
    /// Second data byte, masked to 0-127.
    pub data2: u8,
}

impl MidiMessage {
    /// Build a message from a raw frame, masking both data bytes.
    ///
    /// Masking never rejects: a data byte with bit 7 set (e.g. 0xFF) is
    /// forwarded as its low 7 bits (0x7F).
    pub fn from_frame(frame: [u8; FRAME_LEN]) -> Self {
        Self {
            status: frame[0],
            data1: frame[1] & DATA_MASK,
            data2: frame[2] & DATA_MASK,
        }
    }

    /// The wire bytes of this message, in send order.
    pub fn to_bytes(self) -> [u8; FRAME_LEN] {
        [self.status, self.data1, self.data2]
    }

    /// The channel number (0-15).
    pub fn channel(self) -> u8 {
        status::channel(self.status)
    }

    /// The status category (high nibble, e.g. [`NOTE_ON`](crate::NOTE_ON)).
    pub fn category(self) -> u8 {
        status::category(self.status)
    }
}

impl std::fmt::Display for MidiMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ch={} data1={} data2={}",
            status::category_name(self.status),
            self.channel(),
            self.data1,
            self.data2
        )
    }
}
