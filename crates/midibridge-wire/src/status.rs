//! MIDI status-byte categories.
//!
//! The high nibble of a status byte identifies the message category; the low
//! nibble carries the channel number (0-15) and passes through unmodified.

/// Selects the category nibble of a status byte.
pub const STATUS_MASK: u8 = 0xF0;

/// Selects the channel nibble of a status byte.
pub const CHANNEL_MASK: u8 = 0x0F;

/// Valid range of a MIDI data byte is 7 bits; bit 7 is masked on receipt.
pub const DATA_MASK: u8 = 0x7F;

/// Note Off.
pub const NOTE_OFF: u8 = 0x80;

/// Note On.
pub const NOTE_ON: u8 = 0x90;

/// Polyphonic Aftertouch (key pressure).
pub const POLY_AFTERTOUCH: u8 = 0xA0;

/// Control Change.
pub const CONTROL_CHANGE: u8 = 0xB0;

/// Program Change. A 2-byte message; does not fit 3-byte framing.
pub const PROGRAM_CHANGE: u8 = 0xC0;

/// Channel Aftertouch. A 2-byte message; does not fit 3-byte framing.
pub const CHANNEL_AFTERTOUCH: u8 = 0xD0;

/// Pitch Bend.
pub const PITCH_BEND: u8 = 0xE0;

/// The message category of a status byte.
pub fn category(status: u8) -> u8 {
    status & STATUS_MASK
}

/// The channel number (0-15) of a status byte.
pub fn channel(status: u8) -> u8 {
    status & CHANNEL_MASK
}

/// Returns true if the category is a 3-byte Channel Voice message the bridge
/// forwards.
pub fn is_channel_voice(status: u8) -> bool {
    matches!(
        category(status),
        NOTE_OFF | NOTE_ON | POLY_AFTERTOUCH | CONTROL_CHANGE | PITCH_BEND
    )
}

/// Returns true if the category is a known 2-byte message (Program Change,
/// Channel Aftertouch).
pub fn is_two_byte(status: u8) -> bool {
    matches!(category(status), PROGRAM_CHANGE | CHANNEL_AFTERTOUCH)
}

/// Returns a human-readable name for a status byte's category.
pub fn category_name(status: u8) -> &'static str {
    match category(status) {
        NOTE_OFF => "NOTE_OFF",
        NOTE_ON => "NOTE_ON",
        POLY_AFTERTOUCH => "POLY_AFTERTOUCH",
        CONTROL_CHANGE => "CONTROL_CHANGE",
        PROGRAM_CHANGE => "PROGRAM_CHANGE",
        CHANNEL_AFTERTOUCH => "CHANNEL_AFTERTOUCH",
        PITCH_BEND => "PITCH_BEND",
        _ => "UNKNOWN",
    }
}
