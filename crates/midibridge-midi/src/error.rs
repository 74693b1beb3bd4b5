/// Errors that can occur in MIDI sink operations.
#[derive(Debug, thiserror::Error)]
pub enum MidiSinkError {
    /// Failed to initialize the platform MIDI backend.
    #[error("failed to initialize MIDI backend: {0}")]
    Init(#[from] midir::InitError),

    /// Failed to create the virtual output port.
    #[error("failed to create virtual MIDI port {name}: {reason}")]
    Connect { name: String, reason: String },

    /// Failed to transmit a message to port subscribers.
    #[error("failed to send MIDI message: {0}")]
    Send(#[from] midir::SendError),

    /// The platform MIDI backend cannot expose virtual ports.
    #[error("virtual MIDI ports are not supported on this platform")]
    VirtualUnsupported,

    /// The sink has already been released.
    #[error("MIDI sink closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, MidiSinkError>;
