/// Errors that can occur while acquiring frames from a byte stream.
///
/// Short and timed-out reads are deliberately *not* errors; they are
/// [`ReadOutcome`](crate::reader::ReadOutcome) variants, because they are the
/// dominant "failure" mode in normal operation and must never escalate.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An I/O error occurred on the underlying stream.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream reached EOF before a complete frame was received.
    #[error("link closed (EOF before a complete frame)")]
    LinkClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
