use std::io::{ErrorKind, Read};

use crate::classify::FRAME_LEN;
use crate::error::{FrameError, Result};

/// Outcome of one fixed-width read attempt.
///
/// Timeouts and short reads are values, not errors: the system assumes the
/// sender emits complete frames faster than the read timeout, so a short
/// read means "nothing meaningful arrived yet". Whatever bytes did arrive
/// are discarded; there is no partial accumulation across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete frame arrived within the timeout.
    Frame([u8; FRAME_LEN]),
    /// Some bytes arrived, then the timeout elapsed. The count is reported
    /// for diagnostics; the bytes themselves are gone.
    Short(usize),
    /// Nothing arrived within the timeout.
    TimedOut,
}

/// Reads fixed 3-byte frames from any `Read` stream.
///
/// The underlying stream is expected to enforce a read timeout (serial ports
/// do; see `SerialLink`). The reader holds no buffer between calls: each
/// call starts a fresh frame.
pub struct FrameReader<T> {
    inner: T,
}

impl<T: Read> FrameReader<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Read the next frame (blocking, bounded by the stream's read timeout).
    ///
    /// Returns `Err(FrameError::LinkClosed)` when EOF is reached.
    pub fn read_frame(&mut self) -> Result<ReadOutcome> {
        let mut frame = [0u8; FRAME_LEN];
        let mut filled = 0usize;

        while filled < FRAME_LEN {
            match self.inner.read(&mut frame[filled..]) {
                Ok(0) => return Err(FrameError::LinkClosed),
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err)
                    if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) =>
                {
                    return Ok(if filled == 0 {
                        ReadOutcome::TimedOut
                    } else {
                        ReadOutcome::Short(filled)
                    });
                }
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        Ok(ReadOutcome::Frame(frame))
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
