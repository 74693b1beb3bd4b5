//! The bridge run loop: serial frames in, MIDI messages out.
//!
//! Single-threaded, blocking, synchronous. The acquisition call is the only
//! suspension point and is bounded by the transport's read timeout, so the
//! loop always regains control and observes cancellation at the next
//! iteration boundary. Messages reach the sink in strict frame-arrival
//! order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use midibridge_midi::{MidiSink, MidiSinkError};
use midibridge_serial::{SerialError, SerialLink};
use midibridge_wire::{
    category_name, classify, Disposition, FrameError, FrameReader, ReadOutcome, FRAME_LEN,
};

/// A byte-supplying handle the bridge pulls fixed-width frames from.
pub trait FrameSource {
    /// Read the next frame, bounded by the configured read timeout.
    fn read_frame(&mut self) -> Result<ReadOutcome, FrameError>;

    /// Release the acquisition resource. Idempotent.
    fn close(&mut self) -> Result<(), FrameError>;
}

impl FrameSource for FrameReader<SerialLink> {
    fn read_frame(&mut self) -> Result<ReadOutcome, FrameError> {
        FrameReader::read_frame(self)
    }

    fn close(&mut self) -> Result<(), FrameError> {
        self.get_mut().close().map_err(serial_to_frame_error)
    }
}

fn serial_to_frame_error(err: SerialError) -> FrameError {
    match err {
        SerialError::Io(io) => FrameError::Io(io),
        other => FrameError::Io(std::io::Error::other(other.to_string())),
    }
}

/// Counters for one bridge run, reported at shutdown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BridgeStats {
    /// Frames forwarded to the sink.
    pub forwarded: u64,
    /// Frames dropped because their category is a 2-byte MIDI message.
    pub unsupported: u64,
    /// Frames dropped because their status category is unrecognized.
    pub unknown: u64,
    /// Reads that returned a partial frame before the timeout.
    pub short_reads: u64,
    /// Reads that returned nothing within the timeout.
    pub timeouts: u64,
}

/// Fatal bridge failures. Transient read shortfalls and malformed frames
/// never surface here; they are absorbed by the loop.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The frame source failed (device I/O error or link closed).
    #[error("frame acquisition failed: {0}")]
    Source(#[from] FrameError),

    /// The MIDI sink failed to transmit.
    #[error("MIDI emission failed: {0}")]
    Sink(#[from] MidiSinkError),
}

/// Wires a [`FrameSource`] to a [`MidiSink`] until cancelled.
///
/// Both handles are owned exclusively by the bridge for its lifetime and
/// released exactly once when [`run`](Bridge::run) returns: sink first,
/// then source, each release failure logged and tolerated independently.
pub struct Bridge<F, S> {
    source: F,
    sink: S,
    running: Arc<AtomicBool>,
    stats: BridgeStats,
}

impl<F: FrameSource, S: MidiSink> Bridge<F, S> {
    /// Build a bridge. `running` is the cooperative cancellation flag:
    /// clearing it stops the loop at the next iteration boundary.
    pub fn new(source: F, sink: S, running: Arc<AtomicBool>) -> Self {
        Self {
            source,
            sink,
            running,
            stats: BridgeStats::default(),
        }
    }

    /// Run until the cancellation flag clears or a fatal error occurs.
    ///
    /// Returns the run's counters on clean shutdown. Resources are released
    /// on every exit path, including the error path.
    pub fn run(mut self) -> Result<BridgeStats, BridgeError> {
        let result = self.pump();
        self.release();
        result.map(|()| self.stats)
    }

    fn pump(&mut self) -> Result<(), BridgeError> {
        info!("bridge running");

        while self.running.load(Ordering::SeqCst) {
            match self.source.read_frame()? {
                ReadOutcome::Frame(frame) => self.dispatch(frame)?,
                ReadOutcome::Short(received) => {
                    self.stats.short_reads += 1;
                    trace!(received, "short read, partial frame discarded");
                }
                ReadOutcome::TimedOut => {
                    self.stats.timeouts += 1;
                }
            }
        }

        info!("cancellation observed, shutting down");
        Ok(())
    }

    fn dispatch(&mut self, frame: [u8; FRAME_LEN]) -> Result<(), BridgeError> {
        match classify(frame) {
            Disposition::Forward(message) => {
                self.sink.send(&message)?;
                self.stats.forwarded += 1;
                debug!(%message, "forwarded");
            }
            Disposition::Unsupported { status } => {
                self.stats.unsupported += 1;
                trace!(
                    status,
                    category = category_name(status),
                    "dropped 2-byte message category"
                );
            }
            Disposition::Unknown { status } => {
                self.stats.unknown += 1;
                trace!(status, "dropped unrecognized status");
            }
        }
        Ok(())
    }

    fn release(&mut self) {
        // Sink first, then transport. A sink failure must not prevent the
        // transport release.
        if let Err(err) = self.sink.close() {
            warn!(%err, "failed to close MIDI sink");
        }
        if let Err(err) = self.source.close() {
            warn!(%err, "failed to close frame source");
        }
    }
}
