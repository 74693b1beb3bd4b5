//! End-to-end run-loop behavior against scripted sources and recording sinks.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use midibridge::bridge::{Bridge, BridgeError, FrameSource};
use midibridge_midi::{MidiSink, MidiSinkError};
use midibridge_wire::{FrameError, MidiMessage, ReadOutcome};

type ReleaseLog = Arc<Mutex<Vec<&'static str>>>;

/// Replays a fixed script of read outcomes, then clears the running flag so
/// the loop observes cancellation instead of spinning on timeouts.
struct ScriptedSource {
    script: VecDeque<Result<ReadOutcome, FrameError>>,
    running: Arc<AtomicBool>,
    releases: ReleaseLog,
}

impl ScriptedSource {
    fn new(
        script: Vec<Result<ReadOutcome, FrameError>>,
        running: Arc<AtomicBool>,
        releases: ReleaseLog,
    ) -> Self {
        Self {
            script: script.into(),
            running,
            releases,
        }
    }
}

impl FrameSource for ScriptedSource {
    fn read_frame(&mut self) -> Result<ReadOutcome, FrameError> {
        match self.script.pop_front() {
            Some(outcome) => outcome,
            None => {
                self.running.store(false, Ordering::SeqCst);
                Ok(ReadOutcome::TimedOut)
            }
        }
    }

    fn close(&mut self) -> Result<(), FrameError> {
        self.releases.lock().expect("lock poisoned").push("source");
        Ok(())
    }
}

struct RecordingSink {
    sent: Vec<MidiMessage>,
    releases: ReleaseLog,
    fail_send: bool,
    fail_close: bool,
}

impl RecordingSink {
    fn new(releases: ReleaseLog) -> Self {
        Self {
            sent: Vec::new(),
            releases,
            fail_send: false,
            fail_close: false,
        }
    }
}

impl MidiSink for RecordingSink {
    fn send(&mut self, message: &MidiMessage) -> Result<(), MidiSinkError> {
        if self.fail_send {
            return Err(MidiSinkError::Closed);
        }
        self.sent.push(*message);
        Ok(())
    }

    fn close(&mut self) -> Result<(), MidiSinkError> {
        self.releases.lock().expect("lock poisoned").push("sink");
        if self.fail_close {
            return Err(MidiSinkError::Closed);
        }
        Ok(())
    }
}

fn frame(bytes: [u8; 3]) -> Result<ReadOutcome, FrameError> {
    Ok(ReadOutcome::Frame(bytes))
}

#[test]
fn forwards_channel_voice_frames_in_arrival_order() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(
        vec![
            frame([0x90, 0x3C, 0x7F]),
            frame([0xB0, 0x07, 0x64]),
            frame([0x80, 0x3C, 0x00]),
        ],
        running.clone(),
        releases.clone(),
    );
    let sink = RecordingSink::new(releases);

    let stats = Bridge::new(source, sink, running)
        .run()
        .expect("clean run should succeed");

    assert_eq!(stats.forwarded, 3);
    assert_eq!(stats.unsupported, 0);
    assert_eq!(stats.unknown, 0);
}

#[test]
fn recorded_messages_carry_masked_data_bytes() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(
        vec![frame([0x92, 0xFF, 0x80])],
        running.clone(),
        releases.clone(),
    );

    // Drive the sink directly through a shared cell so we can inspect the
    // messages after the bridge consumes it.
    struct SharedSink(Arc<Mutex<Vec<MidiMessage>>>, ReleaseLog);
    impl MidiSink for SharedSink {
        fn send(&mut self, message: &MidiMessage) -> Result<(), MidiSinkError> {
            self.0.lock().expect("lock poisoned").push(*message);
            Ok(())
        }
        fn close(&mut self) -> Result<(), MidiSinkError> {
            self.1.lock().expect("lock poisoned").push("sink");
            Ok(())
        }
    }

    let sent: Arc<Mutex<Vec<MidiMessage>>> = Arc::default();
    let sink = SharedSink(sent.clone(), releases);

    Bridge::new(source, sink, running)
        .run()
        .expect("clean run should succeed");

    let sent = sent.lock().expect("lock poisoned");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to_bytes(), [0x92, 0x7F, 0x00]);
}

#[test]
fn drops_two_byte_and_unrecognized_categories() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(
        vec![
            frame([0xC0, 0x05, 0x00]), // program change
            frame([0xD3, 0x40, 0x00]), // channel pressure
            frame([0xF8, 0x00, 0x00]), // system realtime
            frame([0x41, 0x42, 0x43]), // ASCII noise
            frame([0x90, 0x3C, 0x7F]),
        ],
        running.clone(),
        releases.clone(),
    );
    let sink = RecordingSink::new(releases);

    let stats = Bridge::new(source, sink, running)
        .run()
        .expect("clean run should succeed");

    assert_eq!(stats.forwarded, 1);
    assert_eq!(stats.unsupported, 2);
    assert_eq!(stats.unknown, 2);
}

#[test]
fn counts_short_reads_and_timeouts_without_failing() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(
        vec![
            Ok(ReadOutcome::Short(1)),
            Ok(ReadOutcome::TimedOut),
            Ok(ReadOutcome::Short(2)),
            frame([0xE0, 0x00, 0x40]),
        ],
        running.clone(),
        releases.clone(),
    );
    let sink = RecordingSink::new(releases);

    let stats = Bridge::new(source, sink, running)
        .run()
        .expect("transient shortfalls should be absorbed");

    assert_eq!(stats.forwarded, 1);
    assert_eq!(stats.short_reads, 2);
    // The scripted source reports one extra timeout while clearing the flag.
    assert_eq!(stats.timeouts, 2);
}

#[test]
fn releases_sink_before_source_on_clean_shutdown() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(vec![], running.clone(), releases.clone());
    let sink = RecordingSink::new(releases.clone());

    Bridge::new(source, sink, running)
        .run()
        .expect("clean run should succeed");

    assert_eq!(*releases.lock().expect("lock poisoned"), vec!["sink", "source"]);
}

#[test]
fn source_error_surfaces_after_releasing_both_handles() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(
        vec![frame([0x90, 0x3C, 0x7F]), Err(FrameError::LinkClosed)],
        running.clone(),
        releases.clone(),
    );
    let sink = RecordingSink::new(releases.clone());

    let err = Bridge::new(source, sink, running)
        .run()
        .expect_err("link closure should be fatal");

    assert!(matches!(err, BridgeError::Source(FrameError::LinkClosed)));
    assert_eq!(*releases.lock().expect("lock poisoned"), vec!["sink", "source"]);
}

#[test]
fn sink_error_surfaces_after_releasing_both_handles() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(
        vec![frame([0x90, 0x3C, 0x7F])],
        running.clone(),
        releases.clone(),
    );
    let mut sink = RecordingSink::new(releases.clone());
    sink.fail_send = true;

    let err = Bridge::new(source, sink, running)
        .run()
        .expect_err("send failure should be fatal");

    assert!(matches!(err, BridgeError::Sink(_)));
    assert_eq!(*releases.lock().expect("lock poisoned"), vec!["sink", "source"]);
}

#[test]
fn sink_close_failure_does_not_block_source_release() {
    let running = Arc::new(AtomicBool::new(true));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(vec![], running.clone(), releases.clone());
    let mut sink = RecordingSink::new(releases.clone());
    sink.fail_close = true;

    Bridge::new(source, sink, running)
        .run()
        .expect("release failures are tolerated");

    assert_eq!(*releases.lock().expect("lock poisoned"), vec!["sink", "source"]);
}

#[test]
fn cleared_flag_stops_the_loop_before_any_read() {
    let running = Arc::new(AtomicBool::new(false));
    let releases: ReleaseLog = Arc::default();
    let source = ScriptedSource::new(
        vec![frame([0x90, 0x3C, 0x7F])],
        running.clone(),
        releases.clone(),
    );
    let sink = RecordingSink::new(releases);

    let stats = Bridge::new(source, sink, running)
        .run()
        .expect("immediate cancellation is a clean run");

    assert_eq!(stats.forwarded, 0);
}
