use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use midibridge::bridge::Bridge;
use midibridge_midi::VirtualMidiOut;
use midibridge_serial::{list_ports, SerialLink};
use midibridge_wire::FrameReader;

use crate::cmd::RunArgs;
use crate::exit::{
    bridge_error, midi_error, serial_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE,
};

/// MIDI backend client name; the virtual port name comes from `--name`.
const CLIENT_NAME: &str = "midibridge";

pub fn run(args: RunArgs) -> CliResult<i32> {
    let read_timeout = parse_duration(&args.read_timeout)?;

    let link = match SerialLink::open(&args.port, args.baud, read_timeout) {
        Ok(link) => link,
        Err(err) => {
            print_available_ports();
            return Err(serial_error("serial open failed", err));
        }
    };

    let sink = VirtualMidiOut::create(CLIENT_NAME, &args.name)
        .map_err(|err| midi_error("virtual MIDI port creation failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    info!(
        port = %args.port,
        baud = args.baud,
        name = %args.name,
        "bridging serial to virtual MIDI, press Ctrl+C to quit"
    );

    let stats = Bridge::new(FrameReader::new(link), sink, running)
        .run()
        .map_err(|err| bridge_error("bridge failed", err))?;

    info!(
        forwarded = stats.forwarded,
        unsupported = stats.unsupported,
        unknown = stats.unknown,
        short_reads = stats.short_reads,
        timeouts = stats.timeouts,
        "bridge stopped"
    );

    Ok(SUCCESS)
}

/// On open failure, show the operator what does exist before exiting.
fn print_available_ports() {
    match list_ports() {
        Ok(ports) if ports.is_empty() => eprintln!("No serial ports found."),
        Ok(ports) => {
            eprintln!("Available serial ports:");
            for port in &ports {
                eprintln!("  {}  -  {}", port.name, port.description);
            }
        }
        Err(_) => {}
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}
