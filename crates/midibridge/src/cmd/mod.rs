use clap::{Args, Subcommand};

use midibridge_serial::SerialLink;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod doctor;
pub mod ports;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bridge a serial port to a virtual MIDI output port.
    Run(RunArgs),
    /// List available serial ports.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Serial port to bridge (e.g. /dev/ttyACM0).
    pub port: String,
    /// Serial bit rate.
    #[arg(long, short = 'b', default_value_t = SerialLink::DEFAULT_BAUD)]
    pub baud: u32,
    /// Virtual MIDI port display name.
    #[arg(long, short = 'n', default_value = "serial-midi")]
    pub name: String,
    /// Serial read timeout (e.g. 1s, 500ms).
    #[arg(long, default_value = "1s")]
    pub read_timeout: String,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}
