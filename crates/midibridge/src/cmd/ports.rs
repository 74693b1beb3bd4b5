use midibridge_serial::list_ports;

use crate::cmd::PortsArgs;
use crate::exit::{serial_error, CliResult, SUCCESS};
use crate::output::{print_ports, OutputFormat};

pub fn run(_args: PortsArgs, format: OutputFormat) -> CliResult<i32> {
    let ports = list_ports().map_err(|err| serial_error("port enumeration failed", err))?;
    print_ports(&ports, format);
    Ok(SUCCESS)
}
