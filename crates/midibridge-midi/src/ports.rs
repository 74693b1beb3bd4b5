use midir::MidiOutput;

use crate::error::Result;

/// Enumerate MIDI output ports visible on this host.
///
/// Diagnostic helper: the bridge itself only ever creates a virtual port,
/// but `doctor` uses this to prove the MIDI backend initializes and to show
/// what else is on the bus.
pub fn list_output_ports(client_name: &str) -> Result<Vec<String>> {
    let midi_out = MidiOutput::new(client_name)?;
    let names = midi_out
        .ports()
        .iter()
        .enumerate()
        .map(|(index, port)| {
            midi_out
                .port_name(port)
                .unwrap_or_else(|_| format!("unknown port {index}"))
        })
        .collect();
    Ok(names)
}
