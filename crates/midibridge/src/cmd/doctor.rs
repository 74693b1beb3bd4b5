use serde::Serialize;

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Warn,
    Info,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        serial_enumeration_check(),
        midi_backend_check(),
        virtual_port_support_check(),
        build_metadata_check(),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput { checks, overall };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("midibridge doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<22} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Warn => "WARN",
        CheckStatus::Info => "INFO",
    }
}

fn serial_enumeration_check() -> CheckResult {
    match midibridge_serial::list_ports() {
        Ok(ports) if ports.is_empty() => CheckResult {
            name: "serial_enumeration".to_string(),
            status: CheckStatus::Warn,
            detail: "enumeration succeeded but no serial ports present".to_string(),
        },
        Ok(ports) => CheckResult {
            name: "serial_enumeration".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} serial port(s) visible", ports.len()),
        },
        Err(err) => CheckResult {
            name: "serial_enumeration".to_string(),
            status: CheckStatus::Fail,
            detail: format!("enumeration failed: {err}"),
        },
    }
}

fn midi_backend_check() -> CheckResult {
    match midibridge_midi::list_output_ports("midibridge-doctor") {
        Ok(ports) => CheckResult {
            name: "midi_backend".to_string(),
            status: CheckStatus::Pass,
            detail: format!("backend initialized, {} output port(s) visible", ports.len()),
        },
        Err(err) => CheckResult {
            name: "midi_backend".to_string(),
            status: CheckStatus::Fail,
            detail: format!("backend initialization failed: {err}"),
        },
    }
}

fn virtual_port_support_check() -> CheckResult {
    #[cfg(unix)]
    {
        CheckResult {
            name: "virtual_port_support".to_string(),
            status: CheckStatus::Pass,
            detail: "virtual MIDI output ports supported on this platform".to_string(),
        }
    }

    #[cfg(not(unix))]
    {
        // Windows MM has no client-created virtual ports; bridging there
        // needs a loopback driver, which we do not probe for.
        CheckResult {
            name: "virtual_port_support".to_string(),
            status: CheckStatus::Fail,
            detail: "virtual MIDI output ports unavailable on this platform".to_string(),
        }
    }
}

fn build_metadata_check() -> CheckResult {
    CheckResult {
        name: "build_metadata".to_string(),
        status: CheckStatus::Info,
        detail: format!(
            "version {} target {}",
            env!("CARGO_PKG_VERSION"),
            option_env!("MIDIBRIDGE_BUILD_TARGET").unwrap_or("unknown")
        ),
    }
}
