//! Federate entry point: CLI wiring and config-driven session construction.

use std::path::Path;
use std::process;

use windfarm_federate::config::FederateConfig;
use windfarm_federate::io::export::export_csv;
use windfarm_federate::report::RunReport;
use windfarm_federate::runtime::{InProcessRuntime, WindProfile};
use windfarm_federate::session::FederateSession;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    horizon_override: Option<f64>,
    telemetry_out: Option<String>,
    quiet: bool,
}

fn print_help() {
    eprintln!("windfarm-federate — wind-farm co-simulation federate");
    eprintln!();
    eprintln!("Usage: windfarm-federate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load configuration from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, gusty)");
    eprintln!("  --horizon <f64>          Override the simulation horizon in seconds");
    eprintln!("  --telemetry-out <path>   Export step records to CSV");
    eprintln!("  --quiet                  Suppress per-step log lines");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        horizon_override: None,
        telemetry_out: None,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--horizon" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --horizon requires a seconds argument");
                    process::exit(1);
                }
                if let Ok(h) = args[i].parse::<f64>() {
                    cli.horizon_override = Some(h);
                } else {
                    eprintln!("error: --horizon value \"{}\" is not a valid f64", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            "--quiet" => {
                cli.quiet = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --config takes priority, then --preset, then baseline
    let mut config = if let Some(ref path) = cli.config_path {
        match FederateConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match FederateConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        FederateConfig::baseline()
    };

    // Apply horizon override
    if let Some(h) = cli.horizon_override {
        config.federation.horizon_s = h;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build the in-process runtime from the control-center profile
    let profile = WindProfile {
        speed_m_s: config.control_center.wind_speed_m_s,
        direction_deg: config.control_center.wind_direction_deg,
        speed_ramp_m_s: config.control_center.speed_ramp_m_s_per_step,
        direction_ramp_deg: config.control_center.direction_ramp_deg_per_step,
    };
    let runtime = InProcessRuntime::new(
        &config.federation.core_type,
        &config.federation.core_init,
        profile,
    );

    // Run the federate to the horizon
    let mut session = FederateSession::new(runtime, &config);
    let records = match session.run() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    // Print per-step records
    if !cli.quiet {
        for r in &records {
            println!("{r}");
        }
    }

    // Print the run report
    let report = RunReport::from_records(&records, config.federation.time_delta_s);
    println!("\n{report}");

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
