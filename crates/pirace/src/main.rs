//! pirace - race pi series against each other from the terminal
//!
//! Starts the race controller service in a background thread and turns
//! stdin lines into control events on the main thread.
//!
//! ## Command line flags
//!
//! - `--config <path>`: config file (default: platform config dir)
//! - `--digits <n>`: initial digit target, overrides the config
//! - `--write-config`: save the effective configuration and continue

mod display;
mod input;

use anyhow::{bail, Context, Result};
use pirace_core::config::{default_config_path, load_config, save_config, RaceConfig};
use pirace_core::controller::{control_channel, RaceController};
use pirace_core::service::RaceService;
use std::path::PathBuf;

use display::TerminalDisplay;

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<PathBuf>,
    digits: Option<u32>,
    write_config: bool,
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self> {
        let mut options = CliOptions::default();
        let mut iter = args.iter().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => {
                    let path = iter.next().context("--config needs a path")?;
                    options.config_path = Some(PathBuf::from(path));
                }
                "--digits" => {
                    let value = iter.next().context("--digits needs a number")?;
                    let digits = value
                        .parse()
                        .with_context(|| format!("invalid digit target: {}", value))?;
                    options.digits = Some(digits);
                }
                "--write-config" => options.write_config = true,
                other => bail!("unknown argument: {}", other),
            }
        }

        Ok(options)
    }
}

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = CliOptions::parse(&args)?;

    let config_path = options.config_path.clone().unwrap_or_else(default_config_path);
    let mut config: RaceConfig = load_config(&config_path);
    if let Some(digits) = options.digits {
        config.digit_target = digits;
    }
    let config = config.sanitized();

    if options.write_config {
        save_config(&config, &config_path)?;
    }

    log::info!(
        "pirace starting: target {} digits, tick {}ms, yield every {} iterations",
        config.digit_target,
        config.tick_ms,
        config.yield_policy.interval()
    );

    let (mut control_tx, control_rx) = control_channel();
    let controller = RaceController::from_config(&config, control_rx);
    let display = TerminalDisplay::new(config.display.refresh_period());
    let service = RaceService::spawn(controller, Box::new(display), config.tick_period())?;

    input::run(std::io::stdin().lock(), &mut control_tx);

    service.join();
    log::info!("pirace stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("pirace")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(CliOptions::parse(&args(&[])).unwrap(), CliOptions::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let options = CliOptions::parse(&args(&[
            "--config",
            "/tmp/race.yaml",
            "--digits",
            "7",
            "--write-config",
        ]))
        .unwrap();
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/race.yaml")));
        assert_eq!(options.digits, Some(7));
        assert!(options.write_config);
    }

    #[test]
    fn test_parse_errors() {
        assert!(CliOptions::parse(&args(&["--digits"])).is_err());
        assert!(CliOptions::parse(&args(&["--digits", "many"])).is_err());
        assert!(CliOptions::parse(&args(&["--verbose"])).is_err());
    }
}
