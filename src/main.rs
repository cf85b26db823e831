//! driverlogic: TAP adapter maintenance
//!
//! Entry point for the driverlogic application.

use driverlogic::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::{Outcome, RunError};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let command = cli.command.unwrap_or(Command::List {
        deprecated: false,
        json: false,
    });

    match run_command(&config, &command) {
        Ok(Outcome::Completed) => exit_code::SUCCESS,
        Ok(Outcome::SomeRemaining) => exit_code::some_remaining(),
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs a command against the Windows device stack.
#[cfg(windows)]
fn run_command(config: &ValidatedConfig, command: &Command) -> Result<Outcome, RunError> {
    use driverlogic::driver::DriverLogic;
    use driverlogic::network::platform::{PlatformAliases, PlatformDevices};
    use driverlogic::plugin::PluginSession;

    let logic = DriverLogic::new(
        PlatformDevices::new(),
        PlatformAliases::new(),
        config.driver.clone(),
    );
    let mut session = PluginSession::new(logic);

    run::execute(command, &mut session, &mut std::io::stdout().lock())
}

#[cfg(not(windows))]
fn run_command(config: &ValidatedConfig, command: &Command) -> Result<Outcome, RunError> {
    let _ = (config, command);
    Err(RunError::UnsupportedPlatform)
}
