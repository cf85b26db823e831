//! Command execution.
//!
//! Each command drives a [`PluginSession`] the way the installer does, so the
//! binary exercises the same boundary and status mapping.

#![cfg_attr(not(windows), allow(dead_code))]

use std::collections::BTreeSet;
use std::io::Write;

use thiserror::Error;

use driverlogic::config::Command;
use driverlogic::driver::AdapterError;
use driverlogic::network::{AdapterRecord, AliasLookup, DeviceManager};
use driverlogic::plugin::{FailureStatus, PluginSession, RemovalStatus, Reply, Status};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Enumerating adapters failed.
    #[error("Failed to list adapters: {0}")]
    Adapter(#[from] AdapterError),

    /// A boundary call returned a failure status.
    #[error("{operation} failed with status {code}: {message}")]
    Operation {
        /// Name of the boundary call
        operation: &'static str,
        /// Numeric status returned
        code: i32,
        /// Diagnostic message returned
        message: String,
    },

    /// Serializing the adapter list failed.
    #[error("Failed to serialize adapters: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// The platform has no TAP driver support.
    #[cfg_attr(windows, allow(dead_code))]
    #[error("TAP adapters can only be managed on Windows")]
    UnsupportedPlatform,
}

/// Successful command result, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command completed.
    Completed,
    /// The deprecated adapter was removed but others of its driver remain.
    SomeRemaining,
}

/// Runs `command` against `session`, writing results to `out`.
///
/// # Errors
///
/// Returns [`RunError`] if a boundary call fails or output cannot be written.
pub fn execute<M, A, W>(
    command: &Command,
    session: &mut PluginSession<M, A>,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    M: DeviceManager,
    A: AliasLookup,
    W: Write,
{
    match command {
        // Handled before configuration is loaded
        Command::Init { .. } => Ok(Outcome::Completed),
        Command::List { deprecated, json } => list(session, *deprecated, *json, out),
        Command::FindAdded => find_added(session, out),
        Command::RemoveDeprecated => remove_deprecated(session, out),
    }
}

fn list<M, A, W>(
    session: &PluginSession<M, A>,
    deprecated: bool,
    json: bool,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    M: DeviceManager,
    A: AliasLookup,
    W: Write,
{
    let config = session.logic().config();
    let hardware_id = if deprecated {
        &config.deprecated_hardware_id
    } else {
        &config.hardware_id
    };

    let adapters = session.logic().adapters(hardware_id)?;
    tracing::debug!(hardware_id, count = adapters.len(), "Adapters enumerated");

    writeln!(out, "{}", render_adapters(&adapters, hardware_id, json)?)?;
    Ok(Outcome::Completed)
}

fn find_added<M, A, W>(session: &mut PluginSession<M, A>, out: &mut W) -> Result<Outcome, RunError>
where
    M: DeviceManager,
    A: AliasLookup,
    W: Write,
{
    let init = session.initialize();
    let reply = if init.status == Status::Success {
        session.find_added_adapter()
    } else {
        init
    };
    session.deinitialize();

    let alias = expect_status(reply, Status::Success, "FindAddedAdapter")?;
    writeln!(out, "{alias}")?;
    Ok(Outcome::Completed)
}

fn remove_deprecated<M, A, W>(
    session: &PluginSession<M, A>,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    M: DeviceManager,
    A: AliasLookup,
    W: Write,
{
    let reply = session.remove_deprecated_adapter();

    match reply.status {
        RemovalStatus::SuccessNoRemaining => {
            writeln!(out, "Deprecated adapter removed, none remaining")?;
            Ok(Outcome::Completed)
        }
        RemovalStatus::SuccessSomeRemaining => {
            writeln!(out, "Deprecated adapter removed, others remain")?;
            Ok(Outcome::SomeRemaining)
        }
        RemovalStatus::GeneralError => Err(operation_error("RemoveDeprecatedAdapter", reply)),
    }
}

/// Formats adapters as JSON or one line per adapter.
///
/// # Errors
///
/// Returns [`RunError::Serialize`] if JSON serialization fails.
pub fn render_adapters(
    adapters: &BTreeSet<AdapterRecord>,
    hardware_id: &str,
    json: bool,
) -> Result<String, RunError> {
    if json {
        return Ok(serde_json::to_string_pretty(adapters)?);
    }

    if adapters.is_empty() {
        return Ok(format!("No adapters with hardware id '{hardware_id}'"));
    }

    Ok(adapters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn expect_status(
    reply: Reply<Status>,
    expected: Status,
    operation: &'static str,
) -> Result<String, RunError> {
    if reply.status == expected {
        Ok(reply.message)
    } else {
        Err(operation_error(operation, reply))
    }
}

fn operation_error<S: FailureStatus>(operation: &'static str, reply: Reply<S>) -> RunError {
    RunError::Operation {
        operation,
        code: reply.status.code(),
        message: reply.message,
    }
}
