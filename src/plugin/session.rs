//! Installer-facing session holding the optional adapter context.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::driver::{AdapterError, DeletionResult, DriverContext, DriverLogic};
use crate::network::{AliasLookup, DeviceManager};

use super::status::{BaselineReplyStatus, FailureStatus, RemovalStatus, Reply, Status};

/// Message reported when a context-requiring call precedes `initialize`.
pub const NOT_INITIALIZED: &str = "Initialize() function was not called or was not successful";

/// Message reported for a failure that carries no description.
pub const UNSPECIFIED_ERROR: &str = "Unspecified error";

/// Boundary surface called by the installer.
///
/// Every call returns a [`Reply`]. Errors and panics never escape; they are
/// converted into a general failure status with a best-effort message.
///
/// The session owns the lifecycle context. It exists between a successful
/// [`initialize`](Self::initialize) and the next
/// [`deinitialize`](Self::deinitialize).
#[derive(Debug)]
pub struct PluginSession<M, A> {
    logic: DriverLogic<M, A>,
    context: Option<DriverContext>,
}

impl<M, A> PluginSession<M, A>
where
    M: DeviceManager,
    A: AliasLookup,
{
    /// Creates an uninitialized session.
    pub const fn new(logic: DriverLogic<M, A>) -> Self {
        Self {
            logic,
            context: None,
        }
    }

    /// Returns the driver logic used by this session.
    #[must_use]
    pub const fn logic(&self) -> &DriverLogic<M, A> {
        &self.logic
    }

    /// Returns true while a context exists.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// Creates the context. Calling it again while one exists is a no-op success.
    pub fn initialize(&mut self) -> Reply<Status> {
        guarded("initialize", || {
            if self.context.is_some() {
                tracing::debug!("Context already initialized, reusing it");
            } else {
                self.context = Some(DriverContext::new());
                tracing::debug!("Context created");
            }
            Reply::new(Status::Success)
        })
    }

    /// Returns the connection alias of the single current-driver adapter.
    ///
    /// Requires a prior successful [`initialize`](Self::initialize).
    pub fn find_added_adapter(&mut self) -> Reply<Status> {
        guarded("find_added_adapter", || {
            if self.context.is_none() {
                return Reply::failure(NOT_INITIALIZED);
            }

            match self.logic.get_adapter() {
                Ok(adapter) => Reply::with_message(Status::Success, adapter.connection_alias()),
                Err(error) => lookup_failure(&error),
            }
        })
    }

    /// Removes this application's deprecated-driver adapter.
    ///
    /// Works with or without a context.
    pub fn remove_deprecated_adapter(&self) -> Reply<RemovalStatus> {
        guarded("remove_deprecated_adapter", || {
            match self.logic.delete_deprecated_adapter() {
                Ok(DeletionResult::NoneRemaining) => Reply::new(RemovalStatus::SuccessNoRemaining),
                Ok(DeletionResult::SomeRemaining) => {
                    Reply::new(RemovalStatus::SuccessSomeRemaining)
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Deprecated adapter removal failed");
                    Reply::failure(error.to_string())
                }
            }
        })
    }

    /// Records the current-driver adapters present before installation.
    ///
    /// Requires a prior successful [`initialize`](Self::initialize).
    pub fn establish_baseline(&mut self) -> Reply<BaselineReplyStatus> {
        guarded("establish_baseline", || {
            let Some(context) = self.context.as_mut() else {
                return Reply::failure(NOT_INITIALIZED);
            };

            match context.establish_baseline(&self.logic) {
                Ok(status) => Reply::new(status.into()),
                Err(error) => {
                    tracing::warn!(error = %error, "Baseline capture failed");
                    Reply::failure(error.to_string())
                }
            }
        })
    }

    /// Returns the alias of the single adapter added since the baseline.
    ///
    /// Requires a prior successful [`initialize`](Self::initialize).
    pub fn identify_new_adapter(&mut self) -> Reply<Status> {
        guarded("identify_new_adapter", || {
            let Some(context) = self.context.as_mut() else {
                return Reply::failure(NOT_INITIALIZED);
            };

            match context.identify_new_adapter(&self.logic) {
                Ok(adapter) => Reply::with_message(Status::Success, adapter.connection_alias()),
                Err(error) => lookup_failure(&error),
            }
        })
    }

    /// Destroys the context.
    ///
    /// The context is cleared before any teardown runs, so a later
    /// [`initialize`](Self::initialize) always starts fresh.
    pub fn deinitialize(&mut self) -> Reply<Status> {
        let context = self.context.take();

        guarded("deinitialize", move || {
            if context.is_some() {
                drop(context);
                tracing::debug!("Context destroyed");
            }
            Reply::new(Status::Success)
        })
    }
}

fn lookup_failure(error: &AdapterError) -> Reply<Status> {
    tracing::warn!(error = %error, "Adapter lookup failed");

    let status = if error.is_ambiguous() {
        Status::Ambiguous
    } else {
        Status::GeneralError
    };
    Reply::with_message(status, error.to_string())
}

/// Runs a boundary call, converting a panic into a general failure.
fn guarded<S, F>(operation: &'static str, call: F) -> Reply<S>
where
    S: FailureStatus,
    F: FnOnce() -> Reply<S>,
{
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::error!(operation, message = %message, "Boundary call panicked");
        Reply::failure(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNSPECIFIED_ERROR.to_string())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
