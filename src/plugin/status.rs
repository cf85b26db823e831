//! Status codes and replies returned across the installer boundary.

use std::fmt;

use crate::driver::BaselineStatus;

/// Status of a lifecycle or lookup call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Status {
    /// The call failed; the message says why.
    GeneralError = 0,
    /// The call succeeded.
    Success = 1,
    /// More than one adapter matched where exactly one was required.
    Ambiguous = 2,
}

/// Status of a deprecated-adapter removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum RemovalStatus {
    /// The removal failed; the message says why.
    GeneralError = 0,
    /// The adapter was removed and no deprecated adapters remain.
    SuccessNoRemaining = 1,
    /// The adapter was removed but other deprecated adapters remain.
    SuccessSomeRemaining = 2,
}

/// Status of a baseline capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum BaselineReplyStatus {
    /// The capture failed; the message says why.
    GeneralError = 0,
    /// No adapter of the current driver is present.
    NoAdaptersPresent = 1,
    /// Adapters are present but none is named after the base alias.
    SomeAdaptersPresent = 2,
    /// This application's adapter is already present.
    OwnAdapterPresent = 3,
}

impl From<BaselineStatus> for BaselineReplyStatus {
    fn from(status: BaselineStatus) -> Self {
        match status {
            BaselineStatus::NoAdaptersPresent => Self::NoAdaptersPresent,
            BaselineStatus::SomeAdaptersPresent => Self::SomeAdaptersPresent,
            BaselineStatus::OwnAdapterPresent => Self::OwnAdapterPresent,
        }
    }
}

/// Failure status shared by every status type.
pub trait FailureStatus: Copy {
    /// The status reported for any failure without a dedicated code.
    const GENERAL_ERROR: Self;

    /// Numeric code pushed to the installer.
    fn code(self) -> i32;
}

impl FailureStatus for Status {
    const GENERAL_ERROR: Self = Self::GeneralError;

    fn code(self) -> i32 {
        self as i32
    }
}

impl FailureStatus for RemovalStatus {
    const GENERAL_ERROR: Self = Self::GeneralError;

    fn code(self) -> i32 {
        self as i32
    }
}

impl FailureStatus for BaselineReplyStatus {
    const GENERAL_ERROR: Self = Self::GeneralError;

    fn code(self) -> i32 {
        self as i32
    }
}

/// A status plus a message: empty on plain success, the adapter alias on a
/// successful lookup, a diagnostic otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<S> {
    /// Outcome of the call.
    pub status: S,
    /// Human-readable payload.
    pub message: String,
}

impl<S: FailureStatus> Reply<S> {
    /// Creates a reply with an empty message.
    #[must_use]
    pub const fn new(status: S) -> Self {
        Self {
            status,
            message: String::new(),
        }
    }

    /// Creates a reply carrying a message.
    #[must_use]
    pub fn with_message(status: S, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a general failure reply.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::with_message(S::GENERAL_ERROR, message)
    }
}

impl<S: FailureStatus + fmt::Debug> fmt::Display for Reply<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{:?} ({})", self.status, self.status.code())
        } else {
            write!(f, "{:?} ({}): {}", self.status, self.status.code(), self.message)
        }
    }
}
