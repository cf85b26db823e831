//! Installer boundary.
//!
//! [`PluginSession`] exposes the calls an installer script makes:
//! `initialize`, `find_added_adapter`, `remove_deprecated_adapter` and
//! `deinitialize`, plus the baseline pair `establish_baseline` /
//! `identify_new_adapter`. Each returns a [`Reply`] with a numeric status
//! and a message.

mod session;
mod status;

pub use session::{NOT_INITIALIZED, PluginSession, UNSPECIFIED_ERROR};
pub use status::{BaselineReplyStatus, FailureStatus, RemovalStatus, Reply, Status};
