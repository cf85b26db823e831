//! Decision layer for finding and removing this application's TAP adapter.
//!
//! This module provides:
//! - Stateless operations over the device manager ([`DriverLogic`])
//! - The long-lived lifecycle handle with baseline tracking ([`DriverContext`])
//! - The domain error taxonomy ([`AdapterError`])
//!
//! # Safety of removal
//!
//! Removal never relies on enumeration positions. The adapter to remove is
//! identified by stable identifier in one pass and re-matched by that
//! identifier in a second, independent pass at the moment of removal.

mod context;
mod error;
mod logic;

pub use context::{BaselineStatus, DriverContext};
pub use error::AdapterError;
pub use logic::{DeletionResult, DriverConfig, DriverLogic};
