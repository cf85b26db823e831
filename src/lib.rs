//! driverlogic: TAP adapter identification and removal
//!
//! A library for finding this application's TAP network adapter among
//! those created by a driver, and for safely removing the adapter left
//! behind by a deprecated driver. The [`plugin`] module exposes the calls
//! made by an installer; [`driver`] holds the decision logic over the OS
//! device abstraction in [`network`].

pub mod config;
pub mod driver;
pub mod network;
pub mod plugin;
