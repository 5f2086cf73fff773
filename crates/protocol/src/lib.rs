//! Shared device model and wire types for tether.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//!
//! - [`Device`] - a user-registered peripheral with its connection strategy
//! - [`StrategyKind`] - which of the three connectors drives the device
//! - [`AutomationRequest`] - the signal sent to the automation engine when a
//!   device must be connected through the system settings surface
//!
//! Everything here is plain data: no I/O, no async, no platform bindings.
//! [`AutomationRequest`] doubles as the inter-process contract for engines
//! that run outside the requesting process, so its serialized field names are
//! load-bearing and covered by tests.

mod device;
mod signal;

pub use device::{DEFAULT_PROBE_SERVICE, Device, DeviceError, DeviceId, StrategyKind};
pub use signal::{AutomationRequest, RequestKind};
