//! Wire contract between connect requesters and the automation engine.
//!
//! When the engine runs outside the requesting process, this is the payload
//! carried over the named-event channel. Field names are part of the
//! contract and must not change:
//!
//! ```json
//! {"kind": "Connect", "deviceLabel": "Room TV", "deviceAddress": "AA:BB:CC:DD:EE:FF"}
//! ```
//!
//! `deviceAddress` is omitted entirely when the device has none.

use serde::{Deserialize, Serialize};

use crate::Device;

/// Whether the engine should press a connect-class or disconnect-class
/// control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
	Connect,
	Disconnect,
}

/// A single in-flight desire to act on a named device via the settings
/// surface.
///
/// The engine holds at most one of these at a time; submitting a new request
/// silently supersedes an unresolved one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRequest {
	/// Requested action.
	pub kind: RequestKind,
	/// Exact display label to locate in the surface tree (case-sensitive).
	#[serde(rename = "deviceLabel")]
	pub device_label: String,
	/// Hardware address, when known. Most settings UIs only show the label,
	/// so the engine does not currently match on this.
	#[serde(rename = "deviceAddress", skip_serializing_if = "Option::is_none")]
	pub device_address: Option<String>,
}

impl AutomationRequest {
	/// Builds a connect request for a device.
	pub fn connect(device: &Device) -> Self {
		Self {
			kind: RequestKind::Connect,
			device_label: device.label.clone(),
			device_address: device.address.clone(),
		}
	}

	/// Builds a disconnect request for a device.
	pub fn disconnect(device: &Device) -> Self {
		Self {
			kind: RequestKind::Disconnect,
			device_label: device.label.clone(),
			device_address: device.address.clone(),
		}
	}
}
