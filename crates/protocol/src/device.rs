//! The device record and its construction-time invariants.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Serial Port Profile UUID used for the liveness probe when a device does
/// not carry a custom service identifier.
pub const DEFAULT_PROBE_SERVICE: Uuid = uuid::uuid!("00001101-0000-1000-8000-00805f9b34fb");

/// Errors raised while constructing a [`Device`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
	/// The chosen strategy needs a peripheral address and none was given.
	#[error("strategy {0:?} requires a device address")]
	AddressRequired(StrategyKind),

	/// The address is not a colon-separated 48-bit hardware address.
	#[error("invalid device address: {0}")]
	AddressInvalid(String),
}

/// Opaque unique identifier for a registered device.
///
/// Assigned once at creation and never reused; registries key on it for
/// last-write-wins replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(Uuid);

impl DeviceId {
	/// Generates a fresh random identifier.
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for DeviceId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for DeviceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Which connector drives connect/disconnect for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
	/// Stream-socket handshake with a liveness probe.
	DirectSocket,
	/// Peripheral-class link with an asynchronous state callback.
	ManagedLink,
	/// Click-through automation of the system settings surface.
	ExternalSurface,
}

impl StrategyKind {
	/// Whether this strategy opens a transport to the peripheral itself and
	/// therefore needs a validated address.
	pub fn requires_address(self) -> bool {
		!matches!(self, StrategyKind::ExternalSurface)
	}
}

/// A user-registered peripheral.
///
/// Devices are immutable values: edits replace the whole record in the
/// registry, and connectors receive them by clone. The constructor enforces
/// the address invariant so no transport code ever sees a socket-bound
/// device without a usable address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
	/// Stable identity, assigned at creation.
	pub id: DeviceId,
	/// Display label; also the text the automation engine matches against
	/// in the settings surface.
	pub label: String,
	/// Connection strategy for this device.
	pub kind: StrategyKind,
	/// Hardware address. Required for socket and managed-link strategies,
	/// optional for external-surface (most settings UIs only show the label).
	pub address: Option<String>,
	/// Custom service identifier overriding [`DEFAULT_PROBE_SERVICE`].
	pub service: Option<Uuid>,
}

impl Device {
	/// Creates a device, validating the address against the strategy kind.
	pub fn new(
		label: impl Into<String>,
		kind: StrategyKind,
		address: Option<String>,
		service: Option<Uuid>,
	) -> Result<Self, DeviceError> {
		let address = address.filter(|a| !a.is_empty());
		if kind.requires_address() {
			match &address {
				None => return Err(DeviceError::AddressRequired(kind)),
				Some(addr) if !is_hardware_address(addr) => {
					return Err(DeviceError::AddressInvalid(addr.clone()));
				}
				Some(_) => {}
			}
		}

		Ok(Self {
			id: DeviceId::new(),
			label: label.into(),
			kind,
			address,
			service,
		})
	}

	/// The service identifier the probe should target.
	pub fn probe_service(&self) -> Uuid {
		self.service.unwrap_or(DEFAULT_PROBE_SERVICE)
	}
}

/// Checks for a colon-separated 48-bit hardware address (`AA:BB:CC:DD:EE:FF`).
fn is_hardware_address(s: &str) -> bool {
	let octets: Vec<&str> = s.split(':').collect();
	octets.len() == 6
		&& octets
			.iter()
			.all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}
