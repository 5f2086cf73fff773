//! Error types for connection strategies.
//!
//! These stay internal to strategy execution: the orchestrator collapses
//! every failure to an outcome plus a status string, because the only
//! recovery actions (retry, pick another strategy) belong to the user.
//! Engine-side misses (surface unavailable, no matching control) never
//! appear here at all; the engine swallows and retries them.

use thiserror::Error;

use tether_protocol::DeviceError;

/// Result type alias for strategy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while attempting or releasing a connection.
#[derive(Debug, Error)]
pub enum Error {
	/// Device record failed validation before any transport call.
	#[error(transparent)]
	Device(#[from] DeviceError),

	/// The address does not map to a known peripheral.
	#[error("no peripheral found for address {0}")]
	ResolutionFailure(String),

	/// The probe stream failed to open, write, or close.
	#[error("transport failure: {0}")]
	TransportFailure(String),

	/// The managed link reported disconnected before ever connecting.
	#[error("managed link rejected for {0}")]
	LinkRejected(String),

	/// The link backend dropped its state callback without reporting either
	/// transition.
	#[error("managed link state channel closed")]
	LinkChannelClosed,

	/// I/O error from a backend.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
