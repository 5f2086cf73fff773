//! Direct stream-socket strategy: connect, probe, close.

use std::sync::Arc;

use tether_protocol::Device;
use tracing::debug;

use super::backend::SocketBackend;
use crate::error::{Error, Result};

/// Payload written through the probe stream.
///
/// The content is irrelevant to the peripheral; opening the stream and
/// pushing one write through it is what forces the platform to establish
/// and trust the link.
const PROBE_PAYLOAD: &[u8] = b"PING\n";

/// Connects over a stream socket and immediately closes again.
///
/// The open-write-close sequence both verifies reachability and nudges the
/// platform into treating the link as live. Nothing is retained between
/// calls, so release has nothing to undo.
pub struct DirectSocketStrategy {
	backend: Arc<dyn SocketBackend>,
}

impl DirectSocketStrategy {
	pub fn new(backend: Arc<dyn SocketBackend>) -> Self {
		Self { backend }
	}

	pub async fn attempt(&self, device: &Device) -> Result<()> {
		let address = require_address(device)?;
		let peer = self.backend.resolve(address).await?;

		let mut stream = self.backend.open(&peer, device.probe_service()).await?;
		stream.write_all(PROBE_PAYLOAD).await?;
		stream.flush().await?;
		stream.close().await?;

		debug!(label = %device.label, "probe round-trip completed");
		Ok(())
	}

	/// Closing the probe stream already ended the session.
	pub async fn release(&self, _device: &Device) -> Result<()> {
		Ok(())
	}
}

pub(super) fn require_address(device: &Device) -> Result<&str> {
	device
		.address
		.as_deref()
		.ok_or_else(|| Error::Device(tether_protocol::DeviceError::AddressRequired(device.kind)))
}
