//! Managed-link strategy: open a link and wait for its state callback.

use std::sync::Arc;

use parking_lot::Mutex;
use tether_protocol::Device;
use tracing::debug;

use super::backend::{LinkBackend, LinkHandle, LinkState};
use super::direct::require_address;
use crate::error::{Error, Result};

/// Opens a managed link and keeps its handle for later release.
///
/// At most one link is held at a time; a new attempt replaces (and thereby
/// drops) any previously held handle. The slot is only touched inside
/// attempt and release, which the orchestrator already serializes.
pub struct ManagedLinkStrategy {
	backend: Arc<dyn LinkBackend>,
	held: Mutex<Option<Box<dyn LinkHandle>>>,
}

impl ManagedLinkStrategy {
	pub fn new(backend: Arc<dyn LinkBackend>) -> Self {
		Self {
			backend,
			held: Mutex::new(None),
		}
	}

	/// Opens the link and blocks on the single-fire state callback.
	///
	/// There is deliberately no deadline on the wait: the platform fires the
	/// callback on whichever transition happens first, and either one
	/// resolves it. The handle is retained even when the link reports
	/// disconnected, so a later release can dispose of it.
	pub async fn attempt(&self, device: &Device) -> Result<()> {
		let address = require_address(device)?;
		let (handle, state_rx) = self.backend.open(address).await?;

		if self.held.lock().replace(handle).is_some() {
			debug!(label = %device.label, "replacing previously held link handle");
		}

		match state_rx.await {
			Ok(LinkState::Connected) => {
				debug!(label = %device.label, "managed link connected");
				Ok(())
			}
			Ok(LinkState::Disconnected) => Err(Error::LinkRejected(device.label.clone())),
			Err(_) => Err(Error::LinkChannelClosed),
		}
	}

	/// Tears down the held link, if any.
	///
	/// Idempotent: releasing with no held handle is a successful no-op.
	pub async fn release(&self, device: &Device) -> Result<()> {
		let handle = self.held.lock().take();
		match handle {
			Some(handle) => {
				handle.close().await?;
				debug!(label = %device.label, "managed link released");
				Ok(())
			}
			None => Ok(()),
		}
	}
}
