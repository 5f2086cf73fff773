//! External-surface strategy: delegate to the automation engine.

use std::sync::Arc;

use tether_engine::{EngineHandle, SurfaceLauncher};
use tether_protocol::{AutomationRequest, Device};
use tracing::debug;

use crate::error::Result;

/// Requests connection through the system settings surface.
///
/// This strategy never touches the peripheral. It raises the settings
/// screen and hands the engine a request; success here means "requested",
/// not "connected". Disconnection is best-effort by nature: many platforms
/// re-manage the link themselves once it is trusted, and the surface may
/// simply show no control to press.
pub struct ExternalSurfaceStrategy {
	launcher: Arc<dyn SurfaceLauncher>,
	engine: EngineHandle,
}

impl ExternalSurfaceStrategy {
	pub fn new(launcher: Arc<dyn SurfaceLauncher>, engine: EngineHandle) -> Self {
		Self { launcher, engine }
	}

	pub fn attempt(&self, device: &Device) -> Result<()> {
		self.launcher.bring_to_front();
		self.engine.submit(AutomationRequest::connect(device));
		debug!(label = %device.label, "connect request handed to automation engine");
		Ok(())
	}

	pub fn release(&self, device: &Device) -> Result<()> {
		self.launcher.bring_to_front();
		self.engine.submit(AutomationRequest::disconnect(device));
		debug!(label = %device.label, "disconnect request handed to automation engine");
		Ok(())
	}
}
