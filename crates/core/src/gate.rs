//! Automation-enablement collaborator interface.
//!
//! Click-through automation only works while the user has granted the
//! platform's automation/accessibility permission. The presentation layer
//! polls this gate to decide whether external-surface devices are usable
//! and where to send the user when they are not.

/// Reports and requests the platform automation permission.
pub trait AutomationGate: Send + Sync {
	/// Whether the automation service is currently enabled.
	fn is_enabled(&self) -> bool;

	/// Opens the OS screen where the user can enable the service.
	/// Fire-and-forget.
	fn open_enablement_surface(&self);
}

/// Whether external-surface connects can be expected to do anything.
pub fn external_surface_ready(gate: &dyn AutomationGate) -> bool {
	gate.is_enabled()
}
