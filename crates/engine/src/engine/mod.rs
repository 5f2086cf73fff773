//! The engine actor: one pending request, rescanned on every surface event.
//!
//! All mutation of the pending-request slot happens inside a single task
//! consuming an event channel, so request submission and surface
//! notifications can arrive from any thread without re-entrant scans.
//!
//! # State machine
//!
//! ```text
//!            Request(r)                    activation dispatched
//!   Idle ──────────────────▶ Pending(r) ──────────────────────────▶ Idle
//!            ▲                   │ ▲
//!            │                   │ │ SurfaceChanged / failed scan
//!            │                   ▼ │
//!            │               Pending(r)
//!            │                   │
//!            └───────────────────┘ Request(r') supersedes r
//! ```
//!
//! There is no failure state and no timeout: an unresolvable request stays
//! pending until a later scan lands or a newer request replaces it. The
//! surface's timing is outside our control, so every miss is transient by
//! definition.

use std::sync::Arc;

use tether_protocol::AutomationRequest;
use tokio::sync::mpsc;

use crate::scan::{ScanConfig, scan};
use crate::surface::Surface;


/// Events consumed by the engine loop.
#[derive(Debug, Clone)]
pub enum EngineEvent {
	/// A new automation request; supersedes any unresolved one.
	Request(AutomationRequest),
	/// The observed surface mutated. Carries no payload; the engine
	/// re-snapshots on every delivery.
	SurfaceChanged,
}

/// Cloneable submission side of the engine.
///
/// Sends never block and never fail to the caller: if the engine task is
/// gone the event is logged and dropped, matching the fire-and-forget
/// contract of the external-surface strategy.
#[derive(Clone)]
pub struct EngineHandle {
	events: mpsc::UnboundedSender<EngineEvent>,
}

impl EngineHandle {
	/// Submits a request, superseding any unresolved previous one.
	pub fn submit(&self, request: AutomationRequest) {
		if self.events.send(EngineEvent::Request(request)).is_err() {
			tracing::warn!("engine task gone; automation request dropped");
		}
	}

	/// Notifies the engine that the surface content changed.
	pub fn surface_changed(&self) {
		if self.events.send(EngineEvent::SurfaceChanged).is_err() {
			tracing::warn!("engine task gone; surface event dropped");
		}
	}
}

/// Creates a handle and the raw event stream behind it.
///
/// [`Engine::new`] uses this internally. It is public for deployments where
/// the engine runs in another process: the requester keeps the handle and a
/// relay forwards the events over the wire contract.
pub fn event_channel() -> (EngineHandle, mpsc::UnboundedReceiver<EngineEvent>) {
	let (tx, rx) = mpsc::unbounded_channel();
	(EngineHandle { events: tx }, rx)
}

/// The automation engine loop.
///
/// Construct with [`Engine::new`], spawn [`Engine::run`], and feed it
/// through the returned [`EngineHandle`].
pub struct Engine {
	surface: Arc<dyn Surface>,
	config: ScanConfig,
	pending: Option<AutomationRequest>,
	events: mpsc::UnboundedReceiver<EngineEvent>,
}

impl Engine {
	/// Creates an engine over a surface with the given scan tuning.
	pub fn new(surface: Arc<dyn Surface>, config: ScanConfig) -> (Self, EngineHandle) {
		let (handle, rx) = event_channel();
		let engine = Self {
			surface,
			config,
			pending: None,
			events: rx,
		};
		(engine, handle)
	}

	/// Runs the event loop until every [`EngineHandle`] is dropped.
	pub async fn run(mut self) {
		while let Some(event) = self.events.recv().await {
			self.handle(event);
		}
		tracing::debug!("engine loop finished: all handles dropped");
	}

	fn handle(&mut self, event: EngineEvent) {
		match event {
			EngineEvent::Request(request) => {
				if let Some(previous) = self.pending.replace(request) {
					tracing::debug!(
						label = %previous.device_label,
						"unresolved automation request superseded"
					);
				}
				self.try_scan();
			}
			EngineEvent::SurfaceChanged => {
				if self.pending.is_some() {
					self.try_scan();
				}
			}
		}
	}

	/// Attempts one scan-and-click for the pending request.
	///
	/// Every failure mode here is swallowed on purpose: no snapshot, no
	/// match, or a stale node id all leave the request pending for the next
	/// surface event.
	fn try_scan(&mut self) {
		let Some(request) = self.pending.as_ref() else {
			return;
		};

		let Some(root) = self.surface.snapshot() else {
			tracing::debug!("surface unavailable; keeping request pending");
			return;
		};

		let Some(node_id) = scan(&root, &request.device_label, request.kind, &self.config)
		else {
			tracing::debug!(
				label = %request.device_label,
				kind = ?request.kind,
				"no actionable control found; keeping request pending"
			);
			return;
		};

		if self.surface.activate(node_id) {
			tracing::debug!(
				label = %request.device_label,
				kind = ?request.kind,
				node_id,
				"activation dispatched; request resolved"
			);
			self.pending = None;
		} else {
			tracing::debug!(node_id, "node vanished before activation; will rescan");
		}
	}

	/// Test-only synchronous event injection.
	#[cfg(test)]
	pub(crate) fn dispatch(&mut self, event: EngineEvent) {
		self.handle(event);
	}

	/// Test-only view of the pending slot.
	#[cfg(test)]
	pub(crate) fn pending(&self) -> Option<&AutomationRequest> {
		self.pending.as_ref()
	}
}
