//! Single-active-session orchestration.
//!
//! All connect/disconnect intents funnel through one actor task, so state
//! transitions are processed strictly in submission order: two near
//! simultaneous user actions can never interleave their reads and writes of
//! the current target. The actor publishes a human-readable status line and
//! the current target through watch channels, the way a UI layer expects to
//! observe them.

use tether_protocol::{Device, StrategyKind};
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::connector::ConnectorSet;

/// Commands consumed by the session actor.
#[derive(Debug, Clone)]
enum Command {
	Connect(Device),
	Disconnect(Device),
}

/// Cloneable front end of the session actor.
///
/// Submissions are fire-and-forget: the call returns once the command is
/// queued, and outcomes surface through [`status`](Self::status).
#[derive(Clone)]
pub struct Orchestrator {
	commands: mpsc::UnboundedSender<Command>,
	status: watch::Receiver<String>,
	target: watch::Receiver<Option<Device>>,
}

impl Orchestrator {
	/// Queues a connect intent for the device.
	pub fn connect(&self, device: Device) {
		if self.commands.send(Command::Connect(device)).is_err() {
			tracing::warn!("session task gone; connect command dropped");
		}
	}

	/// Queues a disconnect intent for the device.
	pub fn disconnect(&self, device: Device) {
		if self.commands.send(Command::Disconnect(device)).is_err() {
			tracing::warn!("session task gone; disconnect command dropped");
		}
	}

	/// Subscribes to the human-readable status line.
	pub fn status(&self) -> watch::Receiver<String> {
		self.status.clone()
	}

	/// Subscribes to the currently targeted device.
	pub fn target(&self) -> watch::Receiver<Option<Device>> {
		self.target.clone()
	}
}

/// The session actor. Construct with [`SessionTask::new`] and spawn
/// [`SessionTask::run`].
pub struct SessionTask {
	connectors: ConnectorSet,
	current: Option<Device>,
	commands: mpsc::UnboundedReceiver<Command>,
	status: watch::Sender<String>,
	target: watch::Sender<Option<Device>>,
}

impl SessionTask {
	/// Creates the actor and its [`Orchestrator`] front end.
	pub fn new(connectors: ConnectorSet) -> (Self, Orchestrator) {
		let (command_tx, command_rx) = mpsc::unbounded_channel();
		let (status_tx, status_rx) = watch::channel("Ready".to_string());
		let (target_tx, target_rx) = watch::channel(None);

		let task = Self {
			connectors,
			current: None,
			commands: command_rx,
			status: status_tx,
			target: target_tx,
		};
		let handle = Orchestrator {
			commands: command_tx,
			status: status_rx,
			target: target_rx,
		};
		(task, handle)
	}

	/// Processes commands until every [`Orchestrator`] clone is dropped.
	pub async fn run(mut self) {
		while let Some(command) = self.commands.recv().await {
			match command {
				Command::Connect(device) => self.connect(device).await,
				Command::Disconnect(device) => self.disconnect(device).await,
			}
		}
		debug!("session task finished: all handles dropped");
	}

	async fn connect(&mut self, device: Device) {
		self.publish(format!("Connecting to {}…", device.label));

		// Switching away from a non-external target releases it first, so
		// two transport sessions are never open at once. External-surface
		// targets are left alone: the platform arbitrates that link itself,
		// and prodding the settings UI to disconnect is unreliable.
		if let Some(previous) = self.current.clone() {
			if previous.id != device.id && previous.kind != StrategyKind::ExternalSurface {
				self.disconnect(previous).await;
			}
		}

		let outcome = self.connectors.attempt(&device).await;
		if let Err(error) = &outcome {
			debug!(label = %device.label, %error, "connect attempt failed");
		}
		self.publish(if outcome.is_ok() {
			format!("Connected (requested) → {}", device.label)
		} else {
			format!("Failed to connect {}", device.label)
		});

		// The device stays targeted even on failure: the user can retry or
		// explicitly disconnect it.
		self.set_target(Some(device));
	}

	async fn disconnect(&mut self, device: Device) {
		self.publish(format!("Disconnecting {}…", device.label));

		let outcome = self.connectors.release(&device).await;
		if let Err(error) = &outcome {
			debug!(label = %device.label, %error, "release failed");
		}
		self.publish(if outcome.is_ok() {
			format!("Disconnected {}", device.label)
		} else {
			format!("Failed to disconnect {}", device.label)
		});

		if self.current.as_ref().is_some_and(|c| c.id == device.id) {
			self.set_target(None);
		}
	}

	fn publish(&self, status: String) {
		let _ = self.status.send(status);
	}

	fn set_target(&mut self, target: Option<Device>) {
		self.current = target.clone();
		let _ = self.target.send(target);
	}
}
