//! Connection strategies and their dispatch table.
//!
//! Each registered device carries a [`StrategyKind`]; [`ConnectorSet`] maps
//! the kind to one of three concrete strategies sharing a uniform contract:
//!
//! - `attempt(device)` - establish (or request) a connection
//! - `release(device)` - tear down whatever `attempt` left behind
//!
//! The kinds are disjoint by construction: dispatch is a plain match on the
//! device's kind, so a direct-socket attempt can never wander into link or
//! automation code paths.

pub mod backend;
mod direct;
mod external;
mod managed;

use std::sync::Arc;

use tether_engine::{EngineHandle, SurfaceLauncher};
use tether_protocol::{Device, StrategyKind};

pub use direct::DirectSocketStrategy;
pub use external::ExternalSurfaceStrategy;
pub use managed::ManagedLinkStrategy;

use crate::error::Result;
use backend::{LinkBackend, SocketBackend};

/// The strategy table: one connector per [`StrategyKind`].
pub struct ConnectorSet {
	direct: DirectSocketStrategy,
	managed: ManagedLinkStrategy,
	external: ExternalSurfaceStrategy,
}

impl ConnectorSet {
	/// Wires the three strategies to their transport seams.
	pub fn new(
		socket: Arc<dyn SocketBackend>,
		link: Arc<dyn LinkBackend>,
		launcher: Arc<dyn SurfaceLauncher>,
		engine: EngineHandle,
	) -> Self {
		Self {
			direct: DirectSocketStrategy::new(socket),
			managed: ManagedLinkStrategy::new(link),
			external: ExternalSurfaceStrategy::new(launcher, engine),
		}
	}

	/// Attempts a connection via the strategy registered for the device's
	/// kind.
	pub async fn attempt(&self, device: &Device) -> Result<()> {
		match device.kind {
			StrategyKind::DirectSocket => self.direct.attempt(device).await,
			StrategyKind::ManagedLink => self.managed.attempt(device).await,
			StrategyKind::ExternalSurface => self.external.attempt(device),
		}
	}

	/// Releases via the strategy registered for the device's kind.
	pub async fn release(&self, device: &Device) -> Result<()> {
		match device.kind {
			StrategyKind::DirectSocket => self.direct.release(device).await,
			StrategyKind::ManagedLink => self.managed.release(device).await,
			StrategyKind::ExternalSurface => self.external.release(device),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

	use async_trait::async_trait;
	use parking_lot::Mutex;
	use tether_engine::{EngineEvent, event_channel};
	use tether_protocol::{Device, RequestKind, StrategyKind};
	use tokio::sync::oneshot;
	use uuid::Uuid;

	use super::backend::*;
	use super::*;
	use crate::error::Error;

	#[derive(Default)]
	struct MockSocket {
		log: Arc<Mutex<Vec<String>>>,
		fail_resolve: bool,
		fail_write: bool,
	}

	#[async_trait]
	impl SocketBackend for MockSocket {
		async fn resolve(&self, address: &str) -> crate::Result<PeerHandle> {
			self.log.lock().push(format!("resolve {address}"));
			if self.fail_resolve {
				return Err(Error::ResolutionFailure(address.to_string()));
			}
			Ok(PeerHandle(address.to_string()))
		}

		async fn open(
			&self,
			peer: &PeerHandle,
			service: Uuid,
		) -> crate::Result<Box<dyn ProbeStream>> {
			self.log.lock().push(format!("open {} {service}", peer.0));
			Ok(Box::new(MockStream {
				log: Arc::clone(&self.log),
				fail_write: self.fail_write,
			}))
		}
	}

	struct MockStream {
		log: Arc<Mutex<Vec<String>>>,
		fail_write: bool,
	}

	#[async_trait]
	impl ProbeStream for MockStream {
		async fn write_all(&mut self, payload: &[u8]) -> crate::Result<()> {
			self.log
				.lock()
				.push(format!("write {}", String::from_utf8_lossy(payload).trim()));
			if self.fail_write {
				return Err(Error::TransportFailure("write refused".to_string()));
			}
			Ok(())
		}

		async fn flush(&mut self) -> crate::Result<()> {
			self.log.lock().push("flush".to_string());
			Ok(())
		}

		async fn close(self: Box<Self>) -> crate::Result<()> {
			self.log.lock().push("close".to_string());
			Ok(())
		}
	}

	/// Link backend whose state callback fires per `behavior`.
	struct MockLink {
		behavior: Mutex<LinkBehavior>,
		opens: AtomicUsize,
		closed: Arc<AtomicBool>,
	}

	enum LinkBehavior {
		Report(LinkState),
		DropCallback,
	}

	impl MockLink {
		fn reporting(state: LinkState) -> Self {
			Self {
				behavior: Mutex::new(LinkBehavior::Report(state)),
				opens: AtomicUsize::new(0),
				closed: Arc::new(AtomicBool::new(false)),
			}
		}
	}

	#[async_trait]
	impl LinkBackend for MockLink {
		async fn open(
			&self,
			_address: &str,
		) -> crate::Result<(Box<dyn LinkHandle>, oneshot::Receiver<LinkState>)> {
			self.opens.fetch_add(1, Ordering::SeqCst);
			let (tx, rx) = oneshot::channel();
			match &*self.behavior.lock() {
				LinkBehavior::Report(state) => {
					let _ = tx.send(*state);
				}
				LinkBehavior::DropCallback => drop(tx),
			}
			let handle = MockLinkHandle {
				closed: Arc::clone(&self.closed),
			};
			Ok((Box::new(handle), rx))
		}
	}

	struct MockLinkHandle {
		closed: Arc<AtomicBool>,
	}

	#[async_trait]
	impl LinkHandle for MockLinkHandle {
		async fn close(self: Box<Self>) -> crate::Result<()> {
			self.closed.store(true, Ordering::SeqCst);
			Ok(())
		}
	}

	#[derive(Default)]
	struct MockLauncher {
		raised: AtomicUsize,
	}

	impl SurfaceLauncher for MockLauncher {
		fn bring_to_front(&self) {
			self.raised.fetch_add(1, Ordering::SeqCst);
		}
	}

	struct Fixture {
		socket: Arc<MockSocket>,
		link: Arc<MockLink>,
		launcher: Arc<MockLauncher>,
		events: tokio::sync::mpsc::UnboundedReceiver<EngineEvent>,
		set: ConnectorSet,
	}

	fn fixture_with(socket: MockSocket, link: MockLink) -> Fixture {
		let socket = Arc::new(socket);
		let link = Arc::new(link);
		let launcher = Arc::new(MockLauncher::default());
		let (handle, events) = event_channel();
		let set = ConnectorSet::new(
			socket.clone(),
			link.clone(),
			launcher.clone(),
			handle,
		);
		Fixture {
			socket,
			link,
			launcher,
			events,
			set,
		}
	}

	fn fixture() -> Fixture {
		fixture_with(MockSocket::default(), MockLink::reporting(LinkState::Connected))
	}

	fn socket_device() -> Device {
		Device::new(
			"Workshop",
			StrategyKind::DirectSocket,
			Some("00:11:22:33:44:55".to_string()),
			None,
		)
		.unwrap()
	}

	fn link_device() -> Device {
		Device::new(
			"AR Glasses",
			StrategyKind::ManagedLink,
			Some("AA:BB:CC:DD:EE:FF".to_string()),
			None,
		)
		.unwrap()
	}

	fn surface_device() -> Device {
		Device::new("Room TV", StrategyKind::ExternalSurface, None, None).unwrap()
	}

	#[tokio::test]
	async fn direct_socket_probe_sequence() {
		let mut fx = fixture();
		fx.set.attempt(&socket_device()).await.unwrap();

		let log = fx.socket.log.lock().clone();
		assert_eq!(
			log,
			vec![
				"resolve 00:11:22:33:44:55",
				"open 00:11:22:33:44:55 00001101-0000-1000-8000-00805f9b34fb",
				"write PING",
				"flush",
				"close",
			]
		);

		// Nothing leaked into the other strategies.
		assert_eq!(fx.link.opens.load(Ordering::SeqCst), 0);
		assert_eq!(fx.launcher.raised.load(Ordering::SeqCst), 0);
		assert!(fx.events.try_recv().is_err());
	}

	#[tokio::test]
	async fn direct_socket_uses_custom_service() {
		let fx = fixture();
		let custom = uuid::uuid!("0000110a-0000-1000-8000-00805f9b34fb");
		let device = Device::new(
			"Workshop",
			StrategyKind::DirectSocket,
			Some("00:11:22:33:44:55".to_string()),
			Some(custom),
		)
		.unwrap();

		fx.set.attempt(&device).await.unwrap();
		let log = fx.socket.log.lock().clone();
		assert!(log[1].ends_with(&custom.to_string()));
	}

	#[tokio::test]
	async fn direct_socket_resolution_failure() {
		let fx = fixture_with(
			MockSocket {
				fail_resolve: true,
				..MockSocket::default()
			},
			MockLink::reporting(LinkState::Connected),
		);

		let err = fx.set.attempt(&socket_device()).await.unwrap_err();
		assert!(matches!(err, Error::ResolutionFailure(_)));
		// Failed before any stream was opened.
		assert_eq!(fx.socket.log.lock().len(), 1);
	}

	#[tokio::test]
	async fn direct_socket_transport_failure() {
		let fx = fixture_with(
			MockSocket {
				fail_write: true,
				..MockSocket::default()
			},
			MockLink::reporting(LinkState::Connected),
		);

		let err = fx.set.attempt(&socket_device()).await.unwrap_err();
		assert!(matches!(err, Error::TransportFailure(_)));
	}

	#[tokio::test]
	async fn direct_socket_release_is_a_no_op() {
		let fx = fixture();
		fx.set.release(&socket_device()).await.unwrap();
		assert!(fx.socket.log.lock().is_empty());
	}

	#[tokio::test]
	async fn managed_link_connected_transition_succeeds() {
		let mut fx = fixture();
		fx.set.attempt(&link_device()).await.unwrap();
		assert_eq!(fx.link.opens.load(Ordering::SeqCst), 1);
		assert!(fx.socket.log.lock().is_empty());
		assert!(fx.events.try_recv().is_err());
	}

	#[tokio::test]
	async fn managed_link_disconnected_transition_fails() {
		let fx = fixture_with(
			MockSocket::default(),
			MockLink::reporting(LinkState::Disconnected),
		);

		let err = fx.set.attempt(&link_device()).await.unwrap_err();
		assert!(matches!(err, Error::LinkRejected(_)));
	}

	#[tokio::test]
	async fn managed_link_dropped_callback_fails() {
		let fx = fixture_with(
			MockSocket::default(),
			MockLink {
				behavior: Mutex::new(LinkBehavior::DropCallback),
				opens: AtomicUsize::new(0),
				closed: Arc::new(AtomicBool::new(false)),
			},
		);

		let err = fx.set.attempt(&link_device()).await.unwrap_err();
		assert!(matches!(err, Error::LinkChannelClosed));
	}

	#[tokio::test]
	async fn managed_link_release_closes_held_handle() {
		let fx = fixture();
		fx.set.attempt(&link_device()).await.unwrap();
		assert!(!fx.link.closed.load(Ordering::SeqCst));

		fx.set.release(&link_device()).await.unwrap();
		assert!(fx.link.closed.load(Ordering::SeqCst));
	}

	#[tokio::test]
	async fn managed_link_release_without_attempt_is_idempotent() {
		let fx = fixture();
		fx.set.release(&link_device()).await.unwrap();
		fx.set.release(&link_device()).await.unwrap();
		assert!(!fx.link.closed.load(Ordering::SeqCst));
	}

	#[tokio::test]
	async fn external_surface_attempt_raises_and_submits() {
		let mut fx = fixture();
		fx.set.attempt(&surface_device()).await.unwrap();

		assert_eq!(fx.launcher.raised.load(Ordering::SeqCst), 1);
		match fx.events.try_recv().unwrap() {
			EngineEvent::Request(request) => {
				assert_eq!(request.kind, RequestKind::Connect);
				assert_eq!(request.device_label, "Room TV");
				assert_eq!(request.device_address, None);
			}
			other => panic!("expected request event, got {other:?}"),
		}

		// The peripheral itself is never touched.
		assert!(fx.socket.log.lock().is_empty());
		assert_eq!(fx.link.opens.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn external_surface_release_submits_disconnect() {
		let mut fx = fixture();
		fx.set.release(&surface_device()).await.unwrap();

		match fx.events.try_recv().unwrap() {
			EngineEvent::Request(request) => {
				assert_eq!(request.kind, RequestKind::Disconnect);
			}
			other => panic!("expected request event, got {other:?}"),
		}
	}
}
