//! Transport seams implemented by the embedding platform.
//!
//! The strategies never speak to radio hardware directly; they drive these
//! traits. Implementations wrap whatever the platform offers (an RFCOMM
//! socket API, a GATT stack) and are free to block internally, since
//! strategies always run off the orchestrator's event path.

use async_trait::async_trait;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::error::Result;

/// A resolved peripheral, as produced by [`SocketBackend::resolve`].
///
/// Opaque to the strategies; the inner value is whatever canonical form the
/// backend wants handed back to [`SocketBackend::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerHandle(pub String);

/// Stream-socket transport used by the direct-socket strategy.
#[async_trait]
pub trait SocketBackend: Send + Sync {
	/// Resolves an address to a peripheral handle.
	///
	/// # Errors
	///
	/// [`Error::ResolutionFailure`] when the address maps to nothing.
	///
	/// [`Error::ResolutionFailure`]: crate::Error::ResolutionFailure
	async fn resolve(&self, address: &str) -> Result<PeerHandle>;

	/// Opens a stream to a service on the peripheral.
	async fn open(&self, peer: &PeerHandle, service: Uuid) -> Result<Box<dyn ProbeStream>>;
}

/// A connected stream carrying the liveness probe.
#[async_trait]
pub trait ProbeStream: Send {
	async fn write_all(&mut self, payload: &[u8]) -> Result<()>;
	async fn flush(&mut self) -> Result<()>;

	/// Closes the stream, ending the session.
	async fn close(self: Box<Self>) -> Result<()>;
}

/// Terminal states reported by a managed link's state callback.
///
/// Exactly one of these is delivered per [`LinkBackend::open`] call; the
/// platform fires it whenever the link first transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
	Connected,
	Disconnected,
}

/// An open managed link retained by the managed-link strategy.
#[async_trait]
pub trait LinkHandle: Send {
	/// Requests teardown and disposes the handle.
	async fn close(self: Box<Self>) -> Result<()>;
}

/// Managed-link transport used by the managed-link strategy.
#[async_trait]
pub trait LinkBackend: Send + Sync {
	/// Opens a link to the peripheral at `address`.
	///
	/// The returned receiver fires once with the first state transition the
	/// platform observes. There is no deadline on delivery.
	async fn open(
		&self,
		address: &str,
	) -> Result<(Box<dyn LinkHandle>, oneshot::Receiver<LinkState>)>;
}
