//! Connection strategies and session orchestration for registered
//! peripherals.
//!
//! A registered [`Device`] names one of three ways to get it connected:
//!
//! - [`StrategyKind::DirectSocket`] - open a stream socket, push a liveness
//!   probe through it, close. Verifies reachability and forces the platform
//!   to establish the link.
//! - [`StrategyKind::ManagedLink`] - open a managed peripheral link and wait
//!   on its asynchronous state callback; the link handle is retained until
//!   released.
//! - [`StrategyKind::ExternalSurface`] - no peripheral access at all: raise
//!   the system settings screen and ask the automation engine
//!   (`tether-engine`) to press the right control on our behalf.
//!
//! [`ConnectorSet`] maps device kind to strategy; [`SessionTask`] serializes
//! connect/disconnect intents so at most one device is targeted at a time
//! and a previous non-external session is always released before a new
//! transport attempt begins.
//!
//! Platform specifics live behind the seams in [`connector::backend`],
//! [`AutomationGate`], and the surface traits re-exported from
//! `tether-engine`.
//!
//! # Wiring it up
//!
//! ```ignore
//! let (engine, engine_handle) = Engine::new(surface, ScanConfig::default());
//! tokio::spawn(engine.run());
//!
//! let connectors = ConnectorSet::new(socket, link, launcher, engine_handle);
//! let (session, orchestrator) = SessionTask::new(connectors);
//! tokio::spawn(session.run());
//!
//! orchestrator.connect(device);
//! ```

pub mod connector;
mod error;
mod gate;
mod orchestrator;
mod registry;

pub use connector::{
	ConnectorSet, DirectSocketStrategy, ExternalSurfaceStrategy, ManagedLinkStrategy,
};
pub use error::{Error, Result};
pub use gate::{AutomationGate, external_surface_ready};
pub use orchestrator::{Orchestrator, SessionTask};
pub use registry::{DeviceRegistry, MemoryRegistry};

pub use tether_engine::{Engine, EngineHandle, ScanConfig, Surface, SurfaceLauncher, SurfaceNode};
pub use tether_protocol::{
	AutomationRequest, DEFAULT_PROBE_SERVICE, Device, DeviceError, DeviceId, RequestKind,
	StrategyKind,
};
