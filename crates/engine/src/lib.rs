//! Automation engine for the system settings surface.
//!
//! The settings screen that pairs and connects peripherals belongs to the
//! operating system, not to us. The only control surface is its
//! accessibility tree: a live, vendor-shaped structure we can snapshot,
//! search, and poke with simulated activations. This crate implements the
//! observer/actuator loop that drives it:
//!
//! 1. A requester submits an [`AutomationRequest`] through an
//!    [`EngineHandle`] ("press Connect on the row labelled X").
//! 2. The [`Engine`] holds at most one pending request and rescans the
//!    surface on every change notification.
//! 3. When a scan locates the device row and an actionable control from the
//!    request's vocabulary, the engine dispatches one activation and retires
//!    the request.
//!
//! The surface mutates at uncontrolled frequency and with no completion
//! signal, so the loop is level-triggered and idempotent: failed scans are
//! swallowed and retried on the next event, and a resolved request can never
//! fire twice.
//!
//! [`AutomationRequest`]: tether_protocol::AutomationRequest

mod engine;
mod scan;
mod surface;

pub use engine::{Engine, EngineEvent, EngineHandle, event_channel};
pub use scan::{ScanConfig, scan};
pub use surface::{Surface, SurfaceLauncher, SurfaceNode};
