//! Abstraction over the OS-owned settings surface.

/// One node of a surface snapshot.
///
/// A snapshot is an owned copy of the accessibility tree at a point in time.
/// The live tree keeps mutating underneath us, so `node_id` is only a hint:
/// activation through a stale id may fail, and the engine treats that as a
/// transient miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceNode {
	/// Opaque handle for dispatching activation back at the live tree.
	pub node_id: u64,
	/// Visible text, when the node has any.
	pub text: Option<String>,
	/// Whether the node supports the activate primitive directly.
	pub actionable: bool,
	/// Child nodes in document order.
	pub children: Vec<SurfaceNode>,
}

impl SurfaceNode {
	/// Convenience constructor for a leaf node.
	pub fn leaf(node_id: u64, text: impl Into<String>, actionable: bool) -> Self {
		Self {
			node_id,
			text: Some(text.into()),
			actionable,
			children: Vec::new(),
		}
	}

	/// Convenience constructor for a container node without text.
	pub fn container(node_id: u64, actionable: bool, children: Vec<SurfaceNode>) -> Self {
		Self {
			node_id,
			text: None,
			actionable,
			children,
		}
	}
}

/// The live settings surface: snapshot source and activation sink.
///
/// Implementations wrap whatever platform accessibility API is available.
/// Both operations must be fast and non-blocking; they run on the engine's
/// event loop.
pub trait Surface: Send + Sync {
	/// Captures the current tree root.
	///
	/// Returns `None` when the surface is not available (screen not in the
	/// foreground, window mid-transition). The engine treats this as
	/// transient and waits for the next change event.
	fn snapshot(&self) -> Option<SurfaceNode>;

	/// Dispatches the activate primitive at the node behind `node_id`.
	///
	/// Returns false when the node no longer exists in the live tree.
	fn activate(&self, node_id: u64) -> bool;
}

/// Brings the relevant settings screen to the foreground.
///
/// Fire-and-forget: the launch may be ignored or delayed by the platform,
/// and the engine compensates by rescanning on surface changes.
pub trait SurfaceLauncher: Send + Sync {
	fn bring_to_front(&self);
}
