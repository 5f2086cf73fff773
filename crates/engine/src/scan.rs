//! Locating a device row and its control inside a surface snapshot.
//!
//! Settings screens nest device entries differently per vendor and OS
//! version, so everything here is heuristic: we find the node carrying the
//! device label, climb a few ancestor levels to the assumed row container,
//! and look for a control from a small vocabulary inside it. The climb
//! depths and vocabularies are tuning knobs, not guarantees.

use tether_protocol::RequestKind;

use crate::surface::SurfaceNode;

/// Tuning parameters for [`scan`].
///
/// Defaults are the constants observed to work across vendor settings UIs.
#[derive(Debug, Clone)]
pub struct ScanConfig {
	/// Ancestor levels climbed from the label node to the row container.
	pub row_climb: usize,
	/// Ancestor levels climbed from a non-actionable match to the nearest
	/// actionable node.
	pub action_climb: usize,
	/// Connect-class control texts, in priority order.
	pub connect_vocab: Vec<String>,
	/// Disconnect-class control texts, in priority order.
	pub disconnect_vocab: Vec<String>,
}

impl Default for ScanConfig {
	fn default() -> Self {
		Self {
			row_climb: 4,
			action_climb: 4,
			connect_vocab: ["Connect", "Pair", "Use for audio", "On", "Connected"]
				.map(String::from)
				.to_vec(),
			disconnect_vocab: ["Disconnect", "Off", "Not connected"]
				.map(String::from)
				.to_vec(),
		}
	}
}

impl ScanConfig {
	fn vocabulary(&self, kind: RequestKind) -> &[String] {
		match kind {
			RequestKind::Connect => &self.connect_vocab,
			RequestKind::Disconnect => &self.disconnect_vocab,
		}
	}
}

/// Flattened snapshot with parent links and subtree extents.
///
/// Nodes are stored in depth-first order, so the subtree of node `i` is the
/// contiguous range `i..i + subtree_len`.
struct TreeIndex<'a> {
	nodes: Vec<FlatNode<'a>>,
}

struct FlatNode<'a> {
	node: &'a SurfaceNode,
	parent: Option<usize>,
	subtree_len: usize,
}

impl<'a> TreeIndex<'a> {
	fn build(root: &'a SurfaceNode) -> Self {
		fn visit<'a>(
			node: &'a SurfaceNode,
			parent: Option<usize>,
			nodes: &mut Vec<FlatNode<'a>>,
		) -> usize {
			let idx = nodes.len();
			nodes.push(FlatNode {
				node,
				parent,
				subtree_len: 1,
			});
			for child in &node.children {
				let child_len = visit(child, Some(idx), nodes);
				nodes[idx].subtree_len += child_len;
			}
			nodes[idx].subtree_len
		}

		let mut nodes = Vec::new();
		visit(root, None, &mut nodes);
		Self { nodes }
	}

	/// Climbs up to `levels` ancestors, clamping at the root.
	fn climb(&self, idx: usize, levels: usize) -> usize {
		let mut current = idx;
		for _ in 0..levels {
			match self.nodes[current].parent {
				Some(parent) => current = parent,
				None => break,
			}
		}
		current
	}

	/// First node in the subtree of `idx` whose text equals `needle`.
	fn find_text(&self, idx: usize, needle: &str) -> Option<usize> {
		(idx..idx + self.nodes[idx].subtree_len)
			.find(|&i| self.nodes[i].node.text.as_deref() == Some(needle))
	}

	/// The node itself if actionable, else the nearest actionable ancestor
	/// within `climb` levels.
	fn nearest_actionable(&self, idx: usize, climb: usize) -> Option<usize> {
		if self.nodes[idx].node.actionable {
			return Some(idx);
		}
		let mut current = idx;
		for _ in 0..climb {
			current = self.nodes[current].parent?;
			if self.nodes[current].node.actionable {
				return Some(current);
			}
		}
		None
	}
}

/// Scans a snapshot for the control to activate for `request`.
///
/// Returns the node id to press, or `None` when no actionable control was
/// found. A `None` is always transient from the engine's point of view: the
/// next surface change triggers another scan.
///
/// For connect requests only, an actionable row container stands in when no
/// vocabulary control can be pressed; many UIs connect on a plain row tap.
pub fn scan(root: &SurfaceNode, label: &str, kind: RequestKind, config: &ScanConfig) -> Option<u64> {
	let index = TreeIndex::build(root);
	let vocabulary = config.vocabulary(kind);

	// Label match is exact and case-sensitive: device labels are free text
	// and near-collisions between user devices are common.
	let label_hits: Vec<usize> = (0..index.nodes.len())
		.filter(|&i| index.nodes[i].node.text.as_deref() == Some(label))
		.collect();

	for &hit in &label_hits {
		let container = index.climb(hit, config.row_climb);

		let matched = vocabulary
			.iter()
			.find_map(|word| index.find_text(container, word));

		if let Some(found) = matched {
			if let Some(target) = index.nearest_actionable(found, config.action_climb) {
				return Some(index.nodes[target].node.node_id);
			}
		}

		if kind == RequestKind::Connect {
			if let Some(target) = index.nearest_actionable(container, config.action_climb) {
				return Some(index.nodes[target].node.node_id);
			}
		}
	}

	None
}
