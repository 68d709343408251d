//! Drawable networks derived from tasks and schedule results.
//!
//! Derivation is pure: the same tasks, links and results always yield the
//! same nodes, edges and labels, in the same order.

pub mod event_graph;
pub mod links;
pub mod task_graph;

use crate::model::{END, START};

pub use event_graph::build_event_network;
pub use task_graph::{SummaryRow, build_task_network, summary_rows};

/// Role of a node in the drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Start,
	End,
	Task,
}

impl NodeKind {
	pub fn of(node_id: &str) -> Self {
		match node_id {
			START => Self::Start,
			END => Self::End,
			_ => Self::Task,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
	pub id: String,
	pub kind: NodeKind,
	/// Lines drawn inside the node, top to bottom.
	pub label: Vec<String>,
	pub critical: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkEdge {
	/// `"{source}-{target}"`.
	pub id: String,
	pub source: String,
	pub target: String,
	/// Lines drawn at the edge midpoint; empty for plain connectors.
	pub label: Vec<String>,
	pub critical: bool,
}

impl NetworkEdge {
	pub fn new(source: &str, target: &str, label: Vec<String>, critical: bool) -> Self {
		Self {
			id: format!("{source}-{target}"),
			source: source.to_string(),
			target: target.to_string(),
			label,
			critical,
		}
	}
}

/// Nodes and edges before positioning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
	pub nodes: Vec<NetworkNode>,
	pub edges: Vec<NetworkEdge>,
}

impl Network {
	pub fn node(&self, id: &str) -> Option<&NetworkNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|node| node.id == id)
	}

	pub fn critical_edges(&self) -> impl Iterator<Item = &NetworkEdge> {
		self.edges.iter().filter(|edge| edge.critical)
	}

	/// Inserts a node unless one with the same id exists.
	fn ensure_node(&mut self, id: &str) {
		if self.node(id).is_none() {
			self.nodes.push(NetworkNode {
				id: id.to_string(),
				kind: NodeKind::of(id),
				label: Vec::new(),
				critical: false,
			});
		}
	}
}

/// Position and size of one node, top-left anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Placement {
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// A network with one placement per node, index-aligned with `network.nodes`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaidOutNetwork {
	pub network: Network,
	pub placements: Vec<Placement>,
}

impl LaidOutNetwork {
	pub fn placement_of(&self, id: &str) -> Option<Placement> {
		self.network
			.index_of(id)
			.and_then(|idx| self.placements.get(idx).copied())
	}

	pub fn is_empty(&self) -> bool {
		self.network.nodes.is_empty()
	}
}
