//! Node positioning for derived networks.
//!
//! - [`layered`]: breadth-first layers keyed on satisfied prerequisites (form editor)
//! - [`hierarchical`]: longest-path ranks, top-to-bottom or left-to-right (graph editor)
//! - [`force`]: `force_graph` relaxation seeded from the hierarchical layout
//!
//! Every strategy is deterministic.

pub mod force;
pub mod hierarchical;
pub mod layered;

use std::fmt;

use crate::config::LayoutConfig;
use crate::network::{LaidOutNetwork, Network};

pub use force::force_directed;
pub use hierarchical::hierarchical;
pub use layered::layered;

/// Rank direction of the hierarchical layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
	#[default]
	TopToBottom,
	LeftToRight,
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::TopToBottom => write!(f, "Vertical (Haut → Bas)"),
			Self::LeftToRight => write!(f, "Horizontal (Gauche → Droite)"),
		}
	}
}

/// Layout choices offered by the graph editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskLayout {
	Hierarchical(Direction),
	Force,
}

impl Default for TaskLayout {
	fn default() -> Self {
		Self::Hierarchical(Direction::default())
	}
}

impl fmt::Display for TaskLayout {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Hierarchical(direction) => direction.fmt(f),
			Self::Force => write!(f, "Libre (forces)"),
		}
	}
}

impl TaskLayout {
	pub const ALL: [Self; 3] = [
		Self::Hierarchical(Direction::TopToBottom),
		Self::Hierarchical(Direction::LeftToRight),
		Self::Force,
	];

	pub fn apply(self, network: Network, config: &LayoutConfig) -> LaidOutNetwork {
		match self {
			Self::Hierarchical(direction) => hierarchical(network, direction, config),
			Self::Force => force_directed(network, config),
		}
	}
}
