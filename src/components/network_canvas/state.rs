use std::collections::HashSet;

use crate::network::{LaidOutNetwork, NodeKind};

pub const FIT_PADDING: f64 = 40.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
/// Screen pixels a press may travel and still count as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

#[derive(Clone, Debug)]
pub struct CanvasNode {
	pub id: String,
	pub kind: NodeKind,
	pub label: Vec<String>,
	pub critical: bool,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl CanvasNode {
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	pub fn radii(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Whether a world point falls inside the node's ellipse.
	pub fn contains(&self, gx: f64, gy: f64) -> bool {
		let (cx, cy) = self.center();
		let (rx, ry) = self.radii();
		if rx <= 0.0 || ry <= 0.0 {
			return false;
		}
		let (dx, dy) = ((gx - cx) / rx, (gy - cy) / ry);
		dx * dx + dy * dy <= 1.0
	}

	/// Point on the ellipse outline in direction `(ux, uy)` from the centre.
	pub fn boundary(&self, ux: f64, uy: f64) -> (f64, f64) {
		let (cx, cy) = self.center();
		let (rx, ry) = self.radii();
		let denom = ((ux / rx).powi(2) + (uy / ry).powi(2)).sqrt();
		if !denom.is_finite() || denom == 0.0 {
			return (cx, cy);
		}
		(cx + ux / denom, cy + uy / denom)
	}
}

#[derive(Clone, Debug)]
pub struct CanvasEdge {
	pub source: usize,
	pub target: usize,
	pub label: Vec<String>,
	pub critical: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

pub struct NetworkCanvasState {
	pub nodes: Vec<CanvasNode>,
	pub edges: Vec<CanvasEdge>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl NetworkCanvasState {
	pub fn new(data: &LaidOutNetwork, width: f64, height: f64) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.set_network(data);
		state
	}

	/// Replaces the drawn network and refits the view.
	pub fn set_network(&mut self, data: &LaidOutNetwork) {
		self.nodes = data
			.network
			.nodes
			.iter()
			.zip(&data.placements)
			.map(|(node, placement)| CanvasNode {
				id: node.id.clone(),
				kind: node.kind,
				label: node.label.clone(),
				critical: node.critical,
				x: placement.x,
				y: placement.y,
				width: placement.width,
				height: placement.height,
			})
			.collect();
		self.edges = data
			.network
			.edges
			.iter()
			.filter_map(|edge| {
				let source = data.network.index_of(&edge.source)?;
				let target = data.network.index_of(&edge.target)?;
				Some(CanvasEdge {
					source,
					target,
					label: edge.label.clone(),
					critical: edge.critical,
				})
			})
			.collect();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.fit();
	}

	/// Centres the network and zooms so it fits inside the canvas.
	pub fn fit(&mut self) {
		if self.nodes.is_empty() {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		}
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for node in &self.nodes {
			min_x = min_x.min(node.x);
			min_y = min_y.min(node.y);
			max_x = max_x.max(node.x + node.width);
			max_y = max_y.max(node.y + node.height);
		}
		let (bw, bh) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let (avail_w, avail_h) = (
			(self.width - 2.0 * FIT_PADDING).max(1.0),
			(self.height - 2.0 * FIT_PADDING).max(1.0),
		);
		let k = (avail_w / bw).min(avail_h / bh).clamp(MIN_ZOOM, 1.0);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes.iter().rposition(|node| node.contains(gx, gy))
	}

	pub fn begin_drag(&mut self, idx: usize, sx: f64, sy: f64) {
		let Some(node) = self.nodes.get(idx) else {
			return;
		};
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: node.x,
			node_start_y: node.y,
			moved: false,
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if dx.hypot(dy) > CLICK_TOLERANCE {
			self.drag.moved = true;
		}
		if !self.drag.moved {
			return;
		}
		let k = self.transform.k;
		if let Some(node) = self.nodes.get_mut(idx) {
			node.x = self.drag.node_start_x + dx / k;
			node.y = self.drag.node_start_y + dy / k;
		}
	}

	/// Ends a drag; returns the node id when the press never moved (a click).
	pub fn end_drag(&mut self) -> Option<String> {
		let clicked = match (self.drag.active, self.drag.node_idx, self.drag.moved) {
			(true, Some(idx), false) => self.nodes.get(idx).map(|node| node.id.clone()),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Zooms around a screen point; positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the previous highlight around so it can fade out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Advances the critical-edge dash animation and the hover fade.
	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
