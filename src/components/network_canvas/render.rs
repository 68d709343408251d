use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasNode, NetworkCanvasState};
use crate::network::NodeKind;

const BACKGROUND: &str = "#ffffff";
const CRITICAL: &str = "#dc2626";
const NORMAL_EDGE: &str = "#334155";
const ARROW_SIZE: f64 = 12.0;
const LINE_HEIGHT: f64 = 14.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn node_colors(node: &CanvasNode) -> (&'static str, &'static str) {
	match node.kind {
		NodeKind::Start => ("#10b981", "#047857"),
		NodeKind::End => ("#3b82f6", "#1e40af"),
		NodeKind::Task if node.critical => ("#fef2f2", CRITICAL),
		NodeKind::Task => ("#f1f5f9", "#475569"),
	}
}

pub fn render(state: &NetworkCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_edge_labels(state, ctx);
	ctx.restore();
}

fn edge_alpha(state: &NetworkCanvasState, source: usize, target: usize) -> f64 {
	if !state.has_active_highlight() {
		return 1.0;
	}
	let t = ease_out_cubic(state.hover.highlight_t);
	if state.is_highlighted(source) && state.is_highlighted(target) {
		1.0
	} else {
		1.0 - 0.75 * t
	}
}

fn draw_edges(state: &NetworkCanvasState, ctx: &CanvasRenderingContext2d) {
	let (dash, gap) = (8.0, 4.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for edge in &state.edges {
		let (Some(n1), Some(n2)) = (state.nodes.get(edge.source), state.nodes.get(edge.target)) else {
			continue;
		};
		let ((x1, y1), (x2, y2)) = (n1.center(), n2.center());
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = dx.hypot(dy);
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let (sx, sy) = n1.boundary(ux, uy);
		let (tip_x, tip_y) = n2.boundary(-ux, -uy);

		let color = if edge.critical { CRITICAL } else { NORMAL_EDGE };
		ctx.set_global_alpha(edge_alpha(state, edge.source, edge.target));
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(if edge.critical { 3.0 } else { 2.0 });
		if edge.critical {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		ctx.begin_path();
		ctx.move_to(sx, sy);
		ctx.line_to(tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(color);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_edge_labels(state: &NetworkCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for edge in state.edges.iter().filter(|edge| !edge.label.is_empty()) {
		let (Some(n1), Some(n2)) = (state.nodes.get(edge.source), state.nodes.get(edge.target)) else {
			continue;
		};
		let ((x1, y1), (x2, y2)) = (n1.center(), n2.center());
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);

		ctx.set_font(if edge.critical {
			"bold 11px sans-serif"
		} else {
			"11px sans-serif"
		});
		let text_width = edge
			.label
			.iter()
			.filter_map(|line| ctx.measure_text(line).ok())
			.map(|metrics| metrics.width())
			.fold(0.0, f64::max);
		let block_height = edge.label.len() as f64 * LINE_HEIGHT;

		ctx.set_global_alpha(0.8 * edge_alpha(state, edge.source, edge.target));
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill_rect(
			mx - text_width / 2.0 - 3.0,
			my - block_height / 2.0 - 2.0,
			text_width + 6.0,
			block_height + 4.0,
		);
		ctx.set_global_alpha(edge_alpha(state, edge.source, edge.target));
		ctx.set_fill_style_str(if edge.critical { CRITICAL } else { "#000000" });
		let top = my - block_height / 2.0 + LINE_HEIGHT / 2.0;
		for (i, line) in edge.label.iter().enumerate() {
			let _ = ctx.fill_text(line, mx, top + i as f64 * LINE_HEIGHT);
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &NetworkCanvasState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	for (idx, node) in state.nodes.iter().enumerate() {
		let (cx, cy) = node.center();
		let (rx, ry) = node.radii();
		let dimmed = has_highlight && !state.is_highlighted(idx);
		let alpha = if dimmed { 1.0 - 0.6 * t } else { 1.0 };

		if state.is_hovered(idx) && t > 0.01 {
			if let Ok(gradient) =
				ctx.create_radial_gradient(cx, cy, rx.min(ry) * 0.5, cx, cy, rx.max(ry) * 1.3)
			{
				let _ = gradient.add_color_stop(0.0, &format!("rgba(59, 130, 246, {})", 0.35 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(59, 130, 246, 0)");
				ctx.begin_path();
				let _ = ctx.ellipse(cx, cy, rx * 1.3, ry * 1.3, 0.0, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		let (fill, border) = node_colors(node);
		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.ellipse(cx, cy, rx, ry, 0.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(border);
		ctx.set_line_width(if node.critical { 3.0 } else { 2.0 });
		ctx.stroke();

		draw_node_label(node, ctx);
		ctx.set_global_alpha(1.0);
	}
}

fn draw_node_label(node: &CanvasNode, ctx: &CanvasRenderingContext2d) {
	let (cx, cy) = node.center();
	let text_color = match node.kind {
		NodeKind::Start | NodeKind::End => "#ffffff",
		NodeKind::Task => "#111827",
	};
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(text_color);

	let line_height = LINE_HEIGHT * 1.3;
	let top = cy - (node.label.len() as f64 - 1.0) * line_height / 2.0;
	for (i, line) in node.label.iter().enumerate() {
		ctx.set_font(if i == 0 {
			"bold 14px sans-serif"
		} else {
			"13px sans-serif"
		});
		let _ = ctx.fill_text(line, cx, top + i as f64 * line_height);
	}
}
