//! Canvas rendering for the graph view.
//!
//! Draws background, links, then nodes, so nodes cover their link ends.
//! Links follow the curvature assigned at build time: straight segment,
//! quadratic arc, or a full circle for self-loops. Nodes render in two
//! passes so highlight members end up on top of dimmed neighbors.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::curvature;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::GraphViewState;
use super::style;
use super::theme::{Color, Theme};

/// Renders the complete graph to the canvas.
pub fn render(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let positions = state.node_positions();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, &scale, theme, &positions);
	draw_nodes(state, ctx, &scale, theme, &positions);

	ctx.restore();
}

fn draw_background(state: &GraphViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_links(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	positions: &[(f64, f64)],
) {
	ctx.set_line_width(scale.link_line_width);

	for (id, link) in state.graph.links().iter().enumerate() {
		let color = style::link_color(&state.highlight, theme, id);
		ctx.set_stroke_style_str(&color.to_css());

		let curve = style::link_curvature(&state.graph, id);
		let (x1, y1) = positions[link.source];
		let (x2, y2) = positions[link.target];

		if link.is_self_loop() {
			let node_radius = scale.node_radius * state.node_size(link.source);
			let (cx, cy, r) = curvature::loop_geometry(x1, y1, node_radius, curve);
			ctx.begin_path();
			let _ = ctx.arc(cx, cy, r, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		ctx.begin_path();
		ctx.move_to(x1, y1);
		if curve.abs() < 1e-9 {
			ctx.line_to(x2, y2);
		} else {
			let (cx, cy) = curvature::control_point(x1, y1, x2, y2, curve);
			let _ = ctx.quadratic_curve_to(cx, cy, x2, y2);
		}
		ctx.stroke();
	}
}

fn draw_nodes(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	positions: &[(f64, f64)],
) {
	// Highlight members render in the second pass, on top.
	for highlighted_pass in [false, true] {
		for (id, node) in state.graph.nodes().iter().enumerate() {
			if state.highlight.contains_node(id) != highlighted_pass {
				continue;
			}
			let (x, y) = positions[id];
			let radius = scale.node_radius * state.node_size(id);
			let color = style::node_color(&state.highlight, theme, id);
			draw_node(ctx, x, y, radius, color);

			// Dimmed nodes drop their labels so the highlighted
			// neighborhood reads clearly.
			let dimmed = state.highlight.is_active() && !highlighted_pass;
			if let Some(label) = &node.label {
				if !dimmed {
					ctx.set_fill_style_str(&theme.label.to_css());
					ctx.set_font(&scale.label_font);
					let _ = ctx.fill_text(label, x + radius + 4.0, y + 3.0);
				}
			}
		}
	}
}

/// Shaded sphere look: radial gradient offset towards the light.
fn draw_node(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: Color) {
	let gradient = ctx
		.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
		.unwrap();

	gradient.add_color_stop(0.0, &color.lighten(0.4).to_css()).unwrap();
	gradient.add_color_stop(0.7, &color.to_css()).unwrap();
	gradient.add_color_stop(1.0, &color.darken(0.2).to_css()).unwrap();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
