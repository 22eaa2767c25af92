//! Canvas rendering for the citation graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges with arrowheads (world space)
//! 3. Nodes in snapshot order, the dragged node last, then labels on top
//! 4. Vignette (screen space)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::Body;
use super::state::ForceGraphState;
use super::theme::{Color, Theme};

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8)
				.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.width.min(state.height) * 0.3,
		cx,
		cy,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let bodies = state.simulation.bodies();
	let arrow_size = theme.edge.arrow_size * scale.arrow_scale;

	for (idx, link) in state.snapshot.links().iter().enumerate() {
		let (source, target) = (&bodies[link.source], &bodies[link.target]);
		let (dx, dy) = (target.x - source.x, target.y - source.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < source.radius + target.radius {
			continue;
		}

		let opacity = state.highlight.edge_opacity(idx);
		let color = theme.edge.color(link.kind);
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(&color.with_alpha(opacity * color.a).to_css());
		ctx.set_line_width(theme.edge.width(link.kind));
		ctx.begin_path();
		ctx.move_to(source.x + ux * source.radius, source.y + uy * source.radius);
		ctx.line_to(
			target.x - ux * (target.radius + arrow_size),
			target.y - uy * (target.radius + arrow_size),
		);
		ctx.stroke();

		draw_arrow(ctx, target, (ux, uy), arrow_size, theme.edge.arrow, opacity);
	}
}

fn draw_arrow(
	ctx: &CanvasRenderingContext2d,
	target: &Body,
	(ux, uy): (f64, f64),
	size: f64,
	color: Color,
	opacity: f64,
) {
	let (tip_x, tip_y) = (target.x - ux * target.radius, target.y - uy * target.radius);
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.set_fill_style_str(&color.with_alpha(opacity * color.a).to_css());
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let order = state.draw_order();

	for idx in order.clone() {
		draw_node(state, ctx, theme, idx);
	}

	ctx.set_font(&scale.label_font);
	for idx in order {
		let visible = state.highlight.label_visible(idx) || state.hovered == Some(idx);
		if visible {
			draw_label(state, ctx, scale, theme, idx);
		}
	}
}

fn draw_node(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme, idx: usize) {
	let (Some(body), Some(node), Some(visual)) = (
		state.simulation.bodies().get(idx),
		state.snapshot.node(idx),
		state.highlight.node(idx),
	) else {
		return;
	};
	let (x, y, radius) = (body.x, body.y, body.radius);
	let base_color = theme.node.fill(node.classification);

	ctx.set_global_alpha(visual.opacity);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base_color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base_color.to_css());
			let _ = gradient.add_color_stop(1.0, &base_color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base_color.to_css()),
	}
	ctx.fill();

	ctx.set_stroke_style_str(&visual.stroke.to_css());
	ctx.set_line_width(visual.stroke_width);
	ctx.stroke();

	ctx.set_global_alpha(1.0);
}

fn draw_label(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	idx: usize,
) {
	let (Some(body), Some(node), Some(visual)) = (
		state.simulation.bodies().get(idx),
		state.snapshot.node(idx),
		state.highlight.node(idx),
	) else {
		return;
	};

	ctx.set_global_alpha(visual.opacity);
	ctx.set_fill_style_str(&theme.label.to_css());
	let _ = ctx.fill_text(&node.label(), body.x + body.radius + scale.label_offset, body.y + 4.0);
	ctx.set_global_alpha(1.0);
}
