use std::f64::consts::PI;

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::scene::{Defs, EdgeShape, Fill, NodeShape, Scene};
use super::state::{ForceGraphState, ViewTransform};
use super::theme::{LabelPlacement, Theme};

pub fn render(state: &ForceGraphState, theme: &Theme, ctx: &CanvasRenderingContext2d) {
	let scene = Scene::build(state, theme);
	paint(&scene, &state.transform, state.width, state.height, ctx);
}

pub fn paint(
	scene: &Scene,
	transform: &ViewTransform,
	width: f64,
	height: f64,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(&scene.background);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	for edge in &scene.edges {
		draw_edge(edge, &scene.defs, ctx);
	}
	for node in &scene.nodes {
		draw_node(node, &scene.defs, ctx);
	}
	let k = transform.k;
	ctx.set_font(&format!("{}px sans-serif", scene.label_size / k.max(0.5)));
	ctx.set_fill_style_str(&scene.label_color);
	for node in &scene.nodes {
		draw_label(node, ctx);
	}
	ctx.restore();
	ctx.set_global_alpha(1.0);
}

fn draw_edge(edge: &EdgeShape, defs: &Defs, ctx: &CanvasRenderingContext2d) {
	let (dx, dy) = (edge.x2 - edge.x1, edge.y2 - edge.y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let arrow_size = match (&defs.arrow, edge.arrow) {
		(Some(marker), true) => marker.size,
		_ => 0.0,
	};

	let (ux, uy) = (dx / dist, dy / dist);
	ctx.set_global_alpha(edge.opacity);
	ctx.set_stroke_style_str(&edge.stroke);
	ctx.set_line_width(edge.width);
	ctx.begin_path();
	ctx.move_to(edge.x1 + ux * edge.source_radius, edge.y1 + uy * edge.source_radius);
	ctx.line_to(
		edge.x2 - ux * (edge.target_radius + arrow_size),
		edge.y2 - uy * (edge.target_radius + arrow_size),
	);
	ctx.stroke();

	if arrow_size > 0.0 {
		ctx.set_fill_style_str(&edge.stroke);
		let (tip_x, tip_y) = (edge.x2 - ux * edge.target_radius, edge.y2 - uy * edge.target_radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_node(node: &NodeShape, defs: &Defs, ctx: &CanvasRenderingContext2d) {
	let (x, y, radius, t) = (node.x, node.y, node.radius, node.emphasis);

	if t > 0.01 {
		let glow_radius = if node.hovered {
			radius * (1.8 + 1.2 * t)
		} else {
			radius * (1.4 + 0.6 * t)
		};
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
			let alpha = if node.hovered { 0.35 * t } else { 0.2 * t };
			let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
			let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
			let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
			ctx.begin_path();
			let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
			set_fill_gradient(ctx, &gradient);
			ctx.fill();
		}
	}

	ctx.set_global_alpha(node.opacity);
	let solid = match &node.fill {
		Fill::Solid(color) => Some(color.as_str()),
		Fill::Gradient => None,
	};
	match (solid, &defs.gradient) {
		(Some(color), _) => ctx.set_fill_style_str(color),
		(None, Some(stops)) => {
			let gradient = ctx.create_linear_gradient(x - radius, y, x + radius, y);
			let _ = gradient.add_color_stop(0.0, &stops.from);
			let _ = gradient.add_color_stop(1.0, &stops.to);
			set_fill_gradient(ctx, &gradient);
		}
		(None, None) => ctx.set_fill_style_str("#cccccc"),
	}
	if let (Some(blur), Some(color)) = (defs.glow, solid) {
		ctx.set_shadow_blur(blur * 2.0);
		ctx.set_shadow_color(color);
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_color("transparent");

	ctx.set_stroke_style_str(&node.stroke);
	ctx.set_line_width(node.stroke_width);
	ctx.stroke();

	if node.hovered && t > 0.01 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 2.0, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
		ctx.set_line_width(1.5);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_label(node: &NodeShape, ctx: &CanvasRenderingContext2d) {
	if node.label.is_empty() {
		return;
	}
	ctx.set_global_alpha(node.opacity);
	ctx.set_text_align(match node.label_anchor {
		LabelPlacement::Above => "center",
		LabelPlacement::Right => "start",
	});
	let _ = ctx.fill_text(&node.label, node.x + node.label_dx, node.y + node.label_dy);
}

fn set_fill_gradient(ctx: &CanvasRenderingContext2d, gradient: &CanvasGradient) {
	#[allow(deprecated)]
	ctx.set_fill_style(gradient);
}
