//! Standalone SVG export of a [`Scene`].

use std::fmt::Write;

use super::scene::{EdgeShape, Fill, NodeShape, Scene};
use super::state::ViewTransform;
use super::theme::LabelPlacement;

const GRADIENT_ID: &str = "gradNode";
const GLOW_ID: &str = "glow";
const ARROW_ID: &str = "arrow";

/// Escapes text for use in XML content and attribute values.
pub fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			c => out.push(c),
		}
	}
	out
}

pub fn to_svg(scene: &Scene, width: f64, height: f64, transform: &ViewTransform) -> String {
	let mut out = String::new();
	let _ = write!(
		out,
		r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
		w = width,
		h = height
	);
	let _ = write!(
		out,
		r#"<rect width="100%" height="100%" fill="{}"/>"#,
		escape(&scene.background)
	);
	write_defs(scene, &mut out);

	let _ = write!(
		out,
		r#"<g class="zoom-layer" transform="translate({},{}) scale({})">"#,
		transform.x, transform.y, transform.k
	);
	out.push_str(r#"<g class="links">"#);
	for edge in &scene.edges {
		write_edge(edge, &mut out);
	}
	out.push_str("</g>");
	out.push_str(r#"<g class="nodes">"#);
	for node in &scene.nodes {
		write_node(scene, node, &mut out);
	}
	out.push_str("</g></g></svg>");
	out
}

fn write_defs(scene: &Scene, out: &mut String) {
	out.push_str("<defs>");
	if let Some(blur) = scene.defs.glow {
		let _ = write!(
			out,
			r#"<filter id="{GLOW_ID}"><feGaussianBlur stdDeviation="{blur}" result="blur"/><feMerge><feMergeNode in="blur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#
		);
	}
	if let Some(gradient) = &scene.defs.gradient {
		let _ = write!(
			out,
			r#"<linearGradient id="{GRADIENT_ID}" x1="0%" x2="100%"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
			escape(&gradient.from),
			escape(&gradient.to)
		);
	}
	if let Some(arrow) = &scene.defs.arrow {
		let _ = write!(
			out,
			r#"<marker id="{ARROW_ID}" viewBox="0 -5 10 10" refX="10" refY="0" markerWidth="{s}" markerHeight="{s}" markerUnits="userSpaceOnUse" orient="auto"><path d="M0,-5L10,0L0,5" fill="{c}"/></marker>"#,
			s = arrow.size,
			c = escape(&arrow.color)
		);
	}
	out.push_str("</defs>");
}

fn write_edge(edge: &EdgeShape, out: &mut String) {
	let (dx, dy) = (edge.x2 - edge.x1, edge.y2 - edge.y1);
	let dist = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
	let (ux, uy) = (dx / dist, dy / dist);
	let _ = write!(
		out,
		r#"<line class="edge" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-opacity="{}""#,
		edge.x1 + ux * edge.source_radius,
		edge.y1 + uy * edge.source_radius,
		edge.x2 - ux * edge.target_radius,
		edge.y2 - uy * edge.target_radius,
		escape(&edge.stroke),
		edge.width,
		edge.opacity
	);
	if edge.arrow {
		let _ = write!(out, r#" marker-end="url(#{ARROW_ID})""#);
	}
	out.push_str("/>");
}

fn write_node(scene: &Scene, node: &NodeShape, out: &mut String) {
	let fill = match &node.fill {
		Fill::Solid(color) => escape(color),
		Fill::Gradient => format!("url(#{GRADIENT_ID})"),
	};
	let _ = write!(
		out,
		r#"<g class="node" data-id="{}" data-kind="{}" transform="translate({:.2},{:.2})" opacity="{}">"#,
		escape(node.id.as_str()),
		node.kind,
		node.x,
		node.y,
		node.opacity
	);
	let _ = write!(
		out,
		r#"<circle r="{}" fill="{}" stroke="{}" stroke-width="{}""#,
		node.radius,
		fill,
		escape(&node.stroke),
		node.stroke_width
	);
	if scene.defs.glow.is_some() {
		let _ = write!(out, r#" filter="url(#{GLOW_ID})""#);
	}
	out.push_str("/>");
	let anchor = match node.label_anchor {
		LabelPlacement::Above => "middle",
		LabelPlacement::Right => "start",
	};
	let _ = write!(
		out,
		r#"<text x="{}" y="{}" text-anchor="{}" font-size="{}" fill="{}">{}</text></g>"#,
		node.label_dx,
		node.label_dy,
		anchor,
		scene.label_size,
		escape(&scene.label_color),
		escape(&node.label)
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::state::ForceGraphState;
	use crate::components::force_graph::theme::{SimulationConfig, Theme, ZoomConfig};
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode, NodeKind};

	fn scene_for(data: &GraphData, theme: &Theme) -> (Scene, ViewTransform) {
		let state = ForceGraphState::new(
			data,
			&SimulationConfig::default(),
			&ZoomConfig::default(),
			640.0,
			480.0,
		);
		(Scene::build(&state, theme), state.transform.clone())
	}

	fn data() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode {
					id: "0".into(),
					label: "Parser<T>".into(),
					fqname: "pkg.Parser".into(),
					kind: NodeKind::Class,
					location: None,
				},
				GraphNode {
					id: "1".into(),
					label: "parse".into(),
					fqname: "pkg.Parser.parse".into(),
					kind: NodeKind::Method,
					location: None,
				},
				GraphNode {
					id: "2".into(),
					label: "main".into(),
					fqname: "pkg.main".into(),
					kind: NodeKind::Function,
					location: None,
				},
			],
			links: vec![
				GraphLink {
					source: "2".into(),
					target: "0".into(),
				},
				GraphLink {
					source: "0".into(),
					target: "1".into(),
				},
			],
		}
	}

	#[test]
	fn one_element_per_node_and_edge() {
		let (scene, transform) = scene_for(&data(), &Theme::aurora());
		let svg = to_svg(&scene, 640.0, 480.0, &transform);
		assert!(svg.starts_with("<svg"));
		assert!(svg.ends_with("</svg>"));
		assert_eq!(svg.matches("<circle").count(), 3);
		assert_eq!(svg.matches("<line").count(), 2);
		assert_eq!(svg.matches(r#"marker-end="url(#arrow)""#).count(), 2);
		assert!(svg.contains(r#"<filter id="glow">"#));
		assert!(svg.contains(r#"<marker id="arrow""#));
	}

	#[test]
	fn gradient_theme_references_its_gradient() {
		let (scene, transform) = scene_for(&data(), &Theme::gradient());
		let svg = to_svg(&scene, 640.0, 480.0, &transform);
		assert!(svg.contains(r#"<linearGradient id="gradNode""#));
		assert_eq!(svg.matches(r#"fill="url(#gradNode)""#).count(), 3);
		assert!(!svg.contains("marker-end"));
		assert!(!svg.contains(r#"filter="url(#glow)""#));
	}

	#[test]
	fn labels_are_escaped() {
		let (scene, transform) = scene_for(&data(), &Theme::aurora());
		let svg = to_svg(&scene, 640.0, 480.0, &transform);
		assert!(svg.contains("Parser&lt;T&gt;"));
		assert!(!svg.contains("Parser<T>"));
	}

	#[test]
	fn escape_handles_quotes() {
		assert_eq!(escape(r#"a"b'c&"#), "a&quot;b&#39;c&amp;");
	}
}
