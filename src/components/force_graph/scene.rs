//! Backend-independent description of one frame.
//!
//! The canvas painter and the SVG exporter both consume a [`Scene`], so hover
//! and drag logic never touches a drawing API directly.

use std::collections::HashMap;

use force_graph::DefaultNodeIdx;

use super::state::ForceGraphState;
use super::theme::{Gradient, LabelPlacement, Theme};
use super::types::{NodeId, NodeKind};

/// Arrowheads are drawn at this size, in world units.
pub const ARROW_SIZE: f64 = 7.0;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
	from * (1.0 - t) + to * t
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowMarker {
	pub size: f64,
	pub color: String,
}

/// Shared paint definitions referenced by the shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct Defs {
	pub gradient: Option<Gradient>,
	pub glow: Option<f64>,
	pub arrow: Option<ArrowMarker>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
	Solid(String),
	/// The gradient declared in [`Defs`].
	Gradient,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	pub id: NodeId,
	pub kind: NodeKind,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub fill: Fill,
	pub stroke: String,
	pub stroke_width: f64,
	pub opacity: f64,
	pub label: String,
	/// Label offset from the node centre.
	pub label_dx: f64,
	pub label_dy: f64,
	pub label_anchor: LabelPlacement,
	/// 0 when idle, rising to 1 while the node is part of the hover highlight.
	pub emphasis: f64,
	pub hovered: bool,
	pub pinned: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	/// Endpoint radii so lines can stop at the node rim.
	pub source_radius: f64,
	pub target_radius: f64,
	pub stroke: String,
	pub width: f64,
	pub opacity: f64,
	pub arrow: bool,
	pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub background: String,
	pub defs: Defs,
	pub label_color: String,
	pub label_size: f64,
	/// Highlighted nodes come last so they paint on top.
	pub nodes: Vec<NodeShape>,
	pub edges: Vec<EdgeShape>,
}

impl Scene {
	pub fn build(state: &ForceGraphState, theme: &Theme) -> Self {
		let t = ease_out_cubic(state.hover.highlight_t);
		let active = state.has_active_highlight();
		let label_above = -(theme.max_radius() + 10.0);

		let mut nodes = Vec::with_capacity(state.node_count());
		let mut raised = Vec::new();
		let mut radii: HashMap<DefaultNodeIdx, f64> = HashMap::new();
		state.graph.visit_nodes(|node| {
			let idx = node.index();
			let info = &node.data.user_data;
			let style = theme.node_style(info.kind);
			radii.insert(idx, style.radius);
			let highlighted = active && state.is_highlighted(idx);
			let hovered = highlighted && state.is_hovered(idx);

			let (opacity, radius) = match (active, highlighted, hovered) {
				(false, _, _) => (1.0, style.radius),
				(true, false, _) => (lerp(1.0, theme.dim_node_opacity, t), style.radius),
				(true, true, true) => (1.0, style.radius * (1.0 + 0.35 * t)),
				(true, true, false) => (1.0, style.radius * (1.0 + 0.2 * t)),
			};
			let (label_dx, label_dy) = match theme.label_placement {
				LabelPlacement::Above => (0.0, label_above),
				LabelPlacement::Right => (radius + 4.0, 4.0),
			};

			let shape = NodeShape {
				id: info.id.clone(),
				kind: info.kind,
				x: node.x() as f64,
				y: node.y() as f64,
				radius,
				fill: match theme.gradient {
					Some(_) => Fill::Gradient,
					None => Fill::Solid(style.color.clone()),
				},
				stroke: theme.node_stroke.clone(),
				stroke_width: theme.node_stroke_width,
				opacity,
				label: info.label.clone(),
				label_dx,
				label_dy,
				label_anchor: theme.label_placement,
				emphasis: if highlighted { t } else { 0.0 },
				hovered,
				pinned: node.data.is_anchor,
			};
			if highlighted {
				raised.push(shape);
			} else {
				nodes.push(shape);
			}
		});
		nodes.extend(raised);

		let positions = state.positions();
		let radius_of = |idx: DefaultNodeIdx| radii.get(&idx).copied().unwrap_or(theme.fallback.radius);
		let edges = state
			.edges()
			.iter()
			.enumerate()
			.filter_map(|(i, &(src, tgt))| {
				let (&(x1, y1), &(x2, y2)) = (positions.get(&src)?, positions.get(&tgt)?);
				let highlighted = active && state.is_edge_highlighted(i);
				let (stroke, width, opacity) = match (active, highlighted) {
					(false, _) => (theme.edge_color.clone(), theme.edge_width, theme.edge_opacity),
					(true, true) => (
						theme.edge_highlight_color.clone(),
						lerp(theme.edge_width, theme.edge_highlight_width, t),
						lerp(theme.edge_opacity, 1.0, t),
					),
					(true, false) => (
						theme.edge_color.clone(),
						theme.edge_width,
						lerp(theme.edge_opacity, theme.dim_edge_opacity, t),
					),
				};
				Some(EdgeShape {
					x1,
					y1,
					x2,
					y2,
					source_radius: radius_of(src),
					target_radius: radius_of(tgt),
					stroke,
					width,
					opacity,
					arrow: theme.arrowheads,
					highlighted,
				})
			})
			.collect();

		Self {
			background: theme.background.clone(),
			defs: Defs {
				gradient: theme.gradient.clone(),
				glow: theme.glow,
				arrow: theme.arrowheads.then(|| ArrowMarker {
					size: ARROW_SIZE,
					color: theme.edge_color.clone(),
				}),
			},
			label_color: theme.label_color.clone(),
			label_size: theme.label_size,
			nodes,
			edges,
		}
	}

	pub fn node(&self, id: &NodeId) -> Option<&NodeShape> {
		self.nodes.iter().find(|n| &n.id == id)
	}
}
