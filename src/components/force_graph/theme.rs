//! Cosmetic and behavioural configuration for the graph view.

use super::types::NodeKind;

/// Radius and fill for one kind of node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	pub radius: f64,
	pub color: String,
}

impl NodeStyle {
	fn new(radius: f64, color: &str) -> Self {
		Self {
			radius,
			color: color.into(),
		}
	}
}

/// Two-stop gradient used as node fill instead of the per-kind color.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
	pub from: String,
	pub to: String,
}

/// Where node labels sit relative to the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPlacement {
	Above,
	Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	pub background: String,
	pub class: NodeStyle,
	pub function: NodeStyle,
	pub method: NodeStyle,
	pub fallback: NodeStyle,
	pub gradient: Option<Gradient>,
	/// Blur radius of the node glow, `None` disables it.
	pub glow: Option<f64>,
	pub node_stroke: String,
	pub node_stroke_width: f64,
	pub edge_color: String,
	pub edge_width: f64,
	pub edge_opacity: f64,
	pub edge_highlight_color: String,
	pub edge_highlight_width: f64,
	pub dim_node_opacity: f64,
	pub dim_edge_opacity: f64,
	pub arrowheads: bool,
	pub label_color: String,
	pub label_size: f64,
	pub label_placement: LabelPlacement,
}

impl Theme {
	/// Per-kind colors with glow and arrowheads on a dark background.
	pub fn aurora() -> Self {
		Self {
			background: "#0b1020".into(),
			class: NodeStyle::new(8.0, "#a48bff"),
			function: NodeStyle::new(6.0, "#00d4ff"),
			method: NodeStyle::new(5.0, "#ff9f6b"),
			fallback: NodeStyle::new(6.0, "#cccccc"),
			gradient: None,
			glow: Some(2.0),
			node_stroke: "rgba(255, 255, 255, 0.6)".into(),
			node_stroke_width: 0.8,
			edge_color: "#9fb3ff".into(),
			edge_width: 1.1,
			edge_opacity: 0.35,
			edge_highlight_color: "#a8d1ff".into(),
			edge_highlight_width: 1.1,
			dim_node_opacity: 0.12,
			dim_edge_opacity: 0.06,
			arrowheads: true,
			label_color: "#eaf2ff".into(),
			label_size: 10.0,
			label_placement: LabelPlacement::Above,
		}
	}

	/// Uniform gradient-filled nodes with labels to the right.
	pub fn gradient() -> Self {
		let node = NodeStyle::new(10.0, "#7c5cff");
		Self {
			background: "#0f172a".into(),
			class: node.clone(),
			function: node.clone(),
			method: node.clone(),
			fallback: node,
			gradient: Some(Gradient {
				from: "#7c5cff".into(),
				to: "#00e0b8".into(),
			}),
			glow: None,
			node_stroke: "#0b1220".into(),
			node_stroke_width: 1.5,
			edge_color: "#1e293b".into(),
			edge_width: 1.2,
			edge_opacity: 0.6,
			edge_highlight_color: "#ffffff".into(),
			edge_highlight_width: 2.4,
			dim_node_opacity: 0.12,
			dim_edge_opacity: 0.06,
			arrowheads: false,
			label_color: "#dbe9ff".into(),
			label_size: 12.0,
			label_placement: LabelPlacement::Right,
		}
	}

	pub fn node_style(&self, kind: NodeKind) -> &NodeStyle {
		match kind {
			NodeKind::Class => &self.class,
			NodeKind::Function => &self.function,
			NodeKind::Method => &self.method,
			NodeKind::Unknown => &self.fallback,
		}
	}

	/// Largest node radius, used to keep labels clear of every node size.
	pub fn max_radius(&self) -> f64 {
		[&self.class, &self.function, &self.method, &self.fallback]
			.iter()
			.map(|s| s.radius)
			.fold(0.0, f64::max)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::aurora()
	}
}

/// Layout engine parameters plus the cooling schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_mass: f32,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Alpha target while a node is dragged.
	pub drag_alpha_target: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001_f64;
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomConfig {
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Only zoom on wheel events while Alt is held; plain scrolling is left to the page.
	pub require_alt: bool,
}

impl ZoomConfig {
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min_zoom, self.max_zoom)
	}
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.2,
			max_zoom: 3.0,
			require_alt: false,
		}
	}
}

/// Everything the graph view can be parameterized with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphConfig {
	pub theme: Theme,
	pub simulation: SimulationConfig,
	pub zoom: ZoomConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn aurora_sizes_by_kind() {
		let theme = Theme::aurora();
		assert_eq!(theme.node_style(NodeKind::Class).radius, 8.0);
		assert_eq!(theme.node_style(NodeKind::Function).radius, 6.0);
		assert_eq!(theme.node_style(NodeKind::Method).radius, 5.0);
		assert_eq!(theme.node_style(NodeKind::Unknown).color, "#cccccc");
		assert_eq!(theme.max_radius(), 8.0);
	}

	#[test]
	fn default_decay_cools_in_about_300_ticks() {
		let sim = SimulationConfig::default();
		let mut alpha = 1.0;
		let mut ticks = 0;
		while alpha >= sim.alpha_min {
			alpha += (0.0 - alpha) * sim.alpha_decay;
			ticks += 1;
		}
		assert!((299..=301).contains(&ticks), "ticks = {ticks}");
	}

	#[test]
	fn zoom_is_clamped() {
		let zoom = ZoomConfig::default();
		assert_eq!(zoom.clamp(10.0), 3.0);
		assert_eq!(zoom.clamp(0.01), 0.2);
		assert_eq!(zoom.clamp(1.5), 1.5);
	}
}
