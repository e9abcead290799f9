use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::neighbors::NeighborMap;
use super::theme::{SimulationConfig, ZoomConfig};
use super::types::{GraphData, NodeId, NodeKind};

/// Pointer distance (world units) within which a node counts as hit.
pub const HIT_RADIUS: f64 = 12.0;
/// Pointer distance (screen pixels) within which an edge counts as hit.
pub const EDGE_HIT_TOLERANCE: f64 = 4.0;

const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub fqname: String,
	pub kind: NodeKind,
	pub location: Option<String>,
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
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(DefaultNodeIdx),
	/// Position in the resolved edge list.
	Edge(usize),
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub target: Option<HoverTarget>,
	pub nodes: HashSet<DefaultNodeIdx>,
	pub edges: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_target: Option<HoverTarget>,
	pub prev_nodes: HashSet<DefaultNodeIdx>,
	pub prev_edges: HashSet<usize>,
	delay_t: f64,
}

/// Details shown in the tooltip for the hovered node.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipInfo {
	pub fqname: String,
	pub kind: NodeKind,
	pub location: Option<String>,
}

/// Cooling schedule driving the layout engine.
#[derive(Clone, Debug)]
pub struct Temperature {
	pub alpha: f64,
	pub alpha_target: f64,
	pub running: bool,
}

/// Simulation plus transient interaction state for one rendered graph.
///
/// A fresh value is built for every analysis; nothing carries over.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub temperature: Temperature,
	pub width: f64,
	pub height: f64,
	sim: SimulationConfig,
	zoom: ZoomConfig,
	neighbors: NeighborMap,
	id_to_idx: HashMap<NodeId, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphData,
		sim: &SimulationConfig,
		zoom: &ZoomConfig,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: sim.force_charge,
			force_spring: sim.force_spring,
			force_max: sim.force_max,
			node_speed: sim.node_speed,
			damping_factor: sim.damping_factor,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let count = data.nodes.len().max(1) as f64;
		let spread = 100.0_f64.max(10.0 * count.sqrt());
		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				warn!("duplicate node id {} skipped", node.id);
				continue;
			}
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (spread * angle.cos()) as f32,
				y: (spread * angle.sin()) as f32,
				mass: sim.node_mass,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					fqname: node.fqname.clone(),
					kind: node.kind,
					location: node.location.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				// Recursion shows up as a self-loop; the layout engine cannot take those.
				if src != tgt {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				edges.push((src, tgt));
			} else {
				warn!("link {} -> {} references a missing node", link.source, link.target);
			}
		}
		debug!(
			"simulation built with {} nodes and {} edges",
			id_to_idx.len(),
			edges.len()
		);

		Self {
			graph,
			neighbors: NeighborMap::build(data),
			id_to_idx,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			temperature: Temperature {
				alpha: 1.0,
				alpha_target: 0.0,
				running: true,
			},
			width,
			height,
			sim: sim.clone(),
			zoom: zoom.clone(),
		}
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx)] {
		&self.edges
	}

	pub fn neighbors(&self) -> &NeighborMap {
		&self.neighbors
	}

	pub fn node_index(&self, id: &NodeId) -> Option<DefaultNodeIdx> {
		self.id_to_idx.get(id).copied()
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::with_capacity(self.id_to_idx.len());
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn is_pinned(&self, idx: DefaultNodeIdx) -> bool {
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found: Option<(DefaultNodeIdx, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < HIT_RADIUS && found.is_none_or(|(_, best)| dist < best) {
				found = Some((node.index(), dist));
			}
		});
		found.map(|(idx, _)| idx)
	}

	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = EDGE_HIT_TOLERANCE / self.transform.k;
		let positions = self.positions();
		let mut found: Option<(usize, f64)> = None;
		for (i, (src, tgt)) in self.edges.iter().enumerate() {
			let (Some(&a), Some(&b)) = (positions.get(src), positions.get(tgt)) else {
				continue;
			};
			let dist = distance_to_segment((gx, gy), a, b);
			if dist < tolerance && found.is_none_or(|(_, best)| dist < best) {
				found = Some((i, dist));
			}
		}
		found.map(|(i, _)| i)
	}

	/// Nodes take precedence over the edges running underneath them.
	pub fn target_at_position(&self, sx: f64, sy: f64) -> Option<HoverTarget> {
		self.node_at_position(sx, sy)
			.map(HoverTarget::Node)
			.or_else(|| self.edge_at_position(sx, sy).map(HoverTarget::Edge))
	}

	pub fn set_hover(&mut self, target: Option<HoverTarget>) {
		if self.hover.target == target {
			return;
		}
		let was_hovering = self.hover.target.is_some();

		// Save previous state for fade-out
		if was_hovering && target.is_none() {
			self.hover.prev_target = self.hover.target.take();
			self.hover.prev_nodes = std::mem::take(&mut self.hover.nodes);
			self.hover.prev_edges = std::mem::take(&mut self.hover.edges);
		} else {
			self.hover.prev_target = None;
			self.hover.prev_nodes.clear();
			self.hover.prev_edges.clear();
		}

		self.hover.target = target;
		self.hover.nodes.clear();
		self.hover.edges.clear();

		match target {
			Some(HoverTarget::Node(idx)) => {
				self.hover.nodes.insert(idx);
				let id = self.node_id(idx);
				if let Some(ids) = id.and_then(|id| self.neighbors.neighbors(&id)) {
					for neighbor in ids {
						if let Some(&n) = self.id_to_idx.get(neighbor) {
							self.hover.nodes.insert(n);
						}
					}
				}
				for (i, &(src, tgt)) in self.edges.iter().enumerate() {
					if src == idx || tgt == idx {
						self.hover.edges.insert(i);
					}
				}
			}
			Some(HoverTarget::Edge(i)) => {
				if let Some(&(src, tgt)) = self.edges.get(i) {
					self.hover.nodes.insert(src);
					self.hover.nodes.insert(tgt);
					self.hover.edges.insert(i);
				}
			}
			None => {}
		}

		if target.is_some() && !was_hovering {
			self.hover.delay_t = 0.0;
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.nodes.contains(&idx) || self.hover.prev_nodes.contains(&idx)
	}

	pub fn is_edge_highlighted(&self, i: usize) -> bool {
		self.hover.edges.contains(&i) || self.hover.prev_edges.contains(&i)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.target == Some(HoverTarget::Node(idx))
			|| self.hover.prev_target == Some(HoverTarget::Node(idx))
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.target.is_some() || self.hover.prev_target.is_some()
	}

	pub fn hovered_node(&self) -> Option<DefaultNodeIdx> {
		match self.hover.target {
			Some(HoverTarget::Node(idx)) => Some(idx),
			_ => None,
		}
	}

	pub fn tooltip(&self) -> Option<TooltipInfo> {
		let idx = self.hovered_node()?;
		let mut info = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				let data = &node.data.user_data;
				info = Some(TooltipInfo {
					fqname: data.fqname.clone(),
					kind: data.kind,
					location: data.location.clone(),
				});
			}
		});
		info
	}

	/// Raises the alpha target and restarts a cooled simulation.
	pub fn reheat(&mut self, alpha_target: f64) {
		self.temperature.alpha_target = alpha_target;
		self.temperature.running = true;
	}

	pub fn is_running(&self) -> bool {
		self.temperature.running
	}

	/// Pointer pressed: grab the node under the cursor, or start panning.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.node_at_position(sx, sy) {
			let Some((nx, ny)) = self.node_position(idx) else {
				return;
			};
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: sx,
				start_y: sy,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
			};
			self.set_pinned(idx, Some((nx as f32, ny as f32)));
			self.set_hover(None);
			self.reheat(self.sim.drag_alpha_target);
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(sx - self.drag.start_x) / self.transform.k,
					(sy - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.set_pinned(idx, Some((nx, ny)));
			}
			return;
		}

		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
			return;
		}

		let target = self.target_at_position(sx, sy);
		self.set_hover(target);
	}

	/// Pointer released: a dragged node is let go and the layout cools again.
	pub fn pointer_up(&mut self) {
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				self.set_pinned(idx, None);
			}
			self.temperature.alpha_target = 0.0;
		}
		self.drag = DragState::default();
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Zooms around the cursor. Returns whether the event was consumed.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, alt_key: bool) -> bool {
		if delta_y == 0.0 || (self.zoom.require_alt && !alt_key) {
			return false;
		}
		let factor = if delta_y > 0.0 {
			WHEEL_ZOOM_OUT
		} else {
			WHEEL_ZOOM_IN
		};
		let new_k = self.zoom.clamp(self.transform.k * factor);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
		true
	}

	fn set_pinned(&mut self, idx: DefaultNodeIdx, at: Option<(f32, f32)>) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				match at {
					Some((x, y)) => {
						node.data.x = x;
						node.data.y = y;
						node.data.is_anchor = true;
					}
					None => node.data.is_anchor = false,
				}
			}
		});
	}

	fn node_id(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn tick(&mut self, dt: f32) {
		if self.temperature.running {
			let t = &mut self.temperature;
			t.alpha += (t.alpha_target - t.alpha) * self.sim.alpha_decay;
			self.graph.update(dt * t.alpha as f32);
			if t.alpha < self.sim.alpha_min {
				t.running = false;
				debug!("layout cooled");
			}
		}

		let (target, delay, speed) = if self.hover.target.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.target.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
			if 1.0 - self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 1.0;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_target = None;
				self.hover.prev_nodes.clear();
				self.hover.prev_edges.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		// Keep the graph centred in the new viewport.
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len_sq = abx * abx + aby * aby;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn node(id: &str, kind: NodeKind) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.to_uppercase(),
			fqname: format!("pkg.mod.{id}"),
			kind,
			location: Some(format!("mod.py:{}", id.len())),
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
		}
	}

	fn state(data: &GraphData) -> ForceGraphState {
		ForceGraphState::new(data, &SimulationConfig::default(), &ZoomConfig::default(), W, H)
	}

	fn to_screen(s: &ForceGraphState, idx: DefaultNodeIdx) -> (f64, f64) {
		let (x, y) = s.node_position(idx).unwrap();
		(
			x * s.transform.k + s.transform.x,
			y * s.transform.k + s.transform.y,
		)
	}

	fn settle(s: &mut ForceGraphState) {
		for _ in 0..600 {
			s.tick(0.016);
		}
	}

	fn pair() -> GraphData {
		GraphData {
			nodes: vec![node("a", NodeKind::Class), node("b", NodeKind::Function)],
			links: vec![link("a", "b")],
		}
	}

	#[test]
	fn dangling_links_are_dropped() {
		let mut data = pair();
		data.links.push(link("a", "missing"));
		let s = state(&data);
		assert_eq!(s.node_count(), 2);
		assert_eq!(s.edges().len(), 1);
	}

	#[test]
	fn hit_testing_prefers_nodes_then_edges() {
		let s = state(&pair());
		let a = s.node_index(&"a".into()).unwrap();
		let b = s.node_index(&"b".into()).unwrap();
		let (ax, ay) = to_screen(&s, a);
		let (bx, by) = to_screen(&s, b);

		assert_eq!(s.target_at_position(ax, ay), Some(HoverTarget::Node(a)));
		let (mx, my) = ((ax + bx) / 2.0, (ay + by) / 2.0);
		assert_eq!(s.target_at_position(mx, my), Some(HoverTarget::Edge(0)));
		assert_eq!(s.target_at_position(mx, my + 200.0), None);
	}

	#[test]
	fn hovering_node_highlights_exactly_first_degree_neighbors() {
		let data = GraphData {
			nodes: vec![
				node("a", NodeKind::Class),
				node("b", NodeKind::Function),
				node("c", NodeKind::Method),
				node("d", NodeKind::Method),
			],
			links: vec![link("a", "b"), link("c", "d"), link("b", "c")],
		};
		let mut s = state(&data);
		let idx = |id: &str| s.node_index(&id.into()).unwrap();
		let (a, b, c, d) = (idx("a"), idx("b"), idx("c"), idx("d"));

		s.set_hover(Some(HoverTarget::Node(a)));
		assert!(s.is_highlighted(a));
		assert!(s.is_highlighted(b));
		assert!(!s.is_highlighted(c));
		assert!(!s.is_highlighted(d));
		assert_eq!(s.hover.edges, HashSet::from([0]));
	}

	#[test]
	fn hovering_edge_highlights_its_endpoints() {
		let data = GraphData {
			nodes: vec![
				node("a", NodeKind::Class),
				node("b", NodeKind::Function),
				node("c", NodeKind::Method),
			],
			links: vec![link("a", "b"), link("b", "c")],
		};
		let mut s = state(&data);
		let idx = |id: &str| s.node_index(&id.into()).unwrap();
		let (a, b, c) = (idx("a"), idx("b"), idx("c"));

		s.set_hover(Some(HoverTarget::Edge(1)));
		assert!(!s.is_highlighted(a));
		assert!(s.is_highlighted(b));
		assert!(s.is_highlighted(c));
		assert!(s.is_edge_highlighted(1));
		assert!(!s.is_edge_highlighted(0));
	}

	#[test]
	fn highlight_fades_in_and_out() {
		let mut s = state(&pair());
		let a = s.node_index(&"a".into()).unwrap();

		s.set_hover(Some(HoverTarget::Node(a)));
		settle(&mut s);
		assert_eq!(s.hover.highlight_t, 1.0);

		s.set_hover(None);
		assert!(s.has_active_highlight(), "fade-out keeps the previous highlight");
		settle(&mut s);
		assert_eq!(s.hover.highlight_t, 0.0);
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn tooltip_describes_hovered_node() {
		let mut s = state(&pair());
		assert!(s.tooltip().is_none());
		let a = s.node_index(&"a".into()).unwrap();
		s.set_hover(Some(HoverTarget::Node(a)));
		let tip = s.tooltip().unwrap();
		assert_eq!(tip.fqname, "pkg.mod.a");
		assert_eq!(tip.kind, NodeKind::Class);
		assert_eq!(tip.location.as_deref(), Some("mod.py:1"));

		s.set_hover(Some(HoverTarget::Edge(0)));
		assert!(s.tooltip().is_none());
	}

	#[test]
	fn drag_pins_then_release_unpins() {
		let mut s = state(&pair());
		let a = s.node_index(&"a".into()).unwrap();
		let (sx, sy) = to_screen(&s, a);

		s.pointer_down(sx, sy);
		assert!(s.drag.active);
		assert!(s.is_pinned(a));
		assert_eq!(s.temperature.alpha_target, 0.3);

		s.pointer_move(sx + 40.0, sy - 20.0);
		let (x, y) = s.node_position(a).unwrap();
		let (x0, y0) = s.screen_to_graph(sx, sy);
		assert!((x - (x0 + 40.0)).abs() < 1e-3);
		assert!((y - (y0 - 20.0)).abs() < 1e-3);

		s.tick(0.016);
		let (px, py) = s.node_position(a).unwrap();
		assert_eq!((px, py), (x, y), "pinned node stays put while dragged");

		s.pointer_up();
		assert!(!s.drag.active);
		assert!(!s.is_pinned(a));
		assert_eq!(s.temperature.alpha_target, 0.0);

		for _ in 0..5 {
			s.tick(0.016);
		}
		assert_ne!(s.node_position(a).unwrap(), (x, y), "released node moves again");
	}

	#[test]
	fn drag_restarts_a_cooled_layout() {
		let mut s = state(&pair());
		for _ in 0..400 {
			s.tick(0.016);
		}
		assert!(!s.is_running());

		let a = s.node_index(&"a".into()).unwrap();
		let (sx, sy) = to_screen(&s, a);
		s.pointer_down(sx, sy);
		assert!(s.is_running());
		s.tick(0.016);
		assert!(s.is_running());
	}

	#[test]
	fn background_drag_pans() {
		let mut s = state(&pair());
		let (tx, ty) = (s.transform.x, s.transform.y);
		s.pointer_down(5.0, 5.0);
		assert!(s.pan.active);
		s.pointer_move(25.0, 15.0);
		assert_eq!((s.transform.x, s.transform.y), (tx + 20.0, ty + 10.0));
		s.pointer_up();
		assert!(!s.pan.active);
	}

	#[test]
	fn wheel_zoom_is_clamped_and_can_require_alt() {
		let mut s = state(&pair());
		for _ in 0..50 {
			s.wheel(400.0, 300.0, -1.0, false);
		}
		assert_eq!(s.transform.k, 3.0);

		let zoom = ZoomConfig {
			require_alt: true,
			..ZoomConfig::default()
		};
		let mut gated = ForceGraphState::new(&pair(), &SimulationConfig::default(), &zoom, W, H);
		assert!(!gated.wheel(400.0, 300.0, 1.0, false));
		assert_eq!(gated.transform.k, 1.0);
		assert!(gated.wheel(400.0, 300.0, 1.0, true));
		assert!((gated.transform.k - 0.9).abs() < 1e-9);
	}

	#[test]
	fn horizontal_scroll_is_not_consumed() {
		let mut s = state(&pair());
		assert!(!s.wheel(400.0, 300.0, 0.0, false));
		assert_eq!(s.transform.k, 1.0);
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let mut s = state(&pair());
		let before = s.screen_to_graph(123.0, 77.0);
		s.wheel(123.0, 77.0, -1.0, false);
		let after = s.screen_to_graph(123.0, 77.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn self_loops_are_kept_for_drawing_but_not_simulated() {
		let mut data = pair();
		data.links.push(link("a", "a"));
		let mut s = state(&data);
		assert_eq!(s.edges().len(), 2);
		s.tick(0.016);

		let a = s.node_index(&"a".into()).unwrap();
		s.set_hover(Some(HoverTarget::Node(a)));
		assert_eq!(s.hover.edges, HashSet::from([0, 1]));
	}

	#[test]
	fn empty_graph_ticks_without_panicking() {
		let mut s = state(&GraphData::default());
		s.tick(0.016);
		assert_eq!(s.node_count(), 0);
		assert!(s.target_at_position(400.0, 300.0).is_none());
	}

	#[test]
	fn segment_distance() {
		assert_eq!(distance_to_segment((0.0, 1.0), (-1.0, 0.0), (1.0, 0.0)), 1.0);
		assert_eq!(distance_to_segment((3.0, 0.0), (-1.0, 0.0), (1.0, 0.0)), 2.0);
		assert_eq!(distance_to_segment((0.0, 2.0), (0.0, 0.0), (0.0, 0.0)), 2.0);
	}
}
