//! Graph view state and interaction tracking.
//!
//! Combines the prepared graph with the `force_graph` physics simulation,
//! the pan/zoom transform, pointer-channel dispatch, and the highlight state
//! machine. Created once when the component mounts, then mutated by event
//! handlers and the animation loop; nothing here runs concurrently.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::curvature::{self, DEFAULT_MAX_CURVATURE};
use super::graph::{GraphBuildError, LinkId, NodeId, PreparedGraph};
use super::highlight::HighlightState;
use super::scale::{ScaleConfig, ScaledValues};
use super::types::GraphData;

/// Polyline samples used when measuring pointer distance to a curved link.
const LINK_HIT_SAMPLES: usize = 24;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What the pointer currently rests on. When a node and a link are both
/// under the cursor the node wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerTarget {
	#[default]
	None,
	Node(NodeId),
	Link(LinkId),
}

/// Core view state: topology, physics, transform, and highlight.
///
/// The prepared graph is built first and the whole constructor fails on a
/// bad dataset, so a `GraphViewState` never holds a half-indexed graph.
pub struct GraphViewState {
	pub graph: PreparedGraph,
	sim: ForceGraph<NodeId, ()>,
	/// Simulation handle per node, indexed by [`NodeId`].
	handles: Vec<DefaultNodeIdx>,
	/// Radius multiplier per node, fixed at build time.
	sizes: Vec<f64>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	target: PointerTarget,
	/// Primary button state, tracked window-wide so presses that start
	/// outside the canvas still count.
	pub pointer_held: bool,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
}

impl GraphViewState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Result<Self, GraphBuildError> {
		Self::new_with_curvature(data, width, height, DEFAULT_MAX_CURVATURE)
	}

	pub fn new_with_curvature(
		data: &GraphData,
		width: f64,
		height: f64,
		max_curvature: f64,
	) -> Result<Self, GraphBuildError> {
		let graph = PreparedGraph::build(data, max_curvature)?;

		let mut sim = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let max_degree = graph
			.nodes()
			.iter()
			.map(|node| node.links.len())
			.max()
			.unwrap_or(1)
			.max(1);

		let mut handles = Vec::with_capacity(graph.nodes().len());
		let mut sizes = Vec::with_capacity(graph.nodes().len());
		for (id, node) in graph.nodes().iter().enumerate() {
			// Seed on a circle around the world origin; the view transform
			// puts the origin at the canvas center.
			let angle = (id as f64) * 2.0 * PI / graph.nodes().len() as f64;
			let (x, y) = ((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32);

			// Node importance: labeled nodes render larger, and degree
			// nudges the size further (sqrt for softer scaling).
			let edge_factor = (node.links.len() as f64 / max_degree as f64).sqrt();
			let size = if node.label.is_some() {
				1.4 + 0.6 * edge_factor
			} else {
				0.7 + 0.5 * edge_factor
			};

			handles.push(sim.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: id,
			}));
			sizes.push(size);
		}

		// Self-loops stay out of the simulation: a zero-length spring has
		// no defined direction. They are drawn and hit-tested regardless.
		for link in graph.links() {
			if !link.is_self_loop() {
				sim.add_edge(handles[link.source], handles[link.target], EdgeData::default());
			}
		}

		Ok(Self {
			graph,
			sim,
			handles,
			sizes,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::new(),
			target: PointerTarget::None,
			pointer_held: false,
			width,
			height,
			animation_running: true,
		})
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// World positions read out of the simulation, indexed by [`NodeId`].
	pub fn node_positions(&self) -> Vec<(f64, f64)> {
		let mut positions = vec![(0.0, 0.0); self.graph.nodes().len()];
		self.sim.visit_nodes(|node| {
			positions[node.data.user_data] = (node.x() as f64, node.y() as f64);
		});
		positions
	}

	pub fn node_size(&self, node: NodeId) -> f64 {
		self.sizes[node]
	}

	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.sim.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius * self.sizes[node.data.user_data];
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.data.user_data);
			}
		});
		found
	}

	/// Nearest link within the pick-up tolerance, measured against the same
	/// arc geometry the renderer draws.
	pub fn link_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<LinkId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let positions = self.node_positions();
		let mut found = None;
		let mut best = scale.link_hit_tolerance;
		for (id, link) in self.graph.links().iter().enumerate() {
			let (x1, y1) = positions[link.source];
			let (x2, y2) = positions[link.target];
			let distance = if link.is_self_loop() {
				let node_radius = scale.node_radius * self.sizes[link.source];
				let (cx, cy, r) = curvature::loop_geometry(x1, y1, node_radius, link.curvature);
				let (dx, dy) = (gx - cx, gy - cy);
				((dx * dx + dy * dy).sqrt() - r).abs()
			} else {
				curvature::distance_to_arc(gx, gy, x1, y1, x2, y2, link.curvature, LINK_HIT_SAMPLES)
			};
			if distance < best {
				best = distance;
				found = Some(id);
			}
		}
		found
	}

	/// Hit-test both element kinds, nodes first.
	pub fn pointer_target_at(&self, sx: f64, sy: f64, config: &ScaleConfig) -> PointerTarget {
		if let Some(node) = self.node_at_position(sx, sy, config) {
			PointerTarget::Node(node)
		} else if let Some(link) = self.link_at_position(sx, sy, config) {
			PointerTarget::Link(link)
		} else {
			PointerTarget::None
		}
	}

	/// Dispatch a pointer-target change to the highlight state machine.
	///
	/// Node and link hovers are separate channels. Moving within one
	/// channel re-fires it directly; crossing channels delivers the old
	/// channel's leave before the new channel's enter. An unchanged target
	/// fires nothing, so highlight cleared by a drag stays cleared until
	/// the pointer actually moves onto something else.
	pub fn set_hover(&mut self, target: PointerTarget) {
		if target == self.target {
			return;
		}
		let previous = std::mem::replace(&mut self.target, target);
		match (previous, target) {
			(PointerTarget::Node(_), PointerTarget::Node(id)) => {
				self.highlight.hover_node(&self.graph, Some(id), self.pointer_held);
			}
			(PointerTarget::Link(_), PointerTarget::Link(id)) => {
				self.highlight.hover_link(&self.graph, Some(id));
			}
			(previous, target) => {
				match previous {
					PointerTarget::Node(_) => {
						self.highlight.hover_node(&self.graph, None, self.pointer_held);
					}
					PointerTarget::Link(_) => self.highlight.hover_link(&self.graph, None),
					PointerTarget::None => {}
				}
				match target {
					PointerTarget::Node(id) => {
						self.highlight.hover_node(&self.graph, Some(id), self.pointer_held);
					}
					PointerTarget::Link(id) => self.highlight.hover_link(&self.graph, Some(id)),
					PointerTarget::None => {}
				}
			}
		}
	}

	/// Start dragging `node` from screen position (`sx`, `sy`).
	pub fn begin_drag(&mut self, node: NodeId, sx: f64, sy: f64) {
		let handle = self.handles[node];
		let mut start = (0.0f32, 0.0f32);
		self.sim.visit_nodes(|n| {
			if n.index() == handle {
				start = (n.x(), n.y());
			}
		});
		self.drag = DragState {
			active: true,
			node: Some(node),
			start_x: sx,
			start_y: sy,
			node_start_x: start.0,
			node_start_y: start.1,
		};
	}

	/// Move the dragged node to follow the pointer. Anchors the node in the
	/// simulation and adds its neighborhood to the highlight.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			return;
		}
		let Some(node) = self.drag.node else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		let handle = self.handles[node];
		self.sim.visit_nodes_mut(|n| {
			if n.index() == handle {
				n.data.x = nx;
				n.data.y = ny;
				n.data.is_anchor = true;
			}
		});
		self.highlight.drag_node(&self.graph, Some(node));
	}

	/// Finish a drag. The node stays anchored where it was dropped and the
	/// accumulated highlight is released.
	pub fn end_drag(&mut self) {
		if self.drag.active {
			self.highlight.drag_end();
		}
		self.drag.active = false;
		self.drag.node = None;
	}

	pub fn tick(&mut self, dt: f32) {
		self.sim.update(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
