//! Transient highlight state driven by pointer events.
//!
//! One [`HighlightState`] lives for the component's whole lifetime. Event
//! handlers are its only writers and run to completion one at a time; the
//! renderer only reads, through the style callbacks in [`super::style`], and
//! never while a handler runs. Membership is tracked by [`NodeId`] /
//! [`LinkId`] so the sets stay cheap to copy into and test against.
//!
//! Handlers never fail: a `None` target is the ordinary "pointer left"
//! signal and clears rather than errors. Feeding an id from a previous
//! graph rebuild is a caller bug and panics on the lookup.

use std::collections::HashSet;

use super::graph::{LinkId, NodeId, PreparedGraph};

/// Currently highlighted nodes and links, plus the hover anchor.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	nodes: HashSet<NodeId>,
	links: HashSet<LinkId>,
	hovered: Option<NodeId>,
}

impl HighlightState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Pointer moved onto `node`, or off every node when `None`.
	///
	/// Without the pointer button held this replaces the current highlight.
	/// With it held the step is additive, which preserves highlight through
	/// a drag that begins on a hover; the button flag is tracked globally,
	/// so a press that started outside the canvas also suppresses the
	/// clear.
	pub fn hover_node(&mut self, graph: &PreparedGraph, node: Option<NodeId>, pointer_held: bool) {
		if !pointer_held {
			self.nodes.clear();
			self.links.clear();
		}
		if let Some(id) = node {
			self.grow(graph, id);
		}
		self.hovered = node;
	}

	/// Node dragged this frame. Purely additive, never clears: a drag that
	/// crosses several nodes accumulates all their neighborhoods.
	pub fn drag_node(&mut self, graph: &PreparedGraph, node: Option<NodeId>) {
		if let Some(id) = node {
			self.grow(graph, id);
		}
	}

	/// Drag finished: drop the whole highlight. A no-op clear when idle.
	pub fn drag_end(&mut self) {
		self.nodes.clear();
		self.links.clear();
	}

	/// Pointer moved onto `link`, or off every link when `None`. Always
	/// replaces the current highlight with the link and its two endpoints.
	pub fn hover_link(&mut self, graph: &PreparedGraph, link: Option<LinkId>) {
		self.nodes.clear();
		self.links.clear();
		if let Some(id) = link {
			let link = graph.link(id);
			self.links.insert(id);
			self.nodes.insert(link.source);
			self.nodes.insert(link.target);
		}
	}

	fn grow(&mut self, graph: &PreparedGraph, id: NodeId) {
		let node = graph.node(id);
		self.nodes.insert(id);
		self.nodes.extend(node.neighbors.iter().copied());
		self.links.extend(node.links.iter().copied());
	}

	/// Whether any node highlight is active; drives dimming of non-members.
	pub fn is_active(&self) -> bool {
		!self.nodes.is_empty()
	}

	pub fn contains_node(&self, id: NodeId) -> bool {
		self.nodes.contains(&id)
	}

	pub fn contains_link(&self, id: LinkId) -> bool {
		self.links.contains(&id)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Node the pointer currently rests on, if any. The style callbacks do
	/// not read this; it exists as a tooltip/inspector anchor for hosts.
	pub fn hovered(&self) -> Option<NodeId> {
		self.hovered
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_view::graph::PreparedGraph;
	use crate::components::graph_view::types::{GraphData, GraphLink, GraphNode};

	/// a-b, a-c, b-c, d isolated.
	fn diamondless() -> PreparedGraph {
		let data = GraphData {
			nodes: ["a", "b", "c", "d"]
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: None,
				})
				.collect(),
			links: vec![
				GraphLink::between("a", "b"),
				GraphLink::between("a", "c"),
				GraphLink::between("b", "c"),
			],
		};
		PreparedGraph::build(&data, 0.5).unwrap()
	}

	#[test]
	fn hover_highlights_node_and_neighborhood() {
		let graph = diamondless();
		let mut state = HighlightState::new();
		let a = graph.node_id("a").unwrap();

		state.hover_node(&graph, Some(a), false);

		for id in ["a", "b", "c"] {
			assert!(state.contains_node(graph.node_id(id).unwrap()));
		}
		assert!(!state.contains_node(graph.node_id("d").unwrap()));
		assert!(state.contains_link(0));
		assert!(state.contains_link(1));
		assert!(!state.contains_link(2));
		assert_eq!(state.hovered(), Some(a));
	}

	#[test]
	fn hover_off_clears_when_button_is_up() {
		let graph = diamondless();
		let mut state = HighlightState::new();

		state.hover_node(&graph, graph.node_id("a"), false);
		assert!(state.is_active());

		state.hover_node(&graph, None, false);
		assert!(!state.is_active());
		assert_eq!(state.link_count(), 0);
		assert_eq!(state.hovered(), None);
	}

	#[test]
	fn hover_off_keeps_highlight_while_button_is_held() {
		let graph = diamondless();
		let mut state = HighlightState::new();

		state.hover_node(&graph, graph.node_id("a"), false);
		let nodes_before = state.node_count();

		state.hover_node(&graph, None, true);
		assert_eq!(state.node_count(), nodes_before);
		assert_eq!(state.hovered(), None);
	}

	#[test]
	fn hover_with_button_held_is_additive() {
		let graph = diamondless();
		let mut state = HighlightState::new();
		let d = graph.node_id("d").unwrap();

		// d is isolated, so a plain hover highlights only d.
		state.hover_node(&graph, Some(d), false);
		assert_eq!(state.node_count(), 1);

		state.hover_node(&graph, graph.node_id("a"), true);
		assert!(state.contains_node(d));
		assert_eq!(state.node_count(), 4);
	}

	#[test]
	fn drag_accumulates_and_drag_end_clears() {
		let graph = diamondless();
		let mut state = HighlightState::new();

		state.drag_node(&graph, graph.node_id("d"));
		state.drag_node(&graph, graph.node_id("a"));
		assert_eq!(state.node_count(), 4);
		assert_eq!(state.link_count(), 2);

		state.drag_end();
		assert_eq!(state.node_count(), 0);
		assert_eq!(state.link_count(), 0);
	}

	#[test]
	fn drag_end_when_idle_is_a_noop_clear() {
		let mut state = HighlightState::new();
		state.drag_end();
		assert!(!state.is_active());
	}

	#[test]
	fn drag_without_target_changes_nothing() {
		let graph = diamondless();
		let mut state = HighlightState::new();
		state.drag_node(&graph, None);
		assert!(!state.is_active());
	}

	#[test]
	fn link_hover_replaces_any_prior_highlight() {
		let graph = diamondless();
		let mut state = HighlightState::new();

		state.hover_node(&graph, graph.node_id("a"), false);

		// b-c is link 2; hovering it must leave exactly that link and its
		// endpoints highlighted.
		state.hover_link(&graph, Some(2));
		assert_eq!(state.node_count(), 2);
		assert!(state.contains_node(graph.node_id("b").unwrap()));
		assert!(state.contains_node(graph.node_id("c").unwrap()));
		assert_eq!(state.link_count(), 1);
		assert!(state.contains_link(2));
	}

	#[test]
	fn link_hover_off_clears_unconditionally() {
		let graph = diamondless();
		let mut state = HighlightState::new();

		state.hover_node(&graph, graph.node_id("a"), false);
		state.hover_link(&graph, None);
		assert!(!state.is_active());
		assert_eq!(state.link_count(), 0);
	}

	#[test]
	fn self_loop_link_hover_highlights_one_endpoint() {
		let data = GraphData {
			nodes: vec![GraphNode {
				id: "a".to_string(),
				label: None,
			}],
			links: vec![GraphLink::between("a", "a")],
		};
		let graph = PreparedGraph::build(&data, 0.5).unwrap();
		let mut state = HighlightState::new();

		state.hover_link(&graph, Some(0));
		assert_eq!(state.node_count(), 1);
		assert_eq!(state.link_count(), 1);
	}
}
