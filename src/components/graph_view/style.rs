//! Per-element style decisions for the renderer.
//!
//! These are the pure counterpart of the drawing code: given the highlight
//! state and the active [`Theme`], they answer "what color is this node or
//! link right now". The renderer calls them once per element per frame, so
//! they stay allocation free.

use super::graph::{LinkId, NodeId, PreparedGraph};
use super::highlight::HighlightState;
use super::theme::{Color, Theme};

/// Node fill color.
///
/// While any highlight is active the graph splits into members (active
/// color) and everyone else (dimmed); with no highlight every node gets the
/// neutral color.
pub fn node_color(highlight: &HighlightState, theme: &Theme, node: NodeId) -> Color {
	if highlight.is_active() {
		if highlight.contains_node(node) {
			theme.node_active
		} else {
			theme.node_dimmed
		}
	} else {
		theme.node_neutral
	}
}

/// Link stroke color. Links have no dimmed tier: non-members keep the
/// neutral color even while a highlight is active.
pub fn link_color(highlight: &HighlightState, theme: &Theme, link: LinkId) -> Color {
	if highlight.contains_link(link) {
		theme.link_active
	} else {
		theme.link_neutral
	}
}

/// Curvature for a link, as assigned at build time. Zero means a straight
/// segment.
pub fn link_curvature(graph: &PreparedGraph, link: LinkId) -> f64 {
	graph.link(link).curvature
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_view::graph::PreparedGraph;
	use crate::components::graph_view::types::{GraphData, GraphLink, GraphNode};

	fn linked_pair_graph() -> PreparedGraph {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "a".to_string(),
					label: None,
				},
				GraphNode {
					id: "b".to_string(),
					label: None,
				},
				GraphNode {
					id: "c".to_string(),
					label: None,
				},
			],
			links: vec![GraphLink::between("a", "b")],
		};
		PreparedGraph::build(&data, 0.5).unwrap()
	}

	#[test]
	fn idle_graph_is_uniformly_neutral() {
		let graph = linked_pair_graph();
		let theme = Theme::dark();
		let highlight = HighlightState::new();

		for node in 0..graph.nodes().len() {
			assert_eq!(node_color(&highlight, &theme, node), theme.node_neutral);
		}
		assert_eq!(link_color(&highlight, &theme, 0), theme.link_neutral);
	}

	#[test]
	fn active_highlight_splits_nodes_into_members_and_dimmed() {
		let graph = linked_pair_graph();
		let theme = Theme::dark();
		let mut highlight = HighlightState::new();

		highlight.hover_node(&graph, graph.node_id("a"), false);

		let a = graph.node_id("a").unwrap();
		let b = graph.node_id("b").unwrap();
		let c = graph.node_id("c").unwrap();
		assert_eq!(node_color(&highlight, &theme, a), theme.node_active);
		assert_eq!(node_color(&highlight, &theme, b), theme.node_active);
		assert_eq!(node_color(&highlight, &theme, c), theme.node_dimmed);
		assert_eq!(link_color(&highlight, &theme, 0), theme.link_active);
	}

	#[test]
	fn non_member_links_stay_neutral_not_dimmed() {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "a".to_string(),
					label: None,
				},
				GraphNode {
					id: "b".to_string(),
					label: None,
				},
				GraphNode {
					id: "c".to_string(),
					label: None,
				},
				GraphNode {
					id: "d".to_string(),
					label: None,
				},
			],
			links: vec![GraphLink::between("a", "b"), GraphLink::between("c", "d")],
		};
		let graph = PreparedGraph::build(&data, 0.5).unwrap();
		let theme = Theme::dark();
		let mut highlight = HighlightState::new();

		highlight.hover_node(&graph, graph.node_id("a"), false);
		assert_eq!(link_color(&highlight, &theme, 1), theme.link_neutral);
	}

	#[test]
	fn curvature_lookup_matches_assignment() {
		// A parallel pair fans out to the extremes; the lone link stays
		// straight. The drawing layer reads these values through here.
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "a".to_string(),
					label: None,
				},
				GraphNode {
					id: "b".to_string(),
					label: None,
				},
				GraphNode {
					id: "c".to_string(),
					label: None,
				},
			],
			links: vec![
				GraphLink::between("a", "b"),
				GraphLink::between("a", "b"),
				GraphLink::between("b", "c"),
			],
		};
		let graph = PreparedGraph::build(&data, 0.5).unwrap();

		assert_eq!(link_curvature(&graph, 0), -0.5);
		assert_eq!(link_curvature(&graph, 1), 0.5);
		assert_eq!(link_curvature(&graph, 2), 0.0);
	}
}
