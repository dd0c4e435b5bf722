//! Graph data structures for input to the graph view component.

use std::fmt;

use serde::Deserialize;

/// A node in the input dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Optional display label, drawn next to highlighted nodes.
	pub label: Option<String>,
}

/// Reference to a node from a link endpoint.
///
/// Datasets in the wild address nodes either by position in the `nodes`
/// array or by id key; both deserialize here and are normalized away when
/// the graph is prepared.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
	Index(usize),
	Key(String),
}

impl fmt::Display for NodeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeRef::Index(idx) => write!(f, "index {idx}"),
			NodeRef::Key(key) => write!(f, "\"{key}\""),
		}
	}
}

/// An edge between two node references. Repeated endpoint pairs and
/// self-loops are allowed.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	pub source: NodeRef,
	pub target: NodeRef,
}

/// Complete input dataset: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphLink {
	/// Link between two node ids.
	pub fn between(source: &str, target: &str) -> Self {
		Self {
			source: NodeRef::Key(source.to_string()),
			target: NodeRef::Key(target.to_string()),
		}
	}
}
