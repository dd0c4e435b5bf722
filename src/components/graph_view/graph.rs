//! Prepared graph: the node/link dataset after adjacency indexing and
//! curvature assignment, ready to hand to the rendering engine.
//!
//! Nodes and links cross-reference each other by position ([`NodeId`],
//! [`LinkId`]) rather than by pointer, so highlight sets and style lookups
//! work on plain copyable keys. A [`PreparedGraph`] is immutable once built
//! and is rebuilt from scratch whenever the input dataset changes; a build
//! either succeeds completely or fails with [`GraphBuildError`], never
//! leaving a partially linked graph behind.

use std::collections::HashMap;

use super::curvature;
use super::types::{GraphData, NodeRef};

/// Position of a node in [`PreparedGraph::nodes`]. Stable for the life of
/// one prepared graph.
pub type NodeId = usize;

/// Position of a link in [`PreparedGraph::links`].
pub type LinkId = usize;

/// A node with its adjacency index.
#[derive(Clone, Debug)]
pub struct Node {
	/// Identity key, unique within the dataset.
	pub id: String,
	pub label: Option<String>,
	/// One entry per incident link, in link-input order. A pair connected
	/// by several links repeats here; a self-loop contributes the node
	/// itself exactly once.
	pub neighbors: Vec<NodeId>,
	/// Incident links, in link-input order. Always the same length as
	/// `neighbors`.
	pub links: Vec<LinkId>,
}

/// A link with resolved endpoints and layout augmentations.
#[derive(Clone, Debug)]
pub struct Link {
	pub source: NodeId,
	pub target: NodeId,
	/// Canonical unordered-pair key: the two endpoint ids, lexicographically
	/// smaller first, joined with `_`. Links sharing a pair key are drawn as
	/// distinct arcs.
	pub pair_key: String,
	/// Signed bow applied when drawing; 0 for a straight line. Assigned by
	/// [`curvature::assign_curvatures`].
	pub curvature: f64,
}

impl Link {
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Why preparing a graph failed. Both variants are fatal for the rebuild:
/// the caller keeps its previous graph or shows an error, it never receives
/// a half-indexed one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphBuildError {
	/// A link endpoint does not resolve to any node in the dataset.
	#[error("link {link} references unknown node {reference}")]
	DanglingReference { link: usize, reference: String },
	/// The requested curvature bound cannot produce a fan-out.
	#[error("max curvature must be a positive finite number, got {0}")]
	InvalidCurvature(f64),
}

/// An indexed, curvature-assigned graph.
#[derive(Clone, Debug, Default)]
pub struct PreparedGraph {
	nodes: Vec<Node>,
	links: Vec<Link>,
	ids: HashMap<String, NodeId>,
}

impl PreparedGraph {
	/// Index the dataset and assign curvatures.
	///
	/// Link endpoints may reference nodes by array position or by id key;
	/// both are normalized to [`NodeId`]. An endpoint that resolves to
	/// nothing fails the whole build with
	/// [`GraphBuildError::DanglingReference`].
	pub fn build(data: &GraphData, max_curvature: f64) -> Result<Self, GraphBuildError> {
		let mut ids = HashMap::with_capacity(data.nodes.len());
		let mut nodes: Vec<Node> = Vec::with_capacity(data.nodes.len());
		for (idx, node) in data.nodes.iter().enumerate() {
			ids.insert(node.id.clone(), idx);
			nodes.push(Node {
				id: node.id.clone(),
				label: node.label.clone(),
				neighbors: Vec::new(),
				links: Vec::new(),
			});
		}

		let mut links = Vec::with_capacity(data.links.len());
		for (pos, link) in data.links.iter().enumerate() {
			let source = resolve(&ids, nodes.len(), &link.source).ok_or_else(|| {
				GraphBuildError::DanglingReference {
					link: pos,
					reference: link.source.to_string(),
				}
			})?;
			let target = resolve(&ids, nodes.len(), &link.target).ok_or_else(|| {
				GraphBuildError::DanglingReference {
					link: pos,
					reference: link.target.to_string(),
				}
			})?;
			links.push(Link {
				source,
				target,
				pair_key: pair_key(&nodes[source].id, &nodes[target].id),
				curvature: 0.0,
			});
		}

		// Register each link with both endpoints, in input order. A
		// self-loop node is its own neighbor, counted once.
		for (pos, link) in links.iter().enumerate() {
			if link.is_self_loop() {
				let node = &mut nodes[link.source];
				node.neighbors.push(link.source);
				node.links.push(pos);
			} else {
				nodes[link.source].neighbors.push(link.target);
				nodes[link.source].links.push(pos);
				nodes[link.target].neighbors.push(link.source);
				nodes[link.target].links.push(pos);
			}
		}

		curvature::assign_curvatures(&mut links, max_curvature)?;

		Ok(Self { nodes, links, ids })
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Node by position. Panics on an out-of-range id, which can only come
	/// from mixing ids across graph rebuilds.
	pub fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id]
	}

	/// Link by position. Panics on an out-of-range id.
	pub fn link(&self, id: LinkId) -> &Link {
		&self.links[id]
	}

	/// Look up a node by identity key.
	pub fn node_id(&self, key: &str) -> Option<NodeId> {
		self.ids.get(key).copied()
	}
}

fn resolve(ids: &HashMap<String, NodeId>, node_count: usize, node_ref: &NodeRef) -> Option<NodeId> {
	match node_ref {
		NodeRef::Index(idx) => (*idx < node_count).then_some(*idx),
		NodeRef::Key(key) => ids.get(key.as_str()).copied(),
	}
}

fn pair_key(a: &str, b: &str) -> String {
	if a <= b {
		format!("{a}_{b}")
	} else {
		format!("{b}_{a}")
	}
}
