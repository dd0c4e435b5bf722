//! Interactive node-link graph view.
//!
//! Renders a graph dataset on an HTML canvas with:
//! - Adjacency indexing and per-link curvature assignment at build time
//! - Hover and drag highlight of a node's neighborhood
//! - Pan, zoom, and node dragging interactions
//! - Physics-based node positioning via force simulation
//!
//! The non-visual core (graph preparation, curvature, highlight, style) is
//! plain Rust and usable without a browser; only the component and renderer
//! touch the DOM.
//!
//! # Example
//!
//! ```ignore
//! use graph_view::{GraphViewCanvas, GraphData, GraphNode, GraphLink};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "a".into(), label: Some("Node A".into()) },
//!         GraphNode { id: "b".into(), label: Some("Node B".into()) },
//!     ],
//!     links: vec![GraphLink::between("a", "b")],
//! };
//!
//! view! { <GraphViewCanvas data=data.into() fullscreen=true /> }
//! ```

mod component;
pub mod curvature;
pub mod graph;
pub mod highlight;
mod render;
pub mod scale;
mod state;
pub mod style;
pub mod theme;
mod types;

pub use component::GraphViewCanvas;
pub use curvature::DEFAULT_MAX_CURVATURE;
pub use graph::{GraphBuildError, LinkId, NodeId, PreparedGraph};
pub use highlight::HighlightState;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, NodeRef};
