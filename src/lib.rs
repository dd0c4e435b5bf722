//! graph-view: Interactive node-link graph visualization for the browser.
//!
//! This crate provides a WASM-based graph component that indexes a node-link
//! dataset, assigns curvatures so parallel links stay distinguishable, and
//! renders it with physics-based layout, pan/zoom, node dragging, and hover
//! highlight of connected neighborhoods.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph_view::{
	GraphBuildError, GraphData, GraphLink, GraphNode, GraphViewCanvas, HighlightState, LinkId,
	NodeId, NodeRef, PreparedGraph, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-view: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"graph-view: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("graph-view: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph data from the DOM and renders the interactive graph view.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// Load graph data from the DOM
	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Graph Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphViewCanvas data=graph_signal fullscreen=true />
			<div class="graph-overlay">
				<h1>"Graph Explorer"</h1>
				<p class="subtitle">"Hover to highlight connections. Drag nodes to reposition. Scroll to zoom."</p>
			</div>
		</div>
	}
}
