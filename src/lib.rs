//! citation-graph: Interactive force-directed visualization of citation networks.
//!
//! This crate provides a WASM-based graph visualization component that renders
//! a paper crawl (seed, expanded papers, cited references) with physics-based
//! layout, pan/zoom, dragging, and click selection that highlights a paper's
//! direct citations. A side panel shows the selected paper's metadata.

use std::time::Duration;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod data;
pub mod error;

pub use components::detail_panel::DetailPanel;
pub use components::force_graph::{
	CitationGraphCanvas, Classification, EdgeKind, GraphData, GraphLink, GraphNode, NodeKind,
};
pub use error::LoadError;

/// Simulated fetch latency before mock data appears.
const MOCK_LOAD_DELAY: Duration = Duration::from_millis(1500);

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("citation-graph: logging initialized");
}

fn embedded_graph_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] } (`edges` is
/// accepted for `links`). Returns `Ok(None)` when the page embeds no graph.
pub fn load_graph_data() -> Result<Option<GraphData>, LoadError> {
	let Some(json_text) = embedded_graph_text() else {
		return Ok(None);
	};
	let data: GraphData = serde_json::from_str(&json_text)?;
	info!(
		"citation-graph: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Ok(Some(data))
}

#[derive(Clone, Debug)]
enum LoadState {
	Loading,
	Ready(GraphData),
	Failed(String),
}

impl From<LoadError> for LoadState {
	fn from(e: LoadError) -> Self {
		warn!("citation-graph: {}", e);
		LoadState::Failed(e.to_string())
	}
}

/// Main application component.
/// Loads graph data from the DOM (or generates a mock crawl) and renders the
/// graph with a detail panel for the selected paper.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let load_state = RwSignal::new(LoadState::Loading);
	let selected = RwSignal::new(None::<String>);

	match load_graph_data() {
		Ok(Some(data)) => load_state.set(LoadState::Ready(data)),
		Ok(None) => set_timeout(
			move || {
				let seed = js_sys::Date::now() as u64;
				info!("citation-graph: generating mock crawl (seed {})", seed);
				load_state.set(LoadState::Ready(data::generate_citation_graph(seed)));
			},
			MOCK_LOAD_DELAY,
		),
		Err(e) => load_state.set(e.into()),
	}

	let selected_node = Signal::derive(move || {
		let id = selected.get()?;
		load_state.with(|state| match state {
			LoadState::Ready(data) => data.nodes.iter().find(|n| n.id == id).cloned(),
			_ => None,
		})
	});

	let content = move || match load_state.get() {
		LoadState::Loading => view! {
			<div class="status">
				<p class="status-title">"Loading Knowledge Graph..."</p>
				<p>"Generating mock data for visualization..."</p>
			</div>
		}
		.into_any(),
		LoadState::Failed(message) => view! {
			<div class="status status--error">
				<h2>"Failed to Load Graph Data"</h2>
				<p>{message}</p>
			</div>
		}
		.into_any(),
		LoadState::Ready(graph_data) => {
			let graph_signal = Signal::derive(move || graph_data.clone());
			view! {
				<CitationGraphCanvas
					data=graph_signal
					on_select={move |id: Option<String>| selected.set(id)}
					fullscreen=true
				/>
				<DetailPanel node=selected_node />
			}
			.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Semantic Discovery Viewer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			{content}
			<div class="graph-overlay">
				<h1>"Semantic Discovery Viewer"</h1>
				<p class="subtitle">"Blueberry LNP Knowledge Crawler"</p>
			</div>
		</div>
	}
}
