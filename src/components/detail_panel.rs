//! Side panel showing the metadata of the selected paper.

use leptos::prelude::*;

use super::force_graph::{GraphNode, Theme};

/// Shows the selected paper, or a placeholder when nothing is selected.
///
/// The classification badge uses the same fill color as the node on the
/// canvas.
#[component]
pub fn DetailPanel(#[prop(into)] node: Signal<Option<GraphNode>>) -> impl IntoView {
	let theme = Theme::default();

	move || match node.get() {
		None => view! {
			<aside class="detail-panel detail-panel--empty">
				<h3>"No Paper Selected"</h3>
				<p>"Click on a node in the graph to view its details."</p>
			</aside>
		}
		.into_any(),
		Some(node) => {
			let badge = format!(
				"background-color: {};",
				theme.node.fill(node.classification).to_css()
			);
			let authors = (!node.authors.is_empty()).then(|| node.authors.join(", "));

			view! {
				<aside class="detail-panel">
					<header>
						<span class="badge" style=badge>{node.classification.as_str()}</span>
						{node.year.map(|year| view! { <span class="year">{year}</span> })}
					</header>
					<h2>{node.title.clone()}</h2>
					{authors.map(|authors| view! { <p class="authors">{authors}</p> })}
					{node.doi.clone().map(|doi| view! { <p class="doi">"DOI: " {doi}</p> })}
					<hr />
					<h4>"Details"</h4>
					<ul>
						<li><strong>"Type: "</strong>{node.kind.as_str()}</li>
						{node.depth.map(|depth| view! { <li><strong>"Crawl Depth: "</strong>{depth}</li> })}
						<li><strong>"ID: "</strong><code>{node.id.clone()}</code></li>
					</ul>
				</aside>
			}
			.into_any()
		}
	}
}
