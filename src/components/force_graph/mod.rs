//! Force-directed citation graph component.
//!
//! Renders an interactive citation network on an HTML canvas with:
//! - A force simulation (link springs, repulsion, centering, collision)
//! - Pan, zoom, and node dragging interactions
//! - Click selection that highlights a paper's direct neighbors
//! - Configurable theming and visual scaling
//!
//! # Example
//!
//! ```ignore
//! use citation_graph::{CitationGraphCanvas, Classification, EdgeKind, GraphData, GraphLink, GraphNode};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode::new("a", Classification::Seed, "Ionizable lipids"),
//!         GraphNode::new("b", Classification::Lnp, "mRNA delivery"),
//!     ],
//!     links: vec![GraphLink::new("a", "b", EdgeKind::ExpandsTo)],
//! };
//!
//! view! {
//!     <CitationGraphCanvas
//!         data=data.into()
//!         on_select=move |id: Option<String>| log::info!("selected {id:?}")
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
#[cfg(test)]
mod fixtures;
pub mod highlight;
pub mod interaction;
mod render;
pub mod scale;
pub mod selection;
pub mod simulation;
pub mod snapshot;
pub mod state;
pub mod theme;
pub mod transform;
mod types;

pub use component::CitationGraphCanvas;
pub use theme::Theme;
pub use types::{Classification, EdgeKind, GraphData, GraphLink, GraphNode, NodeKind};
