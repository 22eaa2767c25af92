//! Mock citation network used when the page embeds no graph document.
//!
//! The generated crawl has one seed paper, 4 to 6 expanded ("lnp") papers
//! that the seed expands to, 3 to 5 cited references per expanded paper, and
//! a handful of cross-citations between references. Cross-citations always
//! point from a newer paper to a strictly older one.

use crate::components::force_graph::{
	Classification, EdgeKind, GraphData, GraphLink, GraphNode, NodeKind,
};

const TITLES: &[&str] = &[
	"Lipid Nanoparticles for mRNA Delivery",
	"Advancements in Cationic Lipids for Gene Therapy",
	"PEGylation of Nanoparticles to Improve Circulation Time",
	"Structural Analysis of Self-Assembled Lipid Systems",
	"Targeted Drug Delivery Using Functionalized Liposomes",
	"The Role of Helper Lipids in LNP Stability",
	"Microfluidic Synthesis of Monodisperse Nanoparticles",
	"In Vivo Efficacy of siRNA-Loaded LNPs",
	"Cryo-EM of Lipid Nanoparticle Morphologies",
	"Biodegradable Lipids for Safer Drug Delivery",
];

const AUTHORS: &[&[&str]] = &[
	&["Cullis, P. R.", "Hope, M. J."],
	&["Zamecnik, P. C.", "Stephenson, M. L."],
	&["Langer, R.", "Folkman, J."],
	&["Weissman, D.", "Karikó, K."],
	&["Akinc, A.", "Maier, M. A."],
	&["Semple, S. C.", "Chen, J."],
	&["Heyes, J. A.", "Leung, A. K."],
	&["Belliveau, N. M.", "Hu, F. T."],
];

const SEED_YEAR: i32 = 2018;

/// Give up on a cross-citation after this many rejected targets.
const MAX_ATTEMPTS: usize = 50;

/// Small deterministic generator; the layout and the mock data only need
/// reproducible variety, not statistical quality.
struct Lcg(u64);

impl Lcg {
	fn next_f64(&mut self) -> f64 {
		self.0 = self
			.0
			.wrapping_mul(6_364_136_223_846_793_005)
			.wrapping_add(1_442_695_040_888_963_407);
		(self.0 >> 11) as f64 / (1u64 << 53) as f64
	}

	/// Uniform integer in `min..=max`.
	fn range(&mut self, min: i32, max: i32) -> i32 {
		min + (self.next_f64() * (max - min + 1) as f64) as i32
	}

	fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
		let idx = (self.next_f64() * items.len() as f64) as usize;
		&items[idx.min(items.len() - 1)]
	}

	fn authors(&mut self) -> Vec<String> {
		self.pick(AUTHORS).iter().map(|a| a.to_string()).collect()
	}
}

#[allow(clippy::too_many_arguments)]
fn paper(
	id: String,
	kind: NodeKind,
	classification: Classification,
	title: String,
	year: i32,
	depth: u32,
	doi: String,
	rng: &mut Lcg,
) -> GraphNode {
	GraphNode {
		kind,
		year: Some(year),
		authors: rng.authors(),
		doi: Some(doi),
		depth: Some(depth),
		..GraphNode::new(id, classification, title)
	}
}

/// Generates a mock crawl. The same `seed` always yields the same graph.
pub fn generate_citation_graph(seed: u64) -> GraphData {
	let mut rng = Lcg(seed);
	let mut nodes = Vec::new();
	let mut links = Vec::new();

	let doi = format!("10.1038/nature{}", rng.range(10000, 99999));
	nodes.push(paper(
		"seed-0".into(),
		NodeKind::Seed,
		Classification::Seed,
		"A Foundational Paper on Lipid Nanoparticles for Vaccine Development".into(),
		SEED_YEAR,
		0,
		doi,
		&mut rng,
	));

	let lnp_count = rng.range(4, 6);
	let mut expanded = Vec::new();
	for i in 0..lnp_count {
		let id = format!("lnp-{i}");
		let year = SEED_YEAR + rng.range(1, 3);
		let title = format!("LNP Expansion: {}", rng.pick(TITLES));
		let doi = format!("10.1126/science.abc{}", rng.range(1000, 9999));
		nodes.push(paper(
			id.clone(),
			NodeKind::Expanded,
			Classification::Lnp,
			title,
			year,
			1,
			doi,
			&mut rng,
		));
		links.push(GraphLink::new("seed-0", id.clone(), EdgeKind::ExpandsTo));
		expanded.push((id, year));
	}

	let mut references = Vec::new();
	for (lnp_id, lnp_year) in &expanded {
		for i in 0..rng.range(3, 5) {
			let id = format!("peripheral-{lnp_id}-{i}");
			let year = lnp_year - rng.range(1, 10);
			let title = format!("Cited Work: {}", rng.pick(TITLES));
			let doi = format!("10.1021/acs.jmedchem.{}", rng.range(1000, 9999));
			nodes.push(paper(
				id.clone(),
				NodeKind::Reference,
				Classification::Peripheral,
				title,
				year,
				2,
				doi,
				&mut rng,
			));
			links.push(GraphLink::new(lnp_id.clone(), id.clone(), EdgeKind::Cites));
			references.push((id, year));
		}
	}

	if references.len() > 1 {
		for _ in 0..references.len().div_ceil(2) {
			let (source, source_year) = rng.pick(&references);
			let mut target = rng.pick(&references);
			let mut attempts = 0;
			while (target.0 == *source || target.1 >= *source_year) && attempts < MAX_ATTEMPTS {
				target = rng.pick(&references);
				attempts += 1;
			}
			if attempts == MAX_ATTEMPTS {
				continue;
			}
			let exists = links
				.iter()
				.any(|l: &GraphLink| l.source == *source && l.target == target.0);
			if !exists {
				links.push(GraphLink::new(source.clone(), target.0.clone(), EdgeKind::Cites));
			}
		}
	}

	GraphData { nodes, links }
}
