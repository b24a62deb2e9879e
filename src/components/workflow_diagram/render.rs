//! Projection of simulation state onto SVG attributes.

use std::f64::consts::SQRT_2;

use super::config::LayoutConfig;
use super::simulation::{Point, SimNode};
use super::types::{Category, WorkflowGraph};

/// Baseline shift that centers a single line of text on its anchor.
const BASELINE_EM: f64 = 0.35;

/// Gap between a link label's last baseline and the connector, in px.
const LINK_LABEL_GAP: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	Circle { r: f64 },
	/// Square of side `side` rotated 45 degrees about the node anchor.
	Diamond { side: f64 },
}

impl Shape {
	pub fn for_category(category: Category, config: &LayoutConfig) -> Self {
		let r = config.radius(category);
		match category {
			Category::Process => Shape::Circle { r },
			// corners touch the radius
			Category::Decision => Shape::Diamond { side: r * SQRT_2 },
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelLine {
	pub text: String,
	/// Offset from the previous line, in em.
	pub dy_em: f64,
}

fn stack_lines(
	label: &str,
	line_height_em: f64,
	first_baseline: impl Fn(usize) -> f64,
) -> Vec<LabelLine> {
	let lines: Vec<&str> = label.split('\n').collect();
	let first = first_baseline(lines.len());

	lines
		.into_iter()
		.enumerate()
		.map(|(i, text)| LabelLine {
			text: text.to_string(),
			dy_em: if i == 0 { first } else { line_height_em },
		})
		.collect()
}

/// Splits a label on explicit line breaks, centering the block vertically.
pub fn wrap_label(label: &str, line_height_em: f64) -> Vec<LabelLine> {
	stack_lines(label, line_height_em, |n| {
		BASELINE_EM - (n - 1) as f64 * line_height_em / 2.0
	})
}

/// Splits a label on explicit line breaks so the last line sits on the anchor.
pub fn wrap_label_above(label: &str, line_height_em: f64) -> Vec<LabelLine> {
	stack_lines(label, line_height_em, |n| -((n - 1) as f64) * line_height_em)
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	pub id: u32,
	pub category: Category,
	pub position: Point,
	pub shape: Shape,
	pub lines: Vec<LabelLine>,
}

impl NodeView {
	pub fn transform(&self) -> String {
		format!("translate({},{})", self.position.x, self.position.y)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkView {
	pub source: Point,
	pub target: Point,
	pub lines: Vec<LabelLine>,
}

impl LinkView {
	pub fn path(&self) -> String {
		format!(
			"M{},{}L{},{}",
			self.source.x, self.source.y, self.target.x, self.target.y
		)
	}

	pub fn midpoint(&self) -> Point {
		Point::new(
			(self.source.x + self.target.x) / 2.0,
			(self.source.y + self.target.y) / 2.0,
		)
	}

	/// Places the label just above the connector's midpoint.
	pub fn label_transform(&self) -> String {
		let mid = self.midpoint();
		format!("translate({},{})", mid.x, mid.y - LINK_LABEL_GAP)
	}
}

/// Everything drawn for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<NodeView>,
	pub links: Vec<LinkView>,
}

impl Scene {
	pub fn project(graph: &WorkflowGraph, config: &LayoutConfig, positions: &[SimNode]) -> Self {
		let at = |idx: usize| positions.get(idx).map(SimNode::position).unwrap_or_default();

		let nodes = graph
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| NodeView {
				id: node.id,
				category: node.category,
				position: at(i),
				shape: Shape::for_category(node.category, config),
				lines: wrap_label(&node.label, config.line_height_em),
			})
			.collect();

		let links = graph
			.links()
			.iter()
			.zip(graph.edges())
			.map(|(link, &(s, t))| LinkView {
				source: at(s),
				target: at(t),
				lines: link
					.label
					.as_deref()
					.map(|label| wrap_label_above(label, config.line_height_em))
					.unwrap_or_default(),
			})
			.collect();

		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow_diagram::data::sample_workflow;
	use crate::components::workflow_diagram::simulation::Simulation;

	#[test]
	fn shape_follows_category() {
		let config = LayoutConfig::default();
		assert_eq!(
			Shape::for_category(Category::Process, &config),
			Shape::Circle { r: 25.0 }
		);
		assert_eq!(
			Shape::for_category(Category::Decision, &config),
			Shape::Diamond {
				side: 30.0 * SQRT_2
			}
		);
	}

	#[test]
	fn two_line_label_is_stacked_and_centered() {
		let lines = wrap_label("Work Order\nReceived", 1.2);

		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0].text, "Work Order");
		assert_eq!(lines[1].text, "Received");

		// absolute baselines sit symmetrically around the single-line baseline
		let first = lines[0].dy_em;
		let second = first + lines[1].dy_em;
		assert!(((first + second) / 2.0 - BASELINE_EM).abs() < 1e-12);
		assert!((second - first - 1.2).abs() < 1e-12);
	}

	#[test]
	fn single_line_label_is_unshifted() {
		let lines = wrap_label("Assembly", 1.2);
		assert_eq!(
			lines,
			vec![LabelLine {
				text: "Assembly".into(),
				dy_em: BASELINE_EM,
			}]
		);
	}

	#[test]
	fn link_label_sits_above_its_anchor() {
		let lines = wrap_label_above("No", 1.2);
		assert_eq!(lines[0].dy_em, 0.0);

		let lines = wrap_label_above("a\nb\nc", 1.2);
		let last = lines.iter().map(|l| l.dy_em).sum::<f64>();
		assert!(last.abs() < 1e-12);
	}

	#[test]
	fn label_is_split_only_on_line_breaks() {
		let lines = wrap_label("Invoice to a very long accounting system name", 1.2);
		assert_eq!(lines.len(), 1);
	}

	#[test]
	fn connectors_track_node_positions_every_frame() {
		let graph = sample_workflow().unwrap();
		let config = LayoutConfig::default();
		let mut sim = Simulation::new(&graph, &config);

		for _ in 0..20 {
			sim.step();
			let scene = Scene::project(&graph, &config, sim.nodes());
			for (i, link) in scene.links.iter().enumerate() {
				let (s, t) = graph.endpoints(i).unwrap();
				assert_eq!(link.source, sim.nodes()[s].position());
				assert_eq!(link.target, sim.nodes()[t].position());
			}
			for (view, node) in scene.nodes.iter().zip(sim.nodes()) {
				assert_eq!(view.position, node.position());
			}
		}
	}

	#[test]
	fn projection_is_idempotent() {
		let graph = sample_workflow().unwrap();
		let config = LayoutConfig::default();
		let mut sim = Simulation::new(&graph, &config);
		sim.step();

		let first = Scene::project(&graph, &config, sim.nodes());
		let second = Scene::project(&graph, &config, sim.nodes());
		assert_eq!(first, second);
		assert_eq!(
			first.nodes.iter().map(NodeView::transform).collect::<Vec<_>>(),
			second.nodes.iter().map(NodeView::transform).collect::<Vec<_>>()
		);
	}

	#[test]
	fn link_attributes_use_source_and_target() {
		let link = LinkView {
			source: Point::new(10.0, 20.0),
			target: Point::new(30.5, 40.0),
			lines: Vec::new(),
		};
		assert_eq!(link.path(), "M10,20L30.5,40");
		assert_eq!(link.label_transform(), "translate(20.25,25)");
	}

	#[test]
	fn labelled_links_carry_wrapped_text() {
		let graph = sample_workflow().unwrap();
		let config = LayoutConfig::default();
		let sim = Simulation::new(&graph, &config);
		let scene = Scene::project(&graph, &config, sim.nodes());

		// 7 -> 8 "Tim/Mayco\nDiscuss"
		let discuss = &scene.links[6];
		assert_eq!(
			discuss.lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>(),
			["Tim/Mayco", "Discuss"]
		);
		// last line rests on the anchor above the stroke
		assert_eq!(discuss.lines[0].dy_em + discuss.lines[1].dy_em, 0.0);
		assert!(scene.links[0].lines.is_empty());
	}
}
