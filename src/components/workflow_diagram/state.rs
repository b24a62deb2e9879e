use log::info;

use super::config::LayoutConfig;
use super::drag::DragController;
use super::render::Scene;
use super::simulation::{Point, Simulation};
use super::types::WorkflowGraph;

/// Everything one mounted diagram owns.
pub struct DiagramState {
	pub graph: WorkflowGraph,
	pub config: LayoutConfig,
	pub simulation: Simulation,
	pub drag: DragController,
}

impl DiagramState {
	pub fn new(graph: WorkflowGraph, config: LayoutConfig) -> Self {
		let simulation = Simulation::new(&graph, &config);
		let drag = DragController::new(config.drag_alpha_target);
		info!(
			"Diagram ready: {} steps, {} transitions",
			graph.nodes().len(),
			graph.links().len()
		);
		Self {
			graph,
			config,
			simulation,
			drag,
		}
	}

	pub fn scene(&self) -> Scene {
		Scene::project(&self.graph, &self.config, self.simulation.nodes())
	}

	/// Runs one layout step. Returns whether another frame is needed.
	pub fn advance(&mut self) -> bool {
		self.simulation.step();
		self.is_animating()
	}

	pub fn is_animating(&self) -> bool {
		!self.simulation.is_quiescent()
	}

	pub fn start_drag(&mut self, node: usize) -> bool {
		self.drag.start(&mut self.simulation, node)
	}

	pub fn drag_to(&mut self, point: Point) -> bool {
		self.drag.drag(&mut self.simulation, point)
	}

	pub fn end_drag(&mut self) -> Option<usize> {
		self.drag.end(&mut self.simulation)
	}
}
