use log::debug;

use super::simulation::{Point, Simulation};

/// Pointer drag state: start pins a node, moves follow the pointer and end
/// releases it back to the layout.
#[derive(Clone, Debug, Default)]
pub struct DragController {
	node: Option<usize>,
	alpha_target: f64,
}

impl DragController {
	pub fn new(alpha_target: f64) -> Self {
		Self {
			node: None,
			alpha_target,
		}
	}

	#[cfg(test)]
	pub fn active(&self) -> Option<usize> {
		self.node
	}

	/// Begins dragging `node`, waking the layout if no drag was in progress.
	pub fn start(&mut self, sim: &mut Simulation, node: usize) -> bool {
		let Some(position) = sim.position(node) else {
			return false;
		};

		match self.node.replace(node) {
			// a missed end event; release the stale node
			Some(previous) => {
				sim.unpin(previous);
			}
			None => {
				sim.set_alpha_target(self.alpha_target);
				sim.restart();
			}
		}
		sim.pin(node, position);
		debug!("Drag started on node {node}");
		true
	}

	pub fn drag(&mut self, sim: &mut Simulation, point: Point) -> bool {
		match self.node {
			Some(node) => sim.pin(node, point),
			None => false,
		}
	}

	/// Releases the dragged node and lets the layout cool down again.
	pub fn end(&mut self, sim: &mut Simulation) -> Option<usize> {
		let node = self.node.take()?;
		sim.set_alpha_target(0.0);
		sim.unpin(node);
		debug!("Drag ended on node {node}");
		Some(node)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow_diagram::config::LayoutConfig;
	use crate::components::workflow_diagram::data::sample_workflow;

	fn settled() -> Simulation {
		let mut sim = Simulation::new(&sample_workflow().unwrap(), &LayoutConfig::default());
		while sim.step() {}
		sim
	}

	#[test]
	fn start_wakes_quiescent_layout_and_pins_in_place() {
		let mut sim = settled();
		let mut drag = DragController::new(0.3);
		let before = sim.position(4).unwrap();

		assert!(drag.start(&mut sim, 4));
		assert_eq!(drag.active(), Some(4));
		assert!(!sim.is_quiescent());
		assert_eq!(sim.alpha_target(), 0.3);
		assert_eq!(sim.nodes()[4].pin, Some(before));
	}

	#[test]
	fn move_follows_pointer() {
		let mut sim = settled();
		let mut drag = DragController::new(0.3);
		drag.start(&mut sim, 2);

		let pointer = Point::new(120.0, 80.0);
		assert!(drag.drag(&mut sim, pointer));
		sim.step();
		assert_eq!(sim.position(2), Some(pointer));

		let pointer = Point::new(640.0, 410.0);
		drag.drag(&mut sim, pointer);
		sim.step();
		sim.step();
		assert_eq!(sim.position(2), Some(pointer));
	}

	#[test]
	fn energy_rises_while_dragging() {
		let mut sim = settled();
		let mut drag = DragController::new(0.3);
		let start_alpha = sim.alpha();
		drag.start(&mut sim, 0);
		for _ in 0..10 {
			sim.step();
		}
		assert!(sim.alpha() > start_alpha);
	}

	#[test]
	fn end_unpins_and_cools_down() {
		let mut sim = settled();
		let mut drag = DragController::new(0.3);
		drag.start(&mut sim, 7);
		drag.drag(&mut sim, Point::new(10.0, 10.0));
		sim.step();

		assert_eq!(drag.end(&mut sim), Some(7));
		assert_eq!(drag.active(), None);
		assert_eq!(sim.nodes()[7].pin, None);
		assert_eq!(sim.alpha_target(), 0.0);

		let mut steps = 0;
		while sim.step() {
			steps += 1;
			assert!(steps < 1_000);
		}
		assert!(sim.is_quiescent());
	}

	#[test]
	fn moves_and_ends_without_a_drag_are_ignored() {
		let mut sim = settled();
		let mut drag = DragController::new(0.3);

		assert!(!drag.drag(&mut sim, Point::new(1.0, 1.0)));
		assert_eq!(drag.end(&mut sim), None);
		assert!(sim.is_quiescent());
	}

	#[test]
	fn restarting_a_drag_releases_the_previous_node() {
		let mut sim = settled();
		let mut drag = DragController::new(0.3);
		drag.start(&mut sim, 1);
		drag.start(&mut sim, 5);

		assert_eq!(sim.nodes()[1].pin, None);
		assert!(sim.nodes()[5].pin.is_some());
		assert_eq!(drag.active(), Some(5));
	}

	#[test]
	fn unknown_node_does_not_start_a_drag() {
		let mut sim = settled();
		let mut drag = DragController::new(0.3);
		assert!(!drag.start(&mut sim, 400));
		assert!(sim.is_quiescent());
	}
}
