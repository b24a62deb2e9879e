use std::f64::consts::PI;

use log::debug;

use super::config::LayoutConfig;
use super::forces::{self, LinkForce, Lcg};
use super::types::WorkflowGraph;

const INITIAL_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Per-node physics state. A present `pin` holds the node in place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub pin: Option<Point>,
}

impl SimNode {
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}
}

pub enum SimulationEvent<'a> {
	/// Positions were updated by one tick.
	Tick { alpha: f64, nodes: &'a [SimNode] },
	/// Alpha dropped below the minimum; stepping is paused.
	End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SimulationEvent<'_>)>;

/// Force-directed layout over a [`WorkflowGraph`].
///
/// Energy (`alpha`) decays toward `alpha_target` every tick. Once it falls
/// below `alpha_min` the simulation stops stepping until [`restart`] is
/// called.
///
/// [`restart`]: Simulation::restart
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: LinkForce,
	rng: Lcg,
	alpha: f64,
	alpha_target: f64,
	alpha_min: f64,
	alpha_decay: f64,
	velocity_decay: f64,
	charge_strength: f64,
	collision_radius: f64,
	center: (f64, f64),
	running: bool,
	ticks: u64,
	listeners: Vec<(SubscriptionId, Listener)>,
	next_subscription: u64,
}

impl Simulation {
	pub fn new(graph: &WorkflowGraph, config: &LayoutConfig) -> Self {
		let (cx, cy) = config.center();
		let angle_step = PI * (3.0 - 5f64.sqrt());

		// phyllotaxis spiral around the canvas center
		let nodes: Vec<SimNode> = (0..graph.nodes().len())
			.map(|i| {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * angle_step;
				SimNode {
					x: cx + radius * angle.cos(),
					y: cy + radius * angle.sin(),
					..SimNode::default()
				}
			})
			.collect();

		debug!(
			"Starting layout for {} nodes and {} links",
			nodes.len(),
			graph.links().len()
		);

		Self {
			links: LinkForce::new(graph.edges(), nodes.len(), config.link_distance),
			nodes,
			rng: Lcg::default(),
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
			velocity_decay: config.velocity_decay,
			charge_strength: config.charge_strength,
			collision_radius: config.collision_radius,
			center: (cx, cy),
			running: true,
			ticks: 0,
			listeners: Vec::new(),
			next_subscription: 0,
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn position(&self, idx: usize) -> Option<Point> {
		self.nodes.get(idx).map(SimNode::position)
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	#[cfg(test)]
	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha.clamp(0.0, 1.0);
	}

	#[cfg(test)]
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, 1.0);
	}

	pub fn is_quiescent(&self) -> bool {
		!self.running
	}

	/// Resumes stepping. Alpha is left as is; raise the target to add
	/// energy.
	pub fn restart(&mut self) {
		if !self.running {
			debug!("Layout restarted at alpha {:.4}", self.alpha);
		}
		self.running = true;
	}

	/// Fixes a node at `point`. Returns false for an unknown index.
	pub fn pin(&mut self, idx: usize, point: Point) -> bool {
		match self.nodes.get_mut(idx) {
			Some(node) => {
				node.pin = Some(point);
				true
			}
			None => false,
		}
	}

	pub fn unpin(&mut self, idx: usize) -> bool {
		match self.nodes.get_mut(idx) {
			Some(node) => node.pin.take().is_some(),
			None => false,
		}
	}

	pub fn subscribe(&mut self, listener: impl FnMut(&SimulationEvent<'_>) + 'static) -> SubscriptionId {
		let id = SubscriptionId(self.next_subscription);
		self.next_subscription += 1;
		self.listeners.push((id, Box::new(listener)));
		id
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(sid, _)| *sid != id);
		self.listeners.len() != before
	}

	/// Advances the layout by one tick and notifies subscribers.
	///
	/// Returns `false` without doing anything once quiescent.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}

		self.tick();
		let event = SimulationEvent::Tick {
			alpha: self.alpha,
			nodes: &self.nodes,
		};
		for (_, listener) in self.listeners.iter_mut() {
			listener(&event);
		}

		if self.alpha < self.alpha_min {
			self.running = false;
			debug!("Layout settled after {} ticks", self.ticks);
			for (_, listener) in self.listeners.iter_mut() {
				listener(&SimulationEvent::End);
			}
		}
		true
	}

	/// One physics update, regardless of whether the simulation is running.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		let alpha = self.alpha;

		self.links.apply(&mut self.nodes, alpha, &mut self.rng);
		forces::many_body(&mut self.nodes, self.charge_strength, alpha, &mut self.rng);
		forces::center(&mut self.nodes, self.center.0, self.center.1);
		forces::collide(&mut self.nodes, self.collision_radius, &mut self.rng);

		let keep = 1.0 - self.velocity_decay;
		for node in self.nodes.iter_mut() {
			match node.pin {
				Some(pin) => {
					node.x = pin.x;
					node.y = pin.y;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				None => {
					node.vx *= keep;
					node.vy *= keep;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}
		self.ticks += 1;
	}
}
