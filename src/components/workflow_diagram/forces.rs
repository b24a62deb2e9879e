//! Force terms applied on every simulation tick.
//!
//! Each force reads positions and accumulates into velocities, except
//! [`center`], which translates positions directly. Pinned nodes still take
//! part; their velocity is discarded when the tick integrates.

use super::simulation::SimNode;

/// Minimum squared distance used by the many-body force.
const DISTANCE_MIN2: f64 = 1.0;

/// Deterministic linear congruential generator used to separate
/// coincident nodes.
#[derive(Clone, Debug)]
pub struct Lcg {
	state: u32,
}

impl Default for Lcg {
	fn default() -> Self {
		Self { state: 1 }
	}
}

impl Lcg {
	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = self
			.state
			.wrapping_mul(1_664_525)
			.wrapping_add(1_013_904_223);
		self.state as f64 / 4_294_967_296.0
	}

	/// A tiny non-zero-on-average offset.
	pub fn jiggle(&mut self) -> f64 {
		(self.next_f64() - 0.5) * 1e-6
	}
}

/// Spring force pulling linked nodes toward a rest distance.
///
/// Strength of each link is `1 / min(degree(source), degree(target))` and
/// the correction is split between the endpoints by degree, so hubs move
/// less than leaves.
#[derive(Clone, Debug)]
pub struct LinkForce {
	edges: Vec<(usize, usize)>,
	distance: f64,
	strengths: Vec<f64>,
	bias: Vec<f64>,
}

impl LinkForce {
	pub fn new(edges: &[(usize, usize)], node_count: usize, distance: f64) -> Self {
		let mut degree = vec![0usize; node_count];
		for &(s, t) in edges {
			degree[s] += 1;
			degree[t] += 1;
		}

		let strengths = edges
			.iter()
			.map(|&(s, t)| 1.0 / degree[s].min(degree[t]) as f64)
			.collect();
		let bias = edges
			.iter()
			.map(|&(s, t)| degree[s] as f64 / (degree[s] + degree[t]) as f64)
			.collect();

		Self {
			edges: edges.to_vec(),
			distance,
			strengths,
			bias,
		}
	}

	pub fn apply(&self, nodes: &mut [SimNode], alpha: f64, rng: &mut Lcg) {
		for (i, &(s, t)) in self.edges.iter().enumerate() {
			let (src, tgt) = (nodes[s], nodes[t]);
			let mut x = tgt.x + tgt.vx - src.x - src.vx;
			let mut y = tgt.y + tgt.vy - src.y - src.vy;
			if x == 0.0 {
				x = rng.jiggle();
			}
			if y == 0.0 {
				y = rng.jiggle();
			}

			let len = (x * x + y * y).sqrt();
			let l = (len - self.distance) / len * alpha * self.strengths[i];
			let (x, y, b) = (x * l, y * l, self.bias[i]);

			nodes[t].vx -= x * b;
			nodes[t].vy -= y * b;
			nodes[s].vx += x * (1.0 - b);
			nodes[s].vy += y * (1.0 - b);
		}
	}
}

/// Pairwise charge between every node pair. Negative strength repels.
pub fn many_body(nodes: &mut [SimNode], strength: f64, alpha: f64, rng: &mut Lcg) {
	let n = nodes.len();
	for i in 0..n {
		for j in 0..n {
			if i == j {
				continue;
			}
			let mut x = nodes[j].x - nodes[i].x;
			let mut y = nodes[j].y - nodes[i].y;
			let mut l = x * x + y * y;
			if l < DISTANCE_MIN2 {
				if x == 0.0 {
					x = rng.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = rng.jiggle();
					l += y * y;
				}
				l = (DISTANCE_MIN2 * l).sqrt();
			}

			let w = strength * alpha / l;
			nodes[i].vx += x * w;
			nodes[i].vy += y * w;
		}
	}
}

/// Shifts every node so the mean position lands on `(cx, cy)`.
pub fn center(nodes: &mut [SimNode], cx: f64, cy: f64) {
	if nodes.is_empty() {
		return;
	}
	let n = nodes.len() as f64;
	let (sx, sy) = nodes
		.iter()
		.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
	let (dx, dy) = (sx / n - cx, sy / n - cy);
	for node in nodes.iter_mut() {
		node.x -= dx;
		node.y -= dy;
	}
}

/// Pushes apart nodes whose predicted positions are closer than
/// `2 * radius`. Not scaled by alpha.
pub fn collide(nodes: &mut [SimNode], radius: f64, rng: &mut Lcg) {
	let n = nodes.len();
	let (ri, rj) = (radius, radius);
	let r = ri + rj;
	// equal radii split the correction evenly
	let share = (rj * rj) / (ri * ri + rj * rj);

	for i in 0..n {
		let (xi, yi) = (nodes[i].x + nodes[i].vx, nodes[i].y + nodes[i].vy);
		for j in (i + 1)..n {
			let mut x = xi - nodes[j].x - nodes[j].vx;
			let mut y = yi - nodes[j].y - nodes[j].vy;
			let mut l = x * x + y * y;
			if l >= r * r {
				continue;
			}
			if x == 0.0 {
				x = rng.jiggle();
				l += x * x;
			}
			if y == 0.0 {
				y = rng.jiggle();
				l += y * y;
			}
			let len = l.sqrt();
			let k = (r - len) / len;
			let (x, y) = (x * k, y * k);

			nodes[i].vx += x * share;
			nodes[i].vy += y * share;
			nodes[j].vx -= x * (1.0 - share);
			nodes[j].vy -= y * (1.0 - share);
		}
	}
}
