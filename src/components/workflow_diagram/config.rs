use super::types::Category;

/// Layout and drawing parameters. Read-only once the diagram is built.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	pub width: f64,
	pub height: f64,
	pub process_radius: f64,
	pub decision_radius: f64,
	/// Rest length of every link spring.
	pub link_distance: f64,
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
	/// Radius each node occupies for overlap avoidance.
	pub collision_radius: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	pub velocity_decay: f64,
	/// Energy the layout is held at while a node is dragged.
	pub drag_alpha_target: f64,
	pub line_height_em: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			width: 1000.0,
			height: 600.0,
			process_radius: 25.0,
			decision_radius: 30.0,
			link_distance: 100.0,
			charge_strength: -1000.0,
			collision_radius: 50.0,
			alpha_min,
			// reaches alpha_min after ~300 ticks from alpha = 1
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			line_height_em: 1.2,
		}
	}
}

impl LayoutConfig {
	pub fn radius(&self, category: Category) -> f64 {
		match category {
			Category::Process => self.process_radius,
			Category::Decision => self.decision_radius,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}
