use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, trace};
use web_sys::MouseEvent;

use super::config::LayoutConfig;
use super::frame_loop::FrameLoop;
use super::render::{LabelLine, LinkView, NodeView, Scene, Shape};
use super::simulation::{Point, SimulationEvent};
use super::state::DiagramState;
use super::types::{Category, WorkflowGraph};

/// Maps a pointer's client coordinates into the drawing surface, skipping the
/// surface's border.
fn surface_point(client: Point, bounds: Point, border: Point) -> Point {
	Point::new(
		client.x - bounds.x - border.x,
		client.y - bounds.y - border.y,
	)
}

fn label_spans(lines: &[LabelLine]) -> AnyView {
	lines
		.iter()
		.map(|line| {
			let dy = format!("{}em", line.dy_em);
			view! { <tspan x="0" dy=dy>{line.text.clone()}</tspan> }
		})
		.collect_view()
		.into_any()
}

fn shape_view(shape: &Shape) -> AnyView {
	match *shape {
		Shape::Circle { r } => view! { <circle r={r.to_string()} /> }.into_any(),
		Shape::Diamond { side } => {
			let offset = (-side / 2.0).to_string();
			view! {
				<rect
					x={offset.clone()}
					y=offset
					width={side.to_string()}
					height={side.to_string()}
					transform="rotate(45)"
				/>
			}
			.into_any()
		}
	}
}

/// Interactive force-directed drawing of a workflow.
///
/// Nodes can be dragged; the layout is held warm while a drag is active and
/// cools back to rest afterwards.
#[component]
pub fn WorkflowDiagram(
	graph: WorkflowGraph,
	#[prop(optional)] config: Option<LayoutConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let (width, height) = (config.width, config.height);
	let state = Rc::new(RefCell::new(DiagramState::new(graph, config)));
	let initial = state.borrow().scene();
	let scene = RwSignal::new(initial.clone());

	let subscription = {
		let mut s = state.borrow_mut();
		let (graph, config) = (s.graph.clone(), s.config.clone());
		s.simulation.subscribe(move |event| match event {
			SimulationEvent::Tick { alpha, nodes } => {
				trace!("Layout tick at alpha {alpha:.4}");
				scene.set(Scene::project(&graph, &config, nodes));
			}
			SimulationEvent::End => debug!("Diagram at rest"),
		})
	};

	let frame_loop = StoredValue::new_local(None::<FrameLoop>);
	let state_anim = state.clone();
	Effect::new(move |_| {
		let state_frame = state_anim.clone();
		match FrameLoop::start(move || state_frame.borrow_mut().advance()) {
			Ok(frames) => frame_loop.set_value(Some(frames)),
			Err(err) => error!("Layout animation unavailable: {err:?}"),
		}
	});

	let teardown = StoredValue::new_local(state.clone());
	on_cleanup(move || {
		let _ = frame_loop.try_update_value(|frames| frames.take());
		let _ = teardown
			.try_with_value(|state| state.borrow_mut().simulation.unsubscribe(subscription));
		debug!("Diagram unmounted");
	});

	let svg_ref = NodeRef::<leptos::svg::Svg>::new();
	let pointer = move |ev: &MouseEvent| -> Option<Point> {
		let svg = svg_ref.get()?;
		let rect = svg.get_bounding_client_rect();
		Some(surface_point(
			Point::new(ev.client_x() as f64, ev.client_y() as f64),
			Point::new(rect.left(), rect.top()),
			Point::new(svg.client_left() as f64, svg.client_top() as f64),
		))
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(point) = pointer(&ev) {
			state_mm.borrow_mut().drag_to(point);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		state_mu.borrow_mut().end_drag();
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().end_drag();
	};

	let links = initial
		.links
		.iter()
		.enumerate()
		.map(|(i, link)| {
			let path = move || {
				scene.with(|s| s.links.get(i).map(LinkView::path).unwrap_or_default())
			};
			let label = (!link.lines.is_empty()).then(|| {
				let transform = move || {
					scene.with(|s| {
						s.links
							.get(i)
							.map(LinkView::label_transform)
							.unwrap_or_default()
					})
				};
				view! {
					<text class="link-label" text-anchor="middle" transform=transform>
						{label_spans(&link.lines)}
					</text>
				}
			});
			view! {
				<g>
					<path class="link" d=path />
					{label}
				</g>
			}
		})
		.collect_view();

	let nodes = initial
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let class = match node.category {
				Category::Process => "node process",
				Category::Decision => "node decision",
			};
			let transform = move || {
				scene.with(|s| s.nodes.get(i).map(NodeView::transform).unwrap_or_default())
			};
			let step = node.id.to_string();
			let state_md = state.clone();
			let on_mousedown = move |ev: MouseEvent| {
				ev.prevent_default();
				if state_md.borrow_mut().start_drag(i) {
					let _ = frame_loop.try_with_value(|frames| {
						if let Some(frames) = frames {
							frames.resume();
						}
					});
				}
			};
			view! {
				<g class=class data-step=step transform=transform on:mousedown=on_mousedown>
					{shape_view(&node.shape)}
					<text text-anchor="middle">{label_spans(&node.lines)}</text>
				</g>
			}
		})
		.collect_view();

	view! {
		<div id="diagram">
			<svg
				node_ref=svg_ref
				width={width.to_string()}
				height={height.to_string()}
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
			>
				<g class="links">{links}</g>
				<g class="nodes">{nodes}</g>
			</svg>
		</div>
	}
}
