use leptos::prelude::*;
use log::error;

use crate::components::workflow_diagram::{WorkflowDiagram, sample_workflow};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let diagram = sample_workflow()
		.inspect_err(|err| error!("Workflow data rejected: {err}"))
		.map(|graph| view! { <WorkflowDiagram graph=graph /> });

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="workflow">
				<h1>"Job Workflow"</h1>
				<p class="subtitle">"Drag a step to reposition it."</p>
				{diagram}
			</div>
		</ErrorBoundary>
	}
}
