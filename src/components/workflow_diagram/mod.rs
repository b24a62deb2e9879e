mod component;
mod config;
mod data;
mod drag;
mod forces;
mod frame_loop;
mod render;
mod simulation;
mod state;
mod types;

pub use component::WorkflowDiagram;
pub use data::sample_workflow;
