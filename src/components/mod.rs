pub mod workflow_diagram;
