use super::types::{Category, GraphError, WorkflowGraph, WorkflowLink, WorkflowNode};

/// The job workflow shown on the home page, from intake to deposit.
pub fn sample_workflow() -> Result<WorkflowGraph, GraphError> {
	use Category::{Decision, Process};

	let nodes = [
		(1, "Work Order\nReceived", Process),
		(2, "Accept job?", Decision),
		(3, "Move On", Process),
		(4, "Pricing", Process),
		(5, "Quote", Process),
		(6, "Art", Process),
		(7, "Samples?", Decision),
		(8, "Approve?", Decision),
		(9, "Inquire for\nNew Samples", Process),
		(10, "Mayco Prep", Process),
		(11, "Roxy Prep", Process),
		(12, "Roxy seeks\nmaterial", Process),
		(13, "Materials\nprinted", Process),
		(14, "Materials cut", Process),
		(15, "Assembly", Process),
		(16, "QC?", Decision),
		(17, "Tape", Process),
		(18, "Bagging", Process),
		(19, "Packing", Process),
		(20, "Stripping", Process),
		(21, "Remake?", Decision),
		(22, "Remove from\nTeams", Process),
		(23, "Invoice to\nQuickbooks", Process),
		(24, "Await\nPayment", Process),
		(25, "Deposit\nPayment", Process),
	]
	.into_iter()
	.map(|(id, label, category)| WorkflowNode::new(id, label, category))
	.collect();

	let links = vec![
		WorkflowLink::new(1, 2),
		WorkflowLink::labeled(2, 3, "No"),
		WorkflowLink::labeled(2, 4, "Yes"),
		WorkflowLink::new(4, 5),
		WorkflowLink::new(5, 6),
		WorkflowLink::new(6, 7),
		WorkflowLink::labeled(7, 8, "Tim/Mayco\nDiscuss"),
		WorkflowLink::labeled(8, 9, "No"),
		WorkflowLink::new(9, 7),
		WorkflowLink::labeled(8, 10, "Yes"),
		WorkflowLink::new(10, 11),
		WorkflowLink::new(11, 12),
		WorkflowLink::new(12, 13),
		WorkflowLink::new(13, 14),
		WorkflowLink::new(14, 15),
		WorkflowLink::new(15, 16),
		WorkflowLink::new(16, 17),
		WorkflowLink::new(17, 18),
		WorkflowLink::new(18, 19),
		WorkflowLink::new(19, 20),
		WorkflowLink::new(20, 21),
		WorkflowLink::labeled(21, 22, "No"),
		WorkflowLink::new(22, 23),
		WorkflowLink::new(23, 24),
		WorkflowLink::new(24, 25),
	];

	WorkflowGraph::new(nodes, links)
}
