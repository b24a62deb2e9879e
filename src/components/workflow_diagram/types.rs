use std::collections::HashMap;

use thiserror::Error;

/// Kind of workflow step. Decides the marker shape and radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Process,
	Decision,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowNode {
	pub id: u32,
	pub label: String,
	pub category: Category,
}

impl WorkflowNode {
	pub fn new(id: u32, label: impl Into<String>, category: Category) -> Self {
		Self {
			id,
			label: label.into(),
			category,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowLink {
	pub source: u32,
	pub target: u32,
	pub label: Option<String>,
}

impl WorkflowLink {
	pub fn new(source: u32, target: u32) -> Self {
		Self {
			source,
			target,
			label: None,
		}
	}

	pub fn labeled(source: u32, target: u32, label: impl Into<String>) -> Self {
		Self {
			source,
			target,
			label: Some(label.into()),
		}
	}
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
	#[error("link #{link} ({from} -> {to}) references unknown node id {id}")]
	UnknownEndpoint {
		link: usize,
		from: u32,
		to: u32,
		id: u32,
	},

	#[error("node id {id} is declared more than once")]
	DuplicateNode { id: u32 },
}

/// A validated workflow: every link endpoint resolves to a node index.
#[derive(Clone, Debug)]
pub struct WorkflowGraph {
	nodes: Vec<WorkflowNode>,
	links: Vec<WorkflowLink>,
	endpoints: Vec<(usize, usize)>,
}

impl WorkflowGraph {
	pub fn new(nodes: Vec<WorkflowNode>, links: Vec<WorkflowLink>) -> Result<Self, GraphError> {
		let mut id_to_idx = HashMap::with_capacity(nodes.len());
		for (idx, node) in nodes.iter().enumerate() {
			if id_to_idx.insert(node.id, idx).is_some() {
				return Err(GraphError::DuplicateNode { id: node.id });
			}
		}

		let endpoints = links
			.iter()
			.enumerate()
			.map(|(i, link)| {
				let resolve = |id: u32| {
					id_to_idx
						.get(&id)
						.copied()
						.ok_or(GraphError::UnknownEndpoint {
							link: i,
							from: link.source,
							to: link.target,
							id,
						})
				};
				Ok((resolve(link.source)?, resolve(link.target)?))
			})
			.collect::<Result<Vec<_>, GraphError>>()?;

		Ok(Self {
			nodes,
			links,
			endpoints,
		})
	}

	pub fn nodes(&self) -> &[WorkflowNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[WorkflowLink] {
		&self.links
	}

	/// Resolved `(source, target)` node indices of the link at `link`.
	#[cfg(test)]
	pub fn endpoints(&self, link: usize) -> Option<(usize, usize)> {
		self.endpoints.get(link).copied()
	}

	pub fn edges(&self) -> &[(usize, usize)] {
		&self.endpoints
	}

	#[cfg(test)]
	pub fn index_of(&self, id: u32) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}
}
