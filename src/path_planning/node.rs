// Search node and node arena for the grid planner

use crate::common::{GridCell, GridPath};

/// Search node. Parents are arena indices; the root has none.
#[derive(Debug, Clone)]
pub struct Node {
    pub position: GridCell,
    pub parent: Option<usize>,
    /// Cost from start
    pub g: f64,
    /// Estimate to goal
    pub h: f64,
    pub f: f64,
}

impl Node {
    pub fn new(position: GridCell, parent: Option<usize>) -> Self {
        Node {
            position,
            parent,
            g: 0.0,
            h: 0.0,
            f: 0.0,
        }
    }

    pub fn with_costs(position: GridCell, parent: Option<usize>, g: f64, h: f64) -> Self {
        Node {
            position,
            parent,
            g,
            h,
            f: g + h,
        }
    }
}

/// Owns every node created during one planning call
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Positions from the root to `index`, inclusive
    pub fn path_to(&self, index: usize) -> GridPath {
        let mut path = Vec::new();
        let mut current = Some(index);

        while let Some(i) = current {
            let node = &self.nodes[i];
            path.push(node.position);
            current = node.parent;
        }

        path.reverse();
        path
    }
}
