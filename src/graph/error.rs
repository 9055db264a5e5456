use crate::graph::NodeIx;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {0:?} is not part of the graph")]
    UnknownNode(NodeIx),

    #[error("a way requires at least two nodes, given {length}")]
    DegenerateWay { length: usize },
}
