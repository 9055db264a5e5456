use crate::geo::Coordinate;
use crate::graph::GraphError;

use geo::{Distance, Haversine, InterpolatableLine, Line, Point};
use log::debug;
use petgraph::prelude::DiGraphMap;
use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::{FxHashMap, FxHasher};
use serde::Serialize;

use std::fmt::{Debug, Formatter};
use std::hash::BuildHasherDefault;

/// Edge length, in meters.
pub type Weight = f64;

pub type GraphStructure = DiGraphMap<NodeIx, Weight, BuildHasherDefault<FxHasher>>;

/// Identifier of a node within a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeIx(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeIx,
    pub position: Point,
}

/// A directed edge, carrying the positions of both of its ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FatEdge {
    pub source: Node,
    pub target: Node,
    pub length: Weight,
}

impl FatEdge {
    pub fn line(&self) -> Line {
        Line::new(self.source.position, self.target.position)
    }
}

impl RTreeObject for FatEdge {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.target.position, self.source.position)
    }
}

/// A position part-way along a directed edge of a [`Graph`].
///
/// The `offset` is the distance from the edge's source, in centimeters, so
/// that two projections onto the same place compare (and hash) equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PhantomNode {
    pub source: NodeIx,
    pub target: NodeIx,
    pub offset: u32,
}

impl PhantomNode {
    /// The phantom node at `ratio` (in `[0, 1]`) along `edge`.
    pub fn on(edge: &FatEdge, ratio: f64) -> Self {
        let offset = (ratio.clamp(0.0, 1.0) * edge.length * 100.0).round() as u32;

        PhantomNode {
            source: edge.source.id,
            target: edge.target.id,
            offset,
        }
    }

    /// The distance from the edge's source, in meters.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset as f64 / 100.0
    }

    #[inline]
    pub(crate) fn same_edge(&self, other: &PhantomNode) -> bool {
        self.source == other.source && self.target == other.target
    }
}

/// Routing graph.
///
/// Built incrementally from nodes and ways, and read-only once built, so
/// it may be shared between any number of concurrent matches.
#[derive(Default)]
pub struct Graph {
    pub(crate) graph: GraphStructure,
    pub(crate) hash: FxHashMap<NodeIx, Node>,
    pub(crate) index_edge: RTree<FatEdge>,
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with Nodes: {}, Edges: {}",
            self.hash.len(),
            self.graph.edge_count()
        )
    }
}

impl Graph {
    pub fn index_edge(&self) -> &RTree<FatEdge> {
        &self.index_edge
    }

    pub fn size(&self) -> usize {
        self.hash.len()
    }

    /// Inserts (or moves) a node.
    pub fn insert_node(&mut self, id: NodeIx, coordinate: Coordinate) {
        let node = Node {
            id,
            position: coordinate.point(),
        };

        self.hash.insert(id, node);
        self.graph.add_node(id);
    }

    /// Inserts a way through the given nodes.
    ///
    /// Every consecutive pair becomes an edge, in both directions unless
    /// the way is `one_way`. Every node must already be inserted.
    pub fn insert_way(&mut self, nodes: &[NodeIx], one_way: bool) -> Result<(), GraphError> {
        if nodes.len() < 2 {
            return Err(GraphError::DegenerateWay {
                length: nodes.len(),
            });
        }

        let resolved = nodes
            .iter()
            .map(|id| self.hash.get(id).copied().ok_or(GraphError::UnknownNode(*id)))
            .collect::<Result<Vec<_>, _>>()?;

        for pair in resolved.windows(2) {
            let (source, target) = (pair[0], pair[1]);
            let length = Haversine.distance(source.position, target.position);

            self.insert_edge(source, target, length);
            if !one_way {
                self.insert_edge(target, source, length);
            }
        }

        debug!("Inserted way of {} nodes (one_way={one_way})", nodes.len());
        Ok(())
    }

    fn insert_edge(&mut self, source: Node, target: Node, length: Weight) {
        self.graph.add_edge(source.id, target.id, length);
        self.index_edge.insert(FatEdge {
            source,
            target,
            length,
        });
    }

    #[inline]
    pub fn get_position(&self, node_index: &NodeIx) -> Option<Point> {
        self.hash.get(node_index).map(|node| node.position)
    }

    #[inline]
    pub fn get_line(&self, nodes: &[NodeIx]) -> Vec<Point> {
        nodes
            .iter()
            .filter_map(|node| self.get_position(node))
            .collect::<Vec<_>>()
    }

    /// The length of the edge between two nodes, if one exists.
    #[inline]
    pub fn edge_length(&self, source: NodeIx, target: NodeIx) -> Option<Weight> {
        self.graph.edge_weight(source, target).copied()
    }

    /// The geographic position of a phantom node.
    pub fn phantom_position(&self, phantom: &PhantomNode) -> Option<Point> {
        let source = self.get_position(&phantom.source)?;
        let target = self.get_position(&phantom.target)?;
        let length = self.edge_length(phantom.source, phantom.target)?;

        if length <= 0.0 {
            return Some(source);
        }

        let ratio = (phantom.offset() / length).clamp(0.0, 1.0);
        Some(Line::new(source, target).point_at_ratio_from_start(&Haversine, ratio))
    }
}
