use crate::graph::{Graph, NodeIx, PhantomNode, Route, RouteSegment, Weight};

use geo::{Coord, LineString};
use log::trace;

#[cfg(feature = "tracing")]
use tracing::Level;

impl Graph {
    /// Routes between two nodes, returning the total weight and the
    /// nodes along the way, both ends included.
    pub fn route_nodes(&self, start_node: NodeIx, finish_node: NodeIx) -> Option<(Weight, Vec<NodeIx>)> {
        trace!("Routing {start_node:?} -> {finish_node:?}");

        petgraph::algo::astar(
            &self.graph,
            start_node,
            |finish| finish == finish_node,
            |(_, _, weight)| *weight,
            |_| 0.0,
        )
    }

    /// The distance along the network between two phantom nodes, and the
    /// nodes passed through between them.
    fn route_phantoms(&self, source: &PhantomNode, target: &PhantomNode) -> Option<(Weight, Vec<NodeIx>)> {
        // Forward along a single edge never passes through a node.
        if source.same_edge(target) && target.offset >= source.offset {
            return Some((target.offset() - source.offset(), vec![]));
        }

        let length = self.edge_length(source.source, source.target)?;
        let tail = (length - source.offset()).max(0.0);
        let head = target.offset();

        let (weight, nodes) = self.route_nodes(source.target, target.source)?;
        Some((tail + weight + head, nodes))
    }
}

impl Route<PhantomNode> for Graph {
    #[inline]
    fn distance(&self, source: &PhantomNode, target: &PhantomNode) -> Option<f64> {
        self.route_phantoms(source, target).map(|(weight, _)| weight)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = Level::DEBUG))]
    fn route(&self, source: &PhantomNode, target: &PhantomNode) -> Option<RouteSegment> {
        let (weight, nodes) = self.route_phantoms(source, target)?;

        let start = self.phantom_position(source)?;
        let end = self.phantom_position(target)?;

        let mut coordinates: Vec<Coord> = Vec::with_capacity(nodes.len() + 2);
        let points = std::iter::once(start)
            .chain(self.get_line(&nodes))
            .chain(std::iter::once(end));

        for point in points {
            if coordinates.last() != Some(&point.0) {
                coordinates.push(point.0);
            }
        }

        Some(RouteSegment {
            cost: weight,
            distance: weight,
            geometry: LineString::new(coordinates),
        })
    }
}
