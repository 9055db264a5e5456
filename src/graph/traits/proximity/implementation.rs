use crate::geo::Coordinate;
use crate::graph::{FatEdge, Graph, PhantomNode, Scan};
use crate::transition::Candidate;

use geo::{Destination, Distance, Geodesic, Haversine, InterpolatableLine, LineLocatePoint, Point};
use itertools::Itertools;
use rstar::AABB;

#[cfg(feature = "tracing")]
use tracing::Level;

impl Graph {
    /// Returns an unsorted iterator of the edges within the
    /// provided `distance` of the input [point](Point).
    ///
    /// ### Note
    /// This function implements a square-scan.
    ///
    /// It bounds the search to a square-radius around the origin, so may
    /// select edges slightly further than `distance`. Callers filter on
    /// the projected distance afterward.
    #[inline]
    pub fn scan_edges<'a>(
        &'a self,
        point: &Point,
        distance: f64,
    ) -> impl Iterator<Item = &'a FatEdge> + use<'a> {
        let bottom_right = Geodesic.destination(*point, 135.0, distance);
        let top_left = Geodesic.destination(*point, 315.0, distance);

        let bbox = AABB::from_corners(top_left, bottom_right);
        self.index_edge().locate_in_envelope_intersecting(&bbox)
    }

    /// Projects the [point](Point) onto every edge within `distance`,
    /// yielding the projected position, the edge, and the ratio along it.
    #[inline]
    pub fn scan_edges_projected<'a>(
        &'a self,
        point: &'a Point,
        distance: f64,
    ) -> impl Iterator<Item = (Point, &'a FatEdge, f64)> {
        self.scan_edges(point, distance).filter_map(move |edge| {
            let line = edge.line();

            // Locate the fraction of the point along the line, then
            // project that fraction back onto the line.
            line.line_locate_point(point)
                .map(|frac| (line.point_at_ratio_from_start(&Haversine, frac), edge, frac))
        })
    }
}

impl Scan<PhantomNode> for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn find_candidates(
        &self,
        coordinate: &Coordinate,
        k: usize,
        distance: f64,
    ) -> Vec<Candidate<PhantomNode>> {
        let origin = coordinate.point();

        self.scan_edges_projected(&origin, distance)
            .map(|(position, edge, ratio)| {
                let node = PhantomNode::on(edge, ratio);
                Candidate::new(node, position, Haversine.distance(position, origin))
            })
            .filter(|candidate| candidate.distance <= distance)
            .sorted_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then_with(|| a.node.cmp(&b.node))
            })
            .dedup_by(|a, b| a.node == b.node)
            .take(k)
            .collect()
    }
}
