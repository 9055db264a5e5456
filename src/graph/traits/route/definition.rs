use crate::transition::Phantom;

use geo::LineString;
use serde::Serialize;

/// A routed leg between two positions on the network.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSegment {
    /// The routing cost of the leg.
    pub cost: f64,
    /// The driven distance of the leg, in meters.
    pub distance: f64,
    pub geometry: LineString,
}

/// Shortest-path queries between positions on a network.
pub trait Route<N>
where
    N: Phantom,
{
    /// The network distance, in meters, from `source` to `target`.
    ///
    /// Returns `None` if `target` is unreachable from `source`.
    /// Called for every candidate pair of consecutive observations, so
    /// implementations should avoid building geometry here.
    fn distance(&self, source: &N, target: &N) -> Option<f64>;

    /// Finds the optimal route between two positions, with its geometry.
    fn route(&self, source: &N, target: &N) -> Option<RouteSegment>;
}
