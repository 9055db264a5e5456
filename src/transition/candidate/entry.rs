use geo::Point;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// An opaque network position handle, a "phantom node".
///
/// The matcher never looks inside a phantom node, it only hands it back to
/// the [`Route`](crate::Route) collaborator and uses it as a cache key.
pub trait Phantom: Copy + Eq + Hash + Debug + Send + Sync {}
impl<T> Phantom for T where T: Copy + Eq + Hash + Debug + Send + Sync {}

/// Represents a candidate position for a single observation.
///
/// This value holds the [node](#field.node) on the underlying network it was
/// projected onto, its projected [position](#field.position), and the
/// perpendicular [distance](#field.distance), in meters, from the observation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candidate<N>
where
    N: Phantom,
{
    pub node: N,
    pub position: Point,
    pub distance: f64,
}

impl<N> Candidate<N>
where
    N: Phantom,
{
    pub fn new(node: N, position: Point, distance: f64) -> Self {
        Self {
            node,
            position,
            distance,
        }
    }
}
