mod r#match;
mod proximity;
mod route;

pub use r#match::Match;
pub use proximity::Scan;
pub use route::{Route, RouteSegment};

#[cfg(test)]
pub(crate) mod util {
    use crate::geo::Coordinate;
    use crate::graph::{Graph, NodeIx};

    /// A straight two-way road at latitude `lat`, with nodes every
    /// `0.001°` (about 111m) of longitude, numbered from `first`.
    pub(crate) fn straight_road(graph: &mut Graph, first: i64, lat: f64, nodes: usize) {
        let ids = (0..nodes as i64)
            .map(|n| NodeIx(first + n))
            .collect::<Vec<_>>();

        for (n, id) in ids.iter().enumerate() {
            let coordinate = Coordinate::from_degree_unchecked(lat, n as f64 * 0.001);
            graph.insert_node(*id, coordinate);
        }

        graph
            .insert_way(&ids, false)
            .expect("road nodes were inserted");
    }

    /// A main road along the equator and a parallel road about 55m north.
    pub(crate) fn parallel_roads() -> Graph {
        let mut graph = Graph::default();
        straight_road(&mut graph, 0, 0.0, 6);
        straight_road(&mut graph, 100, 0.0005, 6);
        graph
    }
}
