use crate::geo::Coordinate;
use crate::graph::traits::util::parallel_roads;
use crate::graph::{Graph, Match, NodeIx, PhantomNode, Route, RouteSegment, Scan};
use crate::transition::*;
use crate::MatchOptions;

use approx::assert_relative_eq;
use geo::{LineString, Point};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Four observations about 11m north of the main road, heading east.
fn eastbound() -> Vec<Coordinate> {
    [0.0005, 0.0015, 0.0025, 0.0035]
        .into_iter()
        .map(|lng| Coordinate::from_degree_unchecked(0.0001, lng))
        .collect()
}

fn options(candidates: usize) -> MatchOptions {
    MatchOptions::default().with_candidates(candidates)
}

/// A map with two fixed candidates per observation, counting every query.
///
/// Candidate `A` (node `t * 10`) lies on its observation, and travels the
/// exact great circle distance to the next `A`. Candidate `B` (node
/// `t * 10 + 1`) lies 20m away, and every move involving it is a detour.
struct Fixture {
    trace: Vec<Coordinate>,
    scans: AtomicUsize,
    routes: AtomicUsize,
}

impl Fixture {
    fn new(trace: &[Coordinate]) -> Self {
        Fixture {
            trace: trace.to_vec(),
            scans: AtomicUsize::new(0),
            routes: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.scans.load(Ordering::SeqCst) + self.routes.load(Ordering::SeqCst)
    }
}

impl Scan<u32> for Fixture {
    fn find_candidates(&self, coordinate: &Coordinate, _: usize, _: f64) -> Vec<Candidate<u32>> {
        self.scans.fetch_add(1, Ordering::SeqCst);

        let Some(t) = self.trace.iter().position(|c| c == coordinate) else {
            return vec![];
        };

        let point = coordinate.point();
        vec![
            Candidate::new(t as u32 * 10, point, 0.0),
            Candidate::new(t as u32 * 10 + 1, point, 20.0),
        ]
    }
}

impl Route<u32> for Fixture {
    fn distance(&self, source: &u32, target: &u32) -> Option<f64> {
        self.routes.fetch_add(1, Ordering::SeqCst);

        let (from, to) = ((source / 10) as usize, (target / 10) as usize);
        let great_circle = self.trace[from].distance(&self.trace[to]);

        match (source % 10, target % 10) {
            (0, 0) => Some(great_circle),
            _ => Some(great_circle + 1000.0),
        }
    }

    fn route(&self, source: &u32, target: &u32) -> Option<RouteSegment> {
        let distance = self.distance(source, target)?;
        let (from, to) = ((source / 10) as usize, (target / 10) as usize);

        Some(RouteSegment {
            cost: distance,
            distance,
            geometry: LineString::from(vec![self.trace[from].point(), self.trace[to].point()]),
        })
    }
}

/// Scores a candidate 0.9 when it lies on its observation, 0.1 otherwise.
struct OnPoint;

impl<'a> Strategy<EmissionContext<'a>> for OnPoint {
    fn calculate(&self, context: EmissionContext<'a>) -> Option<f64> {
        Some(if context.distance == 0.0 { 0.9 } else { 0.1 })
    }
}

#[test_log::test]
fn matches_onto_the_main_road() {
    let graph = parallel_roads();
    let trace = eastbound();

    let outcome = graph
        .match_with(&trace, options(4))
        .expect("trace is well formed");
    let result = outcome.matched().expect("trace follows the main road");

    assert_eq!(result.matched.len(), trace.len());
    for point in &result.matched {
        assert!(point.candidate.node.source.0 < 100, "{point:?}");
        assert!(point.candidate.node.target > point.candidate.node.source);
        assert!(point.confidence > 0.9);
    }

    // From the first to the last projection, about 0.003° of longitude.
    assert_relative_eq!(result.route.distance, 333.6, epsilon = 1.0);
    assert!(result.score.is_finite());
    assert!(result.parameters.beta >= 1.0);
    assert!(result.route.wkt().starts_with("LINESTRING"));
}

#[test_log::test]
fn matching_is_deterministic() {
    let graph = parallel_roads();
    let trace = eastbound();

    let first = graph
        .match_with(&trace, options(4))
        .expect("well formed")
        .matched()
        .expect("matched");
    let second = graph
        .match_with(&trace, options(4).with_parallel(false))
        .expect("well formed")
        .matched()
        .expect("matched");

    assert_eq!(first.indices(), second.indices());
    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.score, second.score);
}

#[test_log::test]
fn follows_the_consistent_candidate() {
    let trace = eastbound();
    let fixture = Fixture::new(&trace[..3]);

    let costing = CostingStrategies::new(OnPoint, ExponentialTransition);
    let matcher = Matcher::with_costing(&fixture, costing, options(2));

    let result = matcher
        .r#match(&trace[..3])
        .expect("well formed")
        .matched()
        .expect("matched");

    assert_eq!(result.indices(), vec![0, 0, 0]);
    assert_eq!(result.nodes(), vec![0, 10, 20]);
}

#[test]
fn queries_every_pair_once() {
    let trace = eastbound();
    let fixture = Fixture::new(&trace);

    let outcome = Matcher::new(&fixture, options(2))
        .r#match(&trace)
        .expect("well formed");
    assert!(outcome.is_matched());

    assert_eq!(fixture.scans.load(Ordering::SeqCst), trace.len());

    // Four pairs for each of the three steps, then one more per leg
    // when the route is assembled.
    assert_eq!(fixture.routes.load(Ordering::SeqCst), 4 * 3 + 3);
}

#[test]
fn rejects_degenerate_traces_before_lookup() {
    let trace = eastbound();
    let fixture = Fixture::new(&trace);
    let matcher = Matcher::new(&fixture, options(2));

    assert!(matches!(
        matcher.r#match(&[]),
        Err(MatchError::TooFewPoints { given: 0 })
    ));
    assert!(matches!(
        matcher.r#match(&trace[..1]),
        Err(MatchError::TooFewPoints { given: 1 })
    ));

    let invalid = [trace[0], Coordinate::new(910_000_000, 0), trace[1]];
    assert!(matches!(
        matcher.r#match(&invalid),
        Err(MatchError::InvalidCoordinate { index: 1, .. })
    ));

    let invalid = [trace[0], Coordinate::new(0, -1_800_000_001)];
    assert!(matches!(
        matcher.r#match(&invalid),
        Err(MatchError::InvalidCoordinate { index: 1, .. })
    ));

    let unsolvable = Matcher::new(&fixture, options(0));
    assert!(matches!(
        unsolvable.r#match(&trace),
        Err(MatchError::InvalidOptions(_))
    ));

    assert_eq!(fixture.calls(), 0);
}

#[test]
fn rejects_short_candidate_lists() {
    let graph = parallel_roads();
    let trace = eastbound();

    // Only eight edges lie within range of the first observation.
    assert!(matches!(
        graph.match_with(&trace, options(10)),
        Err(MatchError::InsufficientCandidates {
            index: 0,
            required: 10,
            ..
        })
    ));
}

#[test]
fn rejects_observations_without_candidates() {
    let graph = parallel_roads();
    let trace = [
        Coordinate::from_degree_unchecked(0.0001, 0.0015),
        Coordinate::from_degree_unchecked(0.5, 0.5),
        Coordinate::from_degree_unchecked(0.0001, 0.0025),
    ];

    assert!(matches!(
        graph.match_with(&trace, options(2)),
        Err(MatchError::NoCandidates { index: 1 })
    ));
}

#[test_log::test]
fn unreachable_trace_is_no_match() {
    // A one-way road heading west, travelled east.
    let mut graph = Graph::default();
    for n in 0..6 {
        let coordinate = Coordinate::from_degree_unchecked(0.0, n as f64 * 0.001);
        graph.insert_node(NodeIx(n), coordinate);
    }
    let westbound = (0..6).rev().map(NodeIx).collect::<Vec<_>>();
    graph.insert_way(&westbound, true).expect("nodes were inserted");

    let outcome: MatchOutcome<PhantomNode> = graph
        .match_with(&eastbound(), options(1).with_diagnostics(true))
        .expect("trace is well formed");

    let no_match = outcome.no_match().expect("no viable path");
    assert_eq!(no_match.reason, NoMatchReason::EmptyLayer { index: 1 });
    assert_eq!(no_match.reason.to_string(), "empty_layer");

    let diagnostics = no_match.diagnostics.expect("diagnostics requested");
    assert_eq!(diagnostics.candidates.len(), 4);
    assert!(diagnostics.steps.iter().all(|step| step.delta.is_none()));
}

#[test]
fn attaches_diagnostics_on_request() {
    let graph = parallel_roads();
    let trace = eastbound();

    let result = graph
        .match_with(&trace, options(4).with_diagnostics(true))
        .expect("well formed")
        .matched()
        .expect("matched");

    let diagnostics = result.diagnostics.expect("diagnostics requested");
    assert_eq!(diagnostics.candidates.len(), trace.len());
    assert!(diagnostics.candidates.iter().all(|list| list.len() == 4));
    assert_eq!(diagnostics.steps.len(), trace.len() - 1);

    let plain = graph
        .match_with(&trace, options(4))
        .expect("well formed")
        .matched()
        .expect("matched");
    assert!(plain.diagnostics.is_none());
}

#[test]
fn serializes_a_neutral_result() {
    let graph = parallel_roads();
    let outcome = graph
        .match_with(&eastbound(), options(4))
        .expect("well formed");

    let json = serde_json::to_value(&outcome).expect("serializable");
    assert_eq!(json["status"], "matched");
    assert_eq!(json["matched"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["matched"][0]["index"], 0);
    assert!(json["route"]["distance"].is_number());
    assert!(json.get("diagnostics").is_none());
}

#[test]
fn serializes_no_match_reason() {
    let no_match: NoMatch<PhantomNode> = NoMatch {
        reason: NoMatchReason::EmptyLayer { index: 2 },
        parameters: Parameters::new(4.07, 10.0),
        diagnostics: None,
    };

    let json = serde_json::to_value(MatchOutcome::NoMatch(no_match)).expect("serializable");
    assert_eq!(json["status"], "no_match");
    assert_eq!(json["reason"], "empty_layer");
    assert_eq!(json["index"], 2);
    assert_eq!(json["parameters"]["beta"], 10.0);
}

#[test]
fn matched_points_index_their_candidate_list() {
    let graph = parallel_roads();
    let trace = eastbound();
    assert_eq!(Coordinate::from(Point::new(0.0015, 0.0001)), trace[1]);

    let candidates = graph.find_candidates(&trace[1], 4, 100.0);
    let result = graph
        .match_with(&trace, options(4))
        .expect("well formed")
        .matched()
        .expect("matched");

    let point = &result.matched[1];
    assert_eq!(point.index, 1);
    assert_eq!(point.candidate, candidates[point.candidate_index]);
}

#[test]
fn reconstruction_rejects_unknown_candidates() {
    let layer = |t: u32| -> CandidateList<u32> {
        (0..2)
            .map(|k| Candidate::new(t * 10 + k, Point::new(0.0, 0.0), k as f64))
            .collect()
    };
    let lists = CandidateLists::new(vec![layer(0), layer(1), layer(2)], 2).expect("uniform lists");

    let matched = <Matcher<Fixture, u32>>::reconstruct(&lists, &[0, 1, 0]).expect("in bounds");
    assert_eq!(matched.len(), 3);
    assert_eq!(matched[1].candidate.node, 11);

    let result = <Matcher<Fixture, u32>>::reconstruct(&lists, &[0, 2, 0]);
    assert_eq!(
        result.map(|points| points.len()),
        Err(MatchError::UnknownCandidate {
            index: 1,
            candidate: 2
        })
    );
}

#[test_log::test]
fn far_candidates_still_match() {
    let graph = parallel_roads();
    let trace = [0.0005, 0.0015, 0.0025]
        .into_iter()
        .map(|lng| Coordinate::from_degree_unchecked(-0.0015, lng))
        .collect::<Vec<_>>();

    // About 167m south of the main road, beyond where the plain density underflows.
    let options = options(2).with_search_distance(500.0);
    let outcome: MatchOutcome<PhantomNode> = graph.match_with(&trace, options).expect("valid trace");

    let result = outcome.matched().expect("matched");
    assert!(result.score.is_finite());
    assert_eq!(result.matched.len(), 3);
}
