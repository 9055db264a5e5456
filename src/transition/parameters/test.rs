use crate::MatchOptions;
use crate::geo::Coordinate;
use crate::transition::*;

use approx::assert_relative_eq;
use geo::Point;
use std::f64::consts::LN_2;

fn step(delta: f64) -> StepDelta {
    StepDelta::new(100.0, [Some(100.0 + delta)])
}

#[test]
fn median_of_odd_count() {
    let mut values = [5.0, 1.0, 3.0];
    assert_eq!(median(&mut values), Some(3.0));
}

#[test]
fn median_of_even_count_is_upper() {
    let mut values = [4.0, 1.0, 3.0, 2.0];
    assert_eq!(median(&mut values), Some(3.0));
}

#[test]
fn median_of_nothing() {
    assert_eq!(median(&mut []), None);
}

#[test]
fn step_delta_excludes_unreachable_pairs() {
    let step = StepDelta::new(50.0, [Some(60.0), None, Some(80.0), None, Some(70.0)]);

    assert_eq!(step.median, Some(70.0));
    assert_eq!(step.mean, Some(70.0));
    assert_eq!(step.delta, Some(20.0));

    let unreachable = StepDelta::new(50.0, [None, None]);
    assert_eq!(unreachable.delta, None);
    assert_eq!(unreachable.mean, None);
}

#[test]
fn beta_from_equal_deltas() {
    let options = MatchOptions::default();

    for d in [0.05, 0.5, 2.0, 10.0, 37.5, 1000.0] {
        let steps = vec![step(d); 7];
        assert_relative_eq!(estimate_beta(&steps, &options), d / LN_2, epsilon = 1e-9);
    }
}

#[test]
fn beta_is_robust_to_outliers() {
    let options = MatchOptions::default();
    let steps = vec![step(10.0), step(10.0), step(10.0), step(5000.0)];

    // Upper median of [10, 10, 10, 5000].
    assert_relative_eq!(estimate_beta(&steps, &options), 10.0 / LN_2);
}

#[test]
fn beta_below_a_meter_is_kept() {
    let steps = vec![step(0.5); 5];
    let beta = estimate_beta(&steps, &MatchOptions::default());

    assert_relative_eq!(beta, 0.721_347_520_444_481_7, epsilon = 1e-12);
}

#[test]
fn beta_is_clamped() {
    let options = MatchOptions::default().with_min_beta(2.5);
    let steps = vec![step(0.5); 3];

    assert_eq!(estimate_beta(&steps, &options), 2.5);
}

#[test]
fn zero_median_uses_fallback() {
    let options = MatchOptions {
        fallback_beta: 3.0,
        ..MatchOptions::default()
    };
    let steps = vec![step(0.0), step(0.0), step(4.0)];

    assert_eq!(estimate_beta(&steps, &options), 3.0);
}

#[test]
fn beta_falls_back_without_deltas() {
    let options = MatchOptions {
        fallback_beta: 42.0,
        ..MatchOptions::default()
    };

    let unreachable = StepDelta::new(100.0, [None]);
    assert_eq!(estimate_beta(&[unreachable], &options), 42.0);
    assert_eq!(estimate_beta(&[], &options), 42.0);
}

#[test]
fn estimate_from_table() {
    let trace = [
        Coordinate::from_degree_unchecked(0.0, 0.0),
        Coordinate::from_degree_unchecked(0.0, 0.001),
        Coordinate::from_degree_unchecked(0.0, 0.002),
    ];

    let great_circle = trace[0].distance(&trace[1]);
    let layer = |offset: u32| -> CandidateList<u32> {
        (0..2)
            .map(|k| Candidate::new(offset + k, Point::new(0.0, 0.0), 1.0))
            .collect()
    };

    let lists = CandidateLists::new(vec![layer(0), layer(10), layer(20)], 2)
        .expect("lists are uniform");

    let mut table = DistanceTable::default();
    for (source, target) in [(0, 10), (0, 11), (1, 10), (1, 11)] {
        table.insert(source, target, Some(great_circle + 8.0));
    }
    for (source, target) in [(10, 20), (10, 21), (11, 20), (11, 21)] {
        table.insert(source, target, Some(great_circle + 8.0));
    }

    let (parameters, steps) = Parameters::estimate(&trace, &lists, &table, &MatchOptions::default());

    assert_eq!(steps.len(), 2);
    assert_eq!(parameters.sigma_z, 4.07);
    assert_relative_eq!(parameters.beta, 8.0 / LN_2, epsilon = 1e-6);
}
