use pretty_assertions::assert_eq;
use test_case::test_case;

use super::{lbest_costs, positions, quadratic_points};
use crate::prelude::*;

fn small_config() -> SwarmConfig {
    SwarmConfig {
        n_datapoints: 4,
        n_particles: 2,
        n_steps: 3,
        ..Default::default()
    }
}

#[test]
fn exact_particle_fits_noiseless_quadratic() {
    let mut swarm = Swarm::from_parts(
        SwarmConfig::default(),
        Polynomial::new([2.0, 0.0, 0.0]),
        quadratic_points(),
        vec![Particle::new(Polynomial::new([2.0, 0.0, 0.0]))],
        SequenceSource::new([0.3, 0.9]),
    )
    .unwrap();

    assert_eq!(swarm.global_best(), None);
    assert_eq!(swarm.global_best_cost(), None);

    assert!(!swarm.advance().unwrap());

    assert_eq!(swarm.global_best(), Some(&Polynomial::new([2.0, 0.0, 0.0])));
    assert_eq!(swarm.global_best_cost(), Some(0.0));
    assert_eq!(swarm.r_squared(), Some(1.0));
    // every pull is zero, so the particle stays put
    assert_eq!(positions(&swarm), vec![Polynomial::new([2.0, 0.0, 0.0])]);
}

#[test]
fn advance_terminates_after_n_steps() {
    let mut swarm = Swarm::seeded(SwarmConfig::default().with_substeps(1), 42).unwrap();
    let n_steps = swarm.n_steps();
    for _ in 0..n_steps - 1 {
        assert!(!swarm.advance().unwrap());
    }
    assert!(swarm.advance().unwrap());
    assert!(swarm.is_done());
    assert_eq!(swarm.step(), n_steps);
}

#[test]
fn advance_after_done_is_a_no_op() {
    let mut swarm = Swarm::seeded(small_config(), 3).unwrap();
    swarm.run_to_completion().unwrap();

    let before_positions = positions(&swarm);
    let before_lbests = lbest_costs(&swarm);
    let before_summary = swarm.summary();

    for _ in 0..3 {
        assert!(swarm.advance().unwrap());
    }

    assert_eq!(positions(&swarm), before_positions);
    assert_eq!(lbest_costs(&swarm), before_lbests);
    assert_eq!(swarm.summary(), before_summary);
}

#[test]
fn ties_keep_the_first_particle() {
    let config = SwarmConfig::default().with_coefficients(2);
    // both candidates miss the single point by exactly 1
    let mut swarm = Swarm::from_parts(
        config,
        Polynomial::new([0.0, 1.0]),
        Dataset::from_points(vec![Point::new(0.0, 1.0)]),
        vec![
            Particle::new(Polynomial::new([1.0, 0.0])),
            Particle::new(Polynomial::new([-1.0, 0.0])),
        ],
        SequenceSource::new([0.5]),
    )
    .unwrap();

    swarm.advance().unwrap();
    assert_eq!(swarm.global_best(), Some(&Polynomial::new([1.0, 0.0])));
    assert_eq!(swarm.global_best_cost(), Some(1.0));
}

#[test]
fn substeps_move_fractionally_and_evaluate_on_wrap() {
    let config = SwarmConfig {
        n_steps: 2,
        ..Default::default()
    }
    .with_coefficients(1)
    .with_substeps(4)
    .with_schedule(Schedule::constant(1.0, 0.0, 0.0));

    let mut particle = Particle::new(Polynomial::new([0.0]));
    particle.velocity = Polynomial::new([4.0]);

    let history = CostHistory::new();
    let mut swarm = Swarm::from_parts(
        config,
        Polynomial::new([10.0]),
        Dataset::from_points(vec![Point::new(0.0, 10.0)]),
        vec![particle],
        SequenceSource::new([0.5]),
    )
    .unwrap()
    .with_observer(history.clone());

    for k in 1..=4 {
        assert!(!swarm.advance().unwrap());
        assert_eq!(swarm.particles()[0].position, Polynomial::new([k as f64]));
        assert_eq!(history.cost_history(), vec![10.0]);
    }
    assert_eq!(swarm.step(), 1);
    assert_eq!(swarm.substep(), 0);

    assert!(!swarm.advance().unwrap());
    assert_eq!(history.cost_history(), vec![10.0, 6.0]);
    assert_eq!(swarm.global_best_cost(), Some(6.0));
    assert_eq!(swarm.substep(), 1);

    for _ in 0..2 {
        assert!(!swarm.advance().unwrap());
    }
    assert!(swarm.advance().unwrap());
    assert_eq!(swarm.step(), 2);
    assert_eq!(swarm.particles()[0].position, Polynomial::new([8.0]));
}

#[test_case(RandomnessPolicy::PerParticle, 17 + 12; "per particle")]
#[test_case(RandomnessPolicy::Shared, 17 + 6; "shared")]
fn randomness_policy_controls_draw_count(policy: RandomnessPolicy, expected_draws: usize) {
    let config = small_config().with_randomness(policy);
    let mut swarm = Swarm::with_source(
        config,
        SequenceSource::new([0.15, 0.85, 0.4, 0.6, 0.95, 0.05, 0.3]),
    )
    .unwrap();
    // target 3 + dataset 2 * 4 + particles 2 * 3
    assert_eq!(swarm_draws(&swarm), 17);
    swarm.advance().unwrap();
    assert_eq!(swarm_draws(&swarm), expected_draws);
}

fn swarm_draws(swarm: &Swarm<SequenceSource>) -> usize {
    swarm.random_source().draws()
}

#[test]
fn seeded_runs_are_bit_identical() {
    let config = SwarmConfig::default().with_substeps(3);
    let mut a = Swarm::seeded(config.clone(), 1234).unwrap();
    let mut b = Swarm::seeded(config, 1234).unwrap();

    while !a.advance().unwrap() {
        assert!(!b.advance().unwrap());
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(
            a.global_best_cost().map(f64::to_bits),
            b.global_best_cost().map(f64::to_bits)
        );
    }
    assert!(b.advance().unwrap());
    assert_eq!(a.summary(), b.summary());
}

#[test]
fn sequence_source_runs_are_identical() {
    let values = [0.11, 0.52, 0.93, 0.34, 0.75, 0.06, 0.67];
    let config = SwarmConfig {
        n_steps: 25,
        ..Default::default()
    }
    .with_randomness(RandomnessPolicy::Shared);
    let a = run(Swarm::with_source(config.clone(), SequenceSource::new(values)).unwrap());
    let b = run(Swarm::with_source(config, SequenceSource::new(values)).unwrap());
    assert_eq!(a, b);
}

fn run<S: RandomSource>(mut swarm: Swarm<S>) -> RunSummary {
    swarm.run_to_completion().unwrap()
}

#[test]
fn observer_sees_every_step() {
    let history = CostHistory::new();
    let mut swarm = Swarm::seeded(SwarmConfig::default(), 9)
        .unwrap()
        .with_observer(history.clone());
    let summary = swarm.run_to_completion().unwrap();

    let costs = history.cost_history();
    assert_eq!(costs.len(), summary.n_steps);
    assert!(costs.windows(2).all(|w| w[1] <= w[0]), "{costs:?}");
    assert_eq!(summary.best.map(|b| b.cost), costs.last().copied());
}

#[test]
fn run_summary_reports_completion() {
    let mut swarm = Swarm::seeded(small_config(), 5).unwrap();
    let summary = swarm.run_to_completion().unwrap();
    assert!(summary.done);
    assert_eq!(summary.steps, 3);
    assert_eq!(summary.target, *swarm.target());
    assert_eq!(summary.best.as_ref().map(|b| b.cost), swarm.global_best_cost());
}

#[test]
fn restart_rolls_a_fresh_run() {
    let history = CostHistory::new();
    let mut swarm = Swarm::seeded(small_config(), 11)
        .unwrap()
        .with_observer(history.clone());
    swarm.advance().unwrap();
    swarm.advance().unwrap();
    let old_target = swarm.target().clone();

    swarm.restart();
    assert_eq!(swarm.step(), 0);
    assert_eq!(swarm.global_best(), None);
    assert_eq!(swarm.r_squared(), None);
    assert_ne!(*swarm.target(), old_target);

    swarm.advance().unwrap();
    assert_eq!(history.cost_history().len(), 3);
}

#[test]
fn os_seeded_swarm_runs() {
    let mut swarm = Swarm::new(small_config()).unwrap();
    let summary = swarm.run_to_completion().unwrap();
    assert!(summary.best.is_some());
    assert_eq!(swarm.particles().len(), 2);
    assert_eq!(swarm.dataset().len(), 4);
}

#[test_case(NonFinitePolicy::Propagate; "propagate")]
#[test_case(NonFinitePolicy::FailFast; "fail fast")]
fn non_finite_costs_follow_policy(policy: NonFinitePolicy) {
    let config = SwarmConfig::default().with_non_finite_policy(policy);
    let mut swarm = Swarm::from_parts(
        config,
        Polynomial::new([1.0, 0.0, 0.0]),
        // x² overflows to infinity
        Dataset::from_points(vec![Point::new(1e200, 0.0)]),
        vec![Particle::new(Polynomial::new([1.0, 0.0, 0.0]))],
        SequenceSource::new([0.5]),
    )
    .unwrap();

    let result = swarm.advance();
    match policy {
        NonFinitePolicy::Propagate => {
            assert!(!result.unwrap());
            assert_eq!(swarm.global_best_cost(), Some(f64::INFINITY));
        }
        NonFinitePolicy::FailFast => match result {
            Err(SwarmError::NonFiniteCost { step, cost }) => {
                assert_eq!(step, 0);
                assert_eq!(cost, f64::INFINITY);
            }
            other => panic!("expected NonFiniteCost, got {other:?}"),
        },
    }
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = SwarmConfig {
        n_particles: 0,
        ..Default::default()
    };
    assert!(matches!(
        Swarm::seeded(config, 1),
        Err(SwarmError::InvalidConfiguration {
            field: "n_particles",
            ..
        })
    ));
}

#[test_case(Polynomial::new([1.0, 0.0, 0.0]), Polynomial::new([1.0, 0.0]), "target"; "target")]
#[test_case(Polynomial::new([1.0, 0.0]), Polynomial::new([1.0, 0.0, 0.0]), "particles"; "particle")]
fn from_parts_checks_coefficient_counts(target: Polynomial, particle: Polynomial, field_name: &str) {
    let config = SwarmConfig::default().with_coefficients(2);
    let result = Swarm::from_parts(
        config,
        target,
        quadratic_points(),
        vec![Particle::new(particle)],
        SequenceSource::default(),
    );
    match result {
        Err(SwarmError::InvalidConfiguration { field, .. }) => assert_eq!(field, field_name),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("expected an error for {field_name}"),
    }
}
