use number_ladder_core::{
    BatchConfig, ConfigError, GameConfig, NumberRange, Outcome, RandomizedPlacement, Strategy,
};
use number_ladder_engine::{GameEngine, ScriptedSupply};
use number_ladder_system_batch::{runner_from_config, BatchRunner};

fn config(max: i64, board_size: usize) -> GameConfig {
    GameConfig::new(NumberRange::new(0, max).expect("range"), board_size).expect("config")
}

#[test]
fn single_winning_trial_reports_full_win_percentage() {
    let mut engine =
        GameEngine::with_source(config(10, 4), ScriptedSupply::from_draws(vec![1, 3, 6, 9]));
    let mut runner = BatchRunner::seeded(1, 0).expect("runner");

    let summary = runner.run_sequential(&mut engine);

    assert_eq!(summary.wins(), 1);
    assert_eq!(summary.losses(), 0);
    assert_eq!(summary.win_percentage(), 1.0);
    assert_eq!(runner.outcomes(), &[Outcome::Win]);
}

#[test]
fn sequential_batch_accounts_for_every_trial() {
    let mut engine = GameEngine::seeded(config(1_000, 5), 0x1234_5678);
    let mut runner = BatchRunner::seeded(100, 0x8765_4321).expect("runner");

    let summary = runner.run_sequential(&mut engine);

    assert_eq!(summary.runs(), 100);
    assert_eq!(summary.wins() + summary.losses(), 100);
    assert_eq!(summary.aborted(), 0);
    assert!((0.0..=1.0).contains(&summary.win_percentage()));
    assert_eq!(runner.outcomes().len(), 100);
}

#[test]
fn seeded_batches_are_reproducible() {
    let run = || {
        let mut engine = GameEngine::seeded(config(100, 4), 42);
        let mut runner = BatchRunner::seeded(50, 7).expect("runner");
        let summary = runner.run_randomized(&mut engine);
        (summary, runner.outcomes().to_vec())
    };

    assert_eq!(run(), run());
}

#[test]
fn permutation_placement_never_aborts() {
    let mut engine = GameEngine::seeded(config(1_000, 6), 99);
    let mut runner = BatchRunner::seeded(200, 3)
        .expect("runner")
        .with_placement(RandomizedPlacement::Permutation);

    let summary = runner.run_randomized(&mut engine);

    assert_eq!(summary.aborted(), 0);
    assert_eq!(summary.wins() + summary.losses(), 200);
}

#[test]
fn independent_placement_reports_aborted_trials() {
    let mut engine = GameEngine::seeded(config(1_000, 5), 17);
    let mut runner = BatchRunner::seeded(200, 5)
        .expect("runner")
        .with_placement(RandomizedPlacement::Independent);

    let summary = runner.run_randomized(&mut engine);

    assert_eq!(
        summary.wins() + summary.losses() + summary.aborted(),
        200,
        "every trial must be a win, a loss, or an abort",
    );
    assert!(summary.aborted() > 0, "colliding indices should abort trials");
    assert_eq!(
        runner.outcomes().len(),
        summary.wins() + summary.losses(),
        "aborted trials record no outcome",
    );
}

#[test]
fn outcomes_accumulate_across_batches() {
    let mut engine = GameEngine::seeded(config(50, 3), 8);
    let mut runner = BatchRunner::seeded(10, 8).expect("runner");

    let first = runner.run(Strategy::Sequential, &mut engine);
    let second = runner.run(Strategy::Randomized, &mut engine);

    assert_eq!(first.runs(), 10);
    assert_eq!(second.runs(), 10);
    assert_eq!(runner.outcomes().len(), 20);

    let lifetime = runner.lifetime_summary();
    assert_eq!(lifetime.runs(), 20);
    assert_eq!(lifetime.wins(), first.wins() + second.wins());
    assert_eq!(lifetime.losses(), first.losses() + second.losses());
}

#[test]
fn runner_from_config_applies_placement() {
    let batch = BatchConfig {
        runs: 3,
        strategy: Strategy::Randomized,
        placement: RandomizedPlacement::Independent,
    };
    let runner = runner_from_config(&batch, Some(1)).expect("runner");

    assert_eq!(runner.total_runs(), 3);
    assert_eq!(runner.placement(), RandomizedPlacement::Independent);
}

#[test]
fn single_slot_board_always_wins() {
    let mut engine = GameEngine::seeded(config(10, 1), 2);
    let mut runner = BatchRunner::seeded(25, 2)
        .expect("runner")
        .with_placement(RandomizedPlacement::Independent);

    let summary = runner.run_randomized(&mut engine);

    assert_eq!(summary.wins(), 25);
    assert_eq!(summary.win_percentage(), 1.0);
}

#[test]
fn runner_from_config_rejects_empty_batch() {
    let batch = BatchConfig {
        runs: 0,
        ..BatchConfig::default()
    };

    assert!(matches!(runner_from_config(&batch, Some(1)), Err(ConfigError::NoRuns)));
    assert!(matches!(runner_from_config(&batch, None), Err(ConfigError::NoRuns)));
}
