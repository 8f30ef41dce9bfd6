use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use gridlearn::{
    Error, QTable,
    adapters::SimulatedEnvironment,
    export::{read_history_csv, write_history_csv},
    grid::layout,
    pipeline::{
        EpisodeSummary, GreedyRoute, MetricsObserver, Observer, TrainingPipeline, TrainingResult,
    },
};
use tempfile::tempdir;

mod common;

use common::{grid, quiet_config};

#[derive(Clone, Default)]
struct Recorder {
    reports: Arc<Mutex<Vec<usize>>>,
    ended: Arc<Mutex<Vec<usize>>>,
}

impl Observer for Recorder {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> gridlearn::Result<()> {
        self.ended.lock().unwrap().push(summary.episode);
        Ok(())
    }

    fn on_report(&mut self, episode: usize, _route: &GreedyRoute) -> gridlearn::Result<()> {
        self.reports.lock().unwrap().push(episode);
        Ok(())
    }
}

/// Raises the cancel flag after a fixed number of episodes.
struct CancelAfter {
    remaining: usize,
    flag: Arc<AtomicBool>,
}

impl Observer for CancelAfter {
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> gridlearn::Result<()> {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.flag.store(true, Ordering::Relaxed);
        }
        Ok(())
    }
}

fn train_room(episodes: usize, seed: u64) -> (TrainingResult, QTable) {
    let room = layout::open_room(5).unwrap();
    let mut table = QTable::new(room.len());
    let mut env = SimulatedEnvironment::new(room);
    let result = TrainingPipeline::new(quiet_config(episodes, seed))
        .run(&mut env, &mut table)
        .unwrap();
    (result, table)
}

#[test]
fn learns_a_shortest_route_across_an_open_room() {
    let (result, _) = train_room(500, 7);

    assert_eq!(result.episodes.len(), 500);
    assert!(!result.cancelled);
    let route = result.final_route.expect("final route");
    assert!(route.reached_goal(), "route: {route}");
    assert_eq!(route.len(), 8);
    assert!(result.successes > result.failures);
}

#[test]
fn seeded_runs_are_reproducible() {
    let (first, first_table) = train_room(60, 11);
    let (second, second_table) = train_room(60, 11);
    assert_eq!(first.reward_history(), second.reward_history());
    assert_eq!(first_table, second_table);
}

#[test]
fn reports_every_nth_episode_starting_at_zero() {
    let recorder = Recorder::default();
    let mut config = quiet_config(25, 3);
    config.report_every = 10;

    let room = layout::open_room(4).unwrap();
    let mut table = QTable::new(room.len());
    let mut env = SimulatedEnvironment::new(room);
    TrainingPipeline::new(config)
        .with_observer(Box::new(recorder.clone()))
        .run(&mut env, &mut table)
        .unwrap();

    assert_eq!(*recorder.reports.lock().unwrap(), vec![0, 10, 20]);
    assert_eq!(recorder.ended.lock().unwrap().len(), 25);
    assert_eq!(env.episodes_started(), 25);
}

#[test]
fn cancellation_keeps_only_finished_episodes() {
    let flag = Arc::new(AtomicBool::new(false));
    let room = layout::open_room(4).unwrap();
    let mut table = QTable::new(room.len());
    let mut env = SimulatedEnvironment::new(room);

    let result = TrainingPipeline::new(quiet_config(50, 1))
        .with_cancel_flag(flag.clone())
        .with_observer(Box::new(CancelAfter {
            remaining: 3,
            flag,
        }))
        .run(&mut env, &mut table)
        .unwrap();

    assert!(result.cancelled);
    assert_eq!(result.episodes.len(), 3);
    assert_eq!(result.planned_episodes, 50);
    assert!(result.final_route.is_some());
}

#[test]
fn cancelled_before_start_runs_nothing() {
    let room = layout::open_room(3).unwrap();
    let mut table = QTable::new(room.len());
    let mut env = SimulatedEnvironment::new(room);

    let result = TrainingPipeline::new(quiet_config(10, 1))
        .with_cancel_flag(Arc::new(AtomicBool::new(true)))
        .run(&mut env, &mut table)
        .unwrap();

    assert!(result.cancelled);
    assert!(result.episodes.is_empty());
    assert!(result.final_route.is_none());
    assert!(env.moves().is_empty());
}

#[test]
fn environment_failures_abort_training() {
    let room = layout::open_room(4).unwrap();
    let mut table = QTable::new(room.len());

    let mut env = SimulatedEnvironment::new(room.clone()).failing_after_moves(5);
    let err = TrainingPipeline::new(quiet_config(100, 2))
        .run(&mut env, &mut table)
        .unwrap_err();
    assert!(matches!(err, Error::Environment { .. }));
    assert_eq!(env.moves().len(), 5);

    let mut env = SimulatedEnvironment::new(room).failing_observations();
    let err = TrainingPipeline::new(quiet_config(100, 2))
        .run(&mut env, &mut table)
        .unwrap_err();
    assert!(matches!(err, Error::Environment { .. }));
}

#[test]
fn delayed_observations_are_awaited() {
    let room = layout::open_room(3).unwrap();
    let mut table = QTable::new(room.len());
    let mut env = SimulatedEnvironment::new(room).with_observation_delay(3);

    let result = TrainingPipeline::new(quiet_config(5, 4))
        .run(&mut env, &mut table)
        .unwrap();
    assert_eq!(result.episodes.len(), 5);
}

#[test]
fn unreachable_goal_is_an_error() {
    let walled = grid("S#.\n##.\n..G");
    let mut table = QTable::new(walled.len());
    let mut env = SimulatedEnvironment::new(walled);
    let err = TrainingPipeline::new(quiet_config(3, 0))
        .run(&mut env, &mut table)
        .unwrap_err();
    assert!(matches!(err, Error::UnreachableDestination { .. }));
    assert!(env.moves().is_empty());
}

#[test]
fn table_must_match_grid_size() {
    let room = layout::open_room(3).unwrap();
    let mut table = QTable::new(4);
    let mut env = SimulatedEnvironment::new(room);
    let err = TrainingPipeline::new(quiet_config(1, 0))
        .run(&mut env, &mut table)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::GridSizeMismatch {
            grid_cells: 9,
            table_states: 4
        }
    ));
}

#[test]
fn metrics_observer_agrees_with_result() {
    let room = layout::open_room(4).unwrap();
    let mut table = QTable::new(room.len());
    let mut env = SimulatedEnvironment::new(room);

    let mut metrics = MetricsObserver::new();
    let mut pipeline = TrainingPipeline::new(quiet_config(30, 8));
    let result = pipeline.run(&mut env, &mut table).unwrap();
    for summary in &result.episodes {
        metrics.on_episode_end(summary).unwrap();
    }

    let stats = metrics.summary();
    assert_eq!(stats.total_episodes, 30);
    assert_eq!(stats.goals, result.successes);
    assert_eq!(stats.obstructed, result.failures);
}

#[test]
fn history_and_summary_export() {
    let (result, _) = train_room(20, 9);
    let dir = tempdir().unwrap();

    let history = dir.path().join("history.csv");
    write_history_csv(&history, &result.episodes).unwrap();
    let rows = read_history_csv(&history).unwrap();
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[0].episode, 0);
    assert_eq!(rows[19].outcome, result.episodes[19].outcome);
    assert_eq!(rows[19].total_reward, result.episodes[19].total_reward);

    let summary = dir.path().join("summary.json");
    result.save(&summary).unwrap();
    let loaded = TrainingResult::load(&summary).unwrap();
    assert_eq!(loaded.episodes.len(), 20);
    assert_eq!(loaded.successes, result.successes);
    assert_eq!(loaded.final_route, result.final_route);
}
