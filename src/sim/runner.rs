//! The simulation runner and its collaborator boundary
//!
//! The runner advances a grid step by step up to the last scheduled
//! checkpoint, handing an owned [`GridSnapshot`] to the sink at every
//! scheduled step. Sinks decide what a checkpoint means: collect it, render
//! it to a frame, stream it elsewhere. A sink error aborts the run.

use crate::physics::{DiffusionGrid, GridSnapshot};

use super::schedule::CheckpointSchedule;

// =================================================================================================
// Snapshot Sink
// =================================================================================================

/// Collaborator receiving one snapshot per scheduled checkpoint
pub trait SnapshotSink {
    /// Called once per scheduled step, in ascending step order
    fn on_checkpoint(&mut self, snapshot: &GridSnapshot) -> Result<(), String>;
}

/// In-memory sink collecting every snapshot (testing and analysis)
#[derive(Debug, Default)]
pub struct VecSink {
    snapshots: Vec<GridSnapshot>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[GridSnapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<GridSnapshot> {
        self.snapshots
    }
}

impl SnapshotSink for VecSink {
    fn on_checkpoint(&mut self, snapshot: &GridSnapshot) -> Result<(), String> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}

// =================================================================================================
// Run Report
// =================================================================================================

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Timesteps advanced (the schedule's last checkpoint)
    pub steps_completed: usize,

    /// Checkpoints handed to the sink
    pub checkpoints_emitted: usize,

    /// Physical time reached, `steps_completed * time_step`
    pub final_time: f64,
}

// =================================================================================================
// Simulation Runner
// =================================================================================================

/// Drives a grid through a checkpoint schedule
///
/// The loop is explicit and stateless between runs: every run starts from
/// whatever field the grid currently holds, counts steps from zero, and
/// carries no state of its own beyond the schedule.
///
/// # Example
///
/// ```rust
/// use lattice_rs::physics::{DiffusionGrid, DiffusionParameters, FieldInit};
/// use lattice_rs::sim::{CheckpointSchedule, SimulationRunner, VecSink};
///
/// # fn main() -> Result<(), String> {
/// let params = DiffusionParameters::from_domain(10.0, 100.0, 20, 0.1);
/// let mut grid = DiffusionGrid::new(20, params, FieldInit::Uniform(0.5))
///     .map_err(|e| e.to_string())?;
///
/// let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[0, 10, 50]));
/// let mut sink = VecSink::new();
/// let report = runner.run(&mut grid, &mut sink)?;
///
/// assert_eq!(report.steps_completed, 50);
/// assert_eq!(sink.snapshots()[0].step, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    schedule: CheckpointSchedule,
}

impl SimulationRunner {
    pub fn new(schedule: CheckpointSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &CheckpointSchedule {
        &self.schedule
    }

    /// Run the grid up to the last checkpoint, emitting snapshots along the
    /// way
    ///
    /// A checkpoint at step 0 captures the initial field before any update.
    /// Fails on an empty schedule or the first sink error.
    pub fn run<S: SnapshotSink>(
        &self,
        grid: &mut DiffusionGrid,
        sink: &mut S,
    ) -> Result<RunReport, String> {
        self.schedule.validate()?;
        let last = self
            .schedule
            .last()
            .ok_or_else(|| "Checkpoint schedule is empty: nothing to run".to_string())?;

        let mut emitted = 0;
        if self.schedule.contains(0) {
            sink.on_checkpoint(&grid.snapshot(0))?;
            emitted += 1;
        }

        for step in 1..=last {
            grid.step();
            if self.schedule.contains(step) {
                sink.on_checkpoint(&grid.snapshot(step))?;
                emitted += 1;
            }
        }

        Ok(RunReport {
            steps_completed: last,
            checkpoints_emitted: emitted,
            final_time: last as f64 * grid.params().time_step,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{DiffusionParameters, FieldInit};
    use approx::assert_relative_eq;

    fn small_grid() -> DiffusionGrid {
        let params = DiffusionParameters::from_domain(10.0, 100.0, 5, 0.1);
        DiffusionGrid::new(5, params, FieldInit::UniformRandom { seed: Some(2) }).unwrap()
    }

    #[test]
    fn test_run_emits_checkpoints_in_schedule_order() {
        let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[7, 3, 0]));
        let mut grid = small_grid();
        let mut sink = VecSink::new();

        let report = runner.run(&mut grid, &mut sink).unwrap();

        assert_eq!(report.steps_completed, 7);
        assert_eq!(report.checkpoints_emitted, 3);
        let steps: Vec<usize> = sink.snapshots().iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![0, 3, 7]);
    }

    #[test]
    fn test_step_zero_checkpoint_is_the_initial_field() {
        let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[0, 5]));
        let mut grid = small_grid();
        let initial = grid.field().clone();
        let mut sink = VecSink::new();

        runner.run(&mut grid, &mut sink).unwrap();

        assert_eq!(sink.snapshots()[0].values, initial);
        assert_ne!(sink.snapshots()[1].values, initial);
    }

    #[test]
    fn test_run_without_step_zero_emits_no_initial_snapshot() {
        let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[4]));
        let mut grid = small_grid();
        let mut sink = VecSink::new();

        let report = runner.run(&mut grid, &mut sink).unwrap();

        assert_eq!(report.checkpoints_emitted, 1);
        assert_eq!(sink.snapshots()[0].step, 4);
    }

    #[test]
    fn test_final_time_uses_grid_timestep() {
        let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[10]));
        let mut grid = small_grid(); // dt = 0.1
        let mut sink = VecSink::new();

        let report = runner.run(&mut grid, &mut sink).unwrap();

        assert_relative_eq!(report.final_time, 1.0);
    }

    #[test]
    fn test_empty_schedule_is_an_error() {
        let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[]));
        let mut grid = small_grid();
        let mut sink = VecSink::new();

        assert!(runner.run(&mut grid, &mut sink).is_err());
    }

    #[test]
    fn test_sink_error_aborts_the_run() {
        struct FailingSink;
        impl SnapshotSink for FailingSink {
            fn on_checkpoint(&mut self, _snapshot: &GridSnapshot) -> Result<(), String> {
                Err("disk full".to_string())
            }
        }

        let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[2, 4]));
        let mut grid = small_grid();
        let result = runner.run(&mut grid, &mut FailingSink);

        assert_eq!(result.unwrap_err(), "disk full");
    }

    #[test]
    fn test_run_matches_manual_stepping() {
        let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[6]));
        let mut driven = small_grid();
        let mut manual = small_grid();
        let mut sink = VecSink::new();

        runner.run(&mut driven, &mut sink).unwrap();
        for _ in 0..6 {
            manual.step();
        }

        assert_eq!(sink.snapshots()[0].values, *manual.field());
        assert_eq!(driven.field(), manual.field());
    }
}
