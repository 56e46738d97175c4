//! Driving loop: checkpoint schedules and the simulation runner
//!
//! The grid in [`crate::physics`] only knows how to take one step. This
//! module decides how many steps to take and when to hand a snapshot to a
//! [`SnapshotSink`]. The loop is sequential by design; the only parallelism
//! in the crate is the optional per-cell data parallelism inside a single
//! update, controlled by the threshold below.

use std::sync::atomic::{AtomicUsize, Ordering};

// module declaration
pub mod schedule;
pub mod runner;

// re-export commonly used types for convenience
pub use schedule::CheckpointSchedule;
pub use runner::{RunReport, SimulationRunner, SnapshotSink, VecSink};

// =================================================================================================
// Parallel execution threshold
// =================================================================================================

/// Element count above which the in-place field update dispatches to rayon
/// (only with the `parallel` feature enabled)
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(10_000);

/// Current parallel-dispatch threshold (in field elements)
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-dispatch threshold (in field elements)
///
/// Small fields are faster sequentially; tune this if your meshes are large
/// enough that the per-step thread overhead pays off.
pub fn set_parallel_threshold(threshold: usize) {
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard restoring the previous threshold on drop, so tests can lower
/// it without leaking into other tests
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn set(threshold: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(threshold);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        set_parallel_threshold(self.previous);
    }
}
