//! Checkpoint schedules
//!
//! A schedule is the ordered set of timestep indices at which the runner
//! hands a snapshot to its sink. Step 0 is allowed and means "snapshot the
//! initial field before any update".

// =================================================================================================
// Checkpoint Schedule
// =================================================================================================

/// Sorted, deduplicated timestep indices to snapshot at
///
/// The last entry doubles as the total number of steps the runner takes.
///
/// # Example
///
/// ```rust
/// use lattice_rs::sim::CheckpointSchedule;
///
/// let schedule = CheckpointSchedule::from_steps(&[300, 10, 0, 50, 10]);
/// assert_eq!(schedule.steps(), &[0, 10, 50, 300]);
/// assert_eq!(schedule.last(), Some(300));
/// assert!(schedule.contains(50));
/// assert!(!schedule.contains(51));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointSchedule {
    steps: Vec<usize>,
}

impl CheckpointSchedule {
    /// Build a schedule from timestep indices, in any order, with duplicates
    pub fn from_steps(steps: &[usize]) -> Self {
        let mut steps = steps.to_vec();
        steps.sort_unstable();
        steps.dedup();
        Self { steps }
    }

    /// The scheduled indices, ascending
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// The final checkpoint, which is also the step count of a run
    pub fn last(&self) -> Option<usize> {
        self.steps.last().copied()
    }

    pub fn contains(&self, step: usize) -> bool {
        self.steps.binary_search(&step).is_ok()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A runnable schedule needs at least one checkpoint
    pub fn validate(&self) -> Result<(), String> {
        if self.steps.is_empty() {
            return Err("Checkpoint schedule is empty: nothing to run".to_string());
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
