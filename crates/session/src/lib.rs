use std::sync::mpsc;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use sequence::GenerateError;
use sequence::{MAX_RANDOM_VALUE, SMALL_VALUE_THRESHOLD};
pub use toggle_sort::{Direction, SwapEvent};
use toggle_sort::{sort_by_direction, sort_with_trace};

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub max_value: i32,
    pub threshold: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_value: MAX_RANDOM_VALUE,
            threshold: SMALL_VALUE_THRESHOLD,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a sort is already in progress")]
    SortInProgress,
    #[error("nothing to sort, generate a sequence first")]
    EmptySequence,
    #[error("no cell at index {index}, the sequence has {len} values")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("sort worker terminated without completing")]
    WorkerLost,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClickOutcome {
    /// The clicked value was small enough; the sequence was regenerated with
    /// that value as the new count.
    Regenerated,
    /// The clicked value exceeds the threshold; nothing changed.
    AboveThreshold(i32),
}

#[derive(Clone, Debug)]
pub struct SortOutcome {
    pub used: Direction,
    pub next: Direction,
    pub trace: Vec<SwapEvent>,
}

#[derive(Clone, Debug)]
pub struct FinishedSort {
    pub values: Vec<i32>,
    pub used: Direction,
    pub next: Direction,
    pub swap_count: usize,
}

/// Handle to an in-flight background sort. Swap events arrive on the channel
/// in the exact order partitioning performed them; the channel closes once
/// the sort is done, after which `wait` yields the sorted values.
pub struct SortWorker {
    rx: mpsc::Receiver<SwapEvent>,
    handle: thread::JoinHandle<FinishedSort>,
}

impl SortWorker {
    pub fn events(&self) -> &mpsc::Receiver<SwapEvent> {
        &self.rx
    }

    pub fn wait(self) -> Result<FinishedSort, SessionError> {
        self.handle.join().map_err(|_| SessionError::WorkerLost)
    }
}

/// Owns the mutable state of one generate/sort session: the sequence, the
/// direction flag, and the sort-in-progress latch that keeps generation and
/// sorting single-writer.
pub struct Session {
    values: Vec<i32>,
    // direction the previous run used; the next run uses its toggle
    direction: Direction,
    sorting: bool,
    config: SessionConfig,
    rng: StdRng,
}

const INITIAL_DIRECTION: Direction = Direction::Descending;

impl Session {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_config(config: SessionConfig, seed: u64) -> Self {
        Self {
            config,
            ..Self::with_seed(seed)
        }
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            values: Vec::new(),
            direction: INITIAL_DIRECTION,
            sorting: false,
            config: SessionConfig::default(),
            rng,
        }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn threshold(&self) -> i32 {
        self.config.threshold
    }

    pub fn is_sorting(&self) -> bool {
        self.sorting
    }

    /// Direction the next sort run will use; front-ends label their sort
    /// trigger with this.
    pub fn next_direction(&self) -> Direction {
        self.direction.toggled()
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.sorting {
            Err(SessionError::SortInProgress)
        } else {
            Ok(())
        }
    }

    /// Replaces the sequence wholesale with `count` fresh random values.
    pub fn generate(&mut self, count: usize) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let values = sequence::generate(
            &mut self.rng,
            count,
            self.config.max_value,
            self.config.threshold,
        )?;
        info!(count, "generated sequence");
        self.values = values;
        Ok(())
    }

    /// Click on the grid cell at `index`: a small value regenerates the
    /// sequence with that value as the new count, anything else is rejected
    /// with a warning outcome and no state change.
    pub fn click(&mut self, index: usize) -> Result<ClickOutcome, SessionError> {
        self.ensure_idle()?;
        let len = self.values.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }

        let value = self.values[index];
        if value <= self.config.threshold {
            self.generate(value as usize)?;
            Ok(ClickOutcome::Regenerated)
        } else {
            warn!(value, threshold = self.config.threshold, "click above threshold");
            Ok(ClickOutcome::AboveThreshold(self.config.threshold))
        }
    }

    /// Sorts in place on the calling thread. The stored direction flag is
    /// toggled first and the sort uses the freshly toggled value, so the
    /// reported `next` always names the action a subsequent run performs.
    pub fn sort(&mut self) -> Result<SortOutcome, SessionError> {
        self.ensure_idle()?;
        if self.values.is_empty() {
            return Err(SessionError::EmptySequence);
        }

        self.direction = self.direction.toggled();
        let used = self.direction;
        let trace = sort_with_trace(&mut self.values, used);
        info!(direction = used.label(), swaps = trace.len(), "sorted sequence");

        Ok(SortOutcome {
            used,
            next: used.toggled(),
            trace,
        })
    }

    /// Moves the sequence into a worker thread and sorts there, streaming
    /// swap events back as they happen. Every mutating operation is rejected
    /// until the returned worker's outcome is handed to `finish_sort`.
    pub fn start_sort(&mut self) -> Result<SortWorker, SessionError> {
        self.ensure_idle()?;
        if self.values.is_empty() {
            return Err(SessionError::EmptySequence);
        }

        self.direction = self.direction.toggled();
        let used = self.direction;
        let mut values = std::mem::take(&mut self.values);
        self.sorting = true;
        debug!(len = values.len(), direction = used.label(), "sort worker starting");

        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let mut swap_count = 0_usize;
            sort_by_direction(&mut values, used, |event| {
                swap_count += 1;
                // a consumer that went away just stops observing the trace
                let _ = tx.send(event);
            });
            FinishedSort {
                values,
                used,
                next: used.toggled(),
                swap_count,
            }
        });

        Ok(SortWorker { rx, handle })
    }

    /// Reinstalls the sorted sequence and releases the in-progress latch.
    pub fn finish_sort(&mut self, finished: FinishedSort) {
        info!(
            direction = finished.used.label(),
            swaps = finished.swap_count,
            "sort worker finished"
        );
        self.values = finished.values;
        self.sorting = false;
    }

    /// Back to the initial screen: no sequence, first sort ascending again.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.values.clear();
        self.direction = INITIAL_DIRECTION;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
