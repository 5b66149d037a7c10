//! Orchestrator configuration. Mirrors the shape of the teacher's
//! `config::ParallelConfig` (explicit thread count vs. automatic detection)
//! without carrying over anything file-system- or CLI-related, which are
//! out of scope here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    /// `min(available hardware parallelism, number of syntax trees)`, as
    /// spec.md §5 "Scheduling" specifies.
    Automatic,
    Fixed(usize),
}

impl Parallelism {
    pub fn resolve(self, tree_count: usize) -> usize {
        let hardware = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        match self {
            Parallelism::Automatic => hardware.min(tree_count.max(1)),
            Parallelism::Fixed(n) => n.max(1),
        }
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Parallelism::Automatic
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionConfig {
    pub parallelism: Parallelism,
}

/// A cooperative cancellation signal (spec.md §5 "Cancellation"). Checked
/// between files, not mid-file: in-flight work finishes the current tree
/// before the orchestrator observes the trip.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
