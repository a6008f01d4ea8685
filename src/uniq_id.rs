use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

lazy_static::lazy_static! {
    static ref INCREMENTAL_TASK_ID: AtomicU64 = AtomicU64::new(0);
}

/// Process-unique task identifier. Only used to tell tasks apart in
/// diagnostics, never rendered.
#[derive(Clone, Copy, Hash, PartialOrd, PartialEq, Ord, Eq, Debug)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new() -> Self {
        TaskId(INCREMENTAL_TASK_ID.fetch_add(1, Ordering::SeqCst))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
