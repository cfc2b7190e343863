//! Scheduler module
//!
//! Drives the dashboard's periodic work:
//! - Initial load (new-master choices, then a full refresh cycle)
//! - A full refresh cycle on a fixed period, regardless of earlier failures

mod refresh;

pub use refresh::{RefreshScheduler, SchedulerHandle};
