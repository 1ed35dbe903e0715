//! Tracks the mint transactions of one Sui address by polling the nBTC indexer.
//!
//! [`MintTrackerBuilder`] yields a [`MintTrackerHandle`] and the task future driving it. The
//! handle retargets, refreshes and stops the task and exposes the current [`TrackerView`] over a
//! watch channel. Dropping the handle ends the task.

mod error;
mod handle;
mod state;
mod task;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::TrackerError;
pub use handle::{MintTrackerBuilder, MintTrackerHandle, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
pub use state::{merge_transactions, TrackTarget, TrackerPhase, TrackerState, TrackerView};
