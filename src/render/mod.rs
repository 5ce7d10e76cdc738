//! Frame generation from the baseline and schedule.

/// Sequential and parallel frame rendering.
pub mod generator;
