//! Timing helpers for the demo loop

pub mod moving_average;
pub mod stopwatch;
