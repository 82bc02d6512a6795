//! Shared utilities for the viewer coordinator.

/// Per-frame delta time and smoothed FPS.
pub mod frame_timing;
