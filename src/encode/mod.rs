//! Animation encoding.
//!
//! Frames are collected in timeline order, validated as one sequence and written as a single
//! artifact.

/// Animation container, validation and APNG encoding.
pub mod animation;
/// Temp-file-and-rename writes.
pub mod atomic;
