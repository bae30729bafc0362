//! Step definitions for signup deadline scenarios.

pub mod given;
pub mod world;
