//! Volunteer coordination: organizations, volunteers, tasks and signups.
//!
//! This module implements the task and signup lifecycle: when a task may be
//! created, when a volunteer may join or leave it, and how deletions cascade
//! from organizations and volunteers down to signups. It follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
