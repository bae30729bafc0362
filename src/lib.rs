//! Volunteer platform core: task and signup lifecycle.
//!
//! Organizations post tasks and volunteers sign up for them. This crate
//! decides when a task may be created, when a volunteer may join or leave
//! it, and how deletions cascade so that no signup outlives its task or
//! volunteer and no task outlives its organization.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`volunteering`]: Domain, ports, adapters and services
//! - [`config`]: Environment-driven storage configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod telemetry;
pub mod volunteering;
