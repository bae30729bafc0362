//! Adapter implementations for volunteering ports.

pub mod memory;
pub mod postgres;
