//! Unit tests for the volunteering module.

mod support;
