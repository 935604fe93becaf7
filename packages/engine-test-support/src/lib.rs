//! Engine test support utilities
//!
//! This crate provides the logging initialization shared by the engine's
//! unit and integration tests.

pub mod logging;
