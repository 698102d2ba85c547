//! Integration test crate for the Maestro timeline engine.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on maestro-core and maestro-timeline to verify they work
//! together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod properties;
