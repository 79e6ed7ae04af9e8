//! Single test binary entry point.
//!
//! All integration tests compile into one binary to keep link time down.
//!
//! Structure:
//! - helpers: Builders, fixtures and assertion helpers
//! - integration: Multi-component workflow tests
//! - unit: Single-component tests through the public API

mod helpers;
mod integration;
