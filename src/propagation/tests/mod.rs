//! Unit tests for the propagation module.
//!
//! Service tests run against the in-memory tracker; tracker failures that
//! the in-memory adapter cannot produce are covered with the generated
//! port mock.

mod service_tests;
