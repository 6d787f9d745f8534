//! Unit tests for the housekeeping module.
