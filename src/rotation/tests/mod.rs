//! Unit tests for the rotation module.

mod template_tests;
