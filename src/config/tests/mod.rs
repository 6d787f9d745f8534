//! Unit tests for configuration loading.

mod layer_tests;
mod settings_tests;
