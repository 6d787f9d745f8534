//! Environment variable access.

use ::config::Map;
use std::collections::HashMap;

/// Source of the environment variables settings are read from.
pub trait EnvSource {
    /// Returns the variables to read, or `None` to read the process
    /// environment.
    fn variables(&self) -> Option<Map<String, String>>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn variables(&self) -> Option<Map<String, String>> {
        None
    }
}

impl<S: std::hash::BuildHasher> EnvSource for HashMap<String, String, S> {
    fn variables(&self) -> Option<Map<String, String>> {
        Some(
            self.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}
