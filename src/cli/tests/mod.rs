//! Unit tests for the command-line surface.
