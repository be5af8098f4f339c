//! Unit tests for the CLI runtime.

mod logging_tests;
mod support;
