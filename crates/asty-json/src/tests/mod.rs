//! Unit tests for `asty_json`.

mod loader_tests;
