//! Unit tests for `asty_core`.

mod compile_tests;
