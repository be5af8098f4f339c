//! Unit tests for the `asty` facade.

mod engine_tests;
