//! Integration tests for the worker pool
//!
//! These tests use wiremock to serve listing pages and drive full sweeps end-to-end.

mod sweep_tests;
