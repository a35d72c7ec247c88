//! Integration tests for Tastemap
//!
//! These tests use wiremock to stand in for the ranking page and the business
//! search API, and tempfile for the cache and database files.

mod common;
mod pipeline_tests;
mod shell_tests;
