//! Integration tests for the authentication coordination layer.
//! These tests focus on components working together rather than
//! individual units.

// Import the test harness
pub mod test_harness;

// Import individual test modules
mod fanout_test;
