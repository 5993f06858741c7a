//! Integration tests for the explorer.

pub mod explorer_test;
pub mod fixtures;
pub mod http_test;
pub mod stub;
