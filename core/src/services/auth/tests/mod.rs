//! Tests for authentication service

#[cfg(test)]
mod service_tests;
