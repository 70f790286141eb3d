//! Tests for the session token engine

#[cfg(test)]
mod maker_tests;
