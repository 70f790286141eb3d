//! Small helpers shared by services and tests

pub mod random;
