//! Tests for the transactional account engine
