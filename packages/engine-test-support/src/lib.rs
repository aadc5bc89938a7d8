//! Engine test support utilities
//!
//! Shared helpers for engine unit and integration tests, currently the
//! unified logging initialization.

pub mod logging;
