//! Error handling for the Liap Tui engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
