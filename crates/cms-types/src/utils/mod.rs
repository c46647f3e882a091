//! Utility definitions shared across the toolkit.

pub mod constants;
