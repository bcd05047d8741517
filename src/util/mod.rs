//! Utility modules: deadline and cancellation handling.

pub mod timeout;
