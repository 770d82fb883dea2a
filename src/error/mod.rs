//! Error types for validation failures.
//!
//! This module provides types for representing validation errors with the
//! path of the offending value and a human-readable message.

mod validation_error;

pub use validation_error::{errors_to_string, ValidationError, ValidationErrors};
