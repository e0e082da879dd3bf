//! # locale-shim common
//!
//! Shared error type, structured logging bootstrap, and test utilities used
//! by every crate in the locale-shim workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, ShimError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
