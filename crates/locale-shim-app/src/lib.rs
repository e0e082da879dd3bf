//! # locale-shim app
//!
//! Wires the localization loader into a view tree: a
//! [`LocalizationProvider`] loads the context once and hands it to every
//! view through a [`LocalizationConsumer`], and [`App`] drives the
//! render, load, re-render cycle.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod provider;
pub mod view;

pub use app::{App, RunOutcome};
pub use error::{AppError, AppResult};
pub use provider::{LocalizationConsumer, LocalizationProvider, ProviderState};
pub use view::{Page, View};
