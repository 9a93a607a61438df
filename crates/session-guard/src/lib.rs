//! Runtime checks a consuming application applies to sessions and tokens
//!
//! The shapes in [`session_shape`] only guarantee which fields are present.
//! This crate decides whether a well formed session is still acceptable

#![warn(unused_crate_dependencies)]

mod configuration;
mod errors;
mod registry;
pub mod telemetry;
mod tracker;
mod validator;

pub use configuration::{
    get_configuration, get_configuration_from, Configuration, Environment, SessionSettings,
    TelemetrySettings, TrackerSettings,
};
pub use errors::SessionRejection;
pub use registry::SessionRegistry;
pub use tracker::SessionTracker;
pub use validator::SessionValidator;
