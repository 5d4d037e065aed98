//! # Domain Layer
//!
//! Core types and contracts of the Model Routing Engine.
//!
//! This crate holds the data model (providers, models, routing policies,
//! power levels, credentials, usage records), the error taxonomy, and the
//! port traits every external collaborator is reached through. It performs
//! no I/O: implementations live in `mre-infrastructure`, orchestration in
//! `mre-application`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
