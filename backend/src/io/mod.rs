//! # IO Module
//!
//! Adapter layer between the dashboard UI and the domain services.
//!
//! Translates HTTP requests into domain commands and domain results into the
//! DTOs of the `shared` crate. Domain errors become HTTP status codes here:
//! validation failures are 400, missing orders 404, store failures 502.

pub mod rest;

pub use rest::*;
