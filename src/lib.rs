//! Plant catalog client core.
//!
//! Filter, search and pagination coordination for the plant storefront API.
//! The pure core lives in [`model`] and [`state`]; [`api`], [`runtime`] and
//! [`shell`] are the impure shell around it.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod shell;
pub mod state;
