//! # Tessera REST
//!
//! REST API layer using Axum for Tessera.
//! Exposes the user service under `/api/v1/users` plus health endpoints.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
