//! # Tessera Server Library
//!
//! Dependency wiring and startup utilities for the Tessera server binary.

pub mod di;
pub mod startup;
