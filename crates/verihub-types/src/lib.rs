//! Shared domain types for Verihub.
//!
//! This crate contains the core domain types used across the Verihub service:
//! module manifests, parameter declarations, the canonical outcome record,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod error;
pub mod manifest;
pub mod outcome;
