//! Capability registry and dispatch logic for Verihub.
//!
//! This crate defines the capability contract (the port every verification
//! module implements), the constructor catalog that stands in for runtime
//! module loading, the immutable registry snapshots with atomic publication,
//! the dispatcher, and the outcome normalizer. It depends only on
//! `verihub-types` -- filesystem scanning and HTTP live elsewhere.

pub mod capability;
pub mod catalog;
pub mod dispatch;
pub mod normalize;
pub mod registry;
