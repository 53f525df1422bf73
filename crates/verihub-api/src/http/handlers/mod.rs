//! HTTP request handlers for the REST API.

pub mod capability;
