//! # Web API Request Handlers
//!
//! HTTP handlers organized by resource.

pub mod tasks;
