//! Web API Tests Module
//!
//! Requests go through the full axum router with `tower::ServiceExt::oneshot`.

pub mod tasks;
