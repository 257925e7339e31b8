//! Query Builder Tests Module
//!
//! Parameter parsing, descriptor refinement and the pagination executor.

pub mod pagination;
pub mod params;
