#![allow(dead_code)]

pub mod builders;
pub mod stores;

pub use builders::*;
pub use stores::*;
