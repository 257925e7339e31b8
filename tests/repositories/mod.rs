//! Repository Tests Module
//!
//! Task listings end to end: raw parameters in, one page of documents out.
