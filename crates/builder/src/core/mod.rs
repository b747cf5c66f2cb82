//! Core module containing the builder and its types

pub mod builder;
pub mod context;
pub mod types;
