//! Utility modules for the builder

pub mod events;
pub mod fileops;
pub mod paths;
