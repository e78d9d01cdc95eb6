//! Command implementations for the motif-mark CLI

pub mod config;
pub mod mark;
pub mod oneline;
