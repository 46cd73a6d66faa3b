//! Core data structures shared by the hook pipeline

pub mod types;
