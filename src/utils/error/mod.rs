//! Error handling utilities
//!
//! This module defines the crate-wide error type and its constructors.

pub mod error;
mod helpers;


pub use error::*;
