//! Data Models
//!
//! Contains the data structures used throughout the application.

pub mod settings;

pub use settings::*;
