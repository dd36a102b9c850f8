//! Foundation types for infini-cards.
//!
//! This crate holds the platform-agnostic pieces shared by the carousel
//! engine and its embedders: configuration, input events, the host trait
//! the engine drives, and error types.

pub mod config;
pub mod error;
pub mod host;
pub mod input;
