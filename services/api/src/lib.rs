//! services/api/src/lib.rs
//!
//! The request layer of the trivia API: store adapters, configuration, error
//! mapping and the HTTP router.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
