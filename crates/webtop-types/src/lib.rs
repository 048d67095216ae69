//! Foundation types for webtop.
//!
//! This crate contains the types shared by every webtop crate: the framework
//! error enum and the TOML-backed session configuration.

pub mod config;
pub mod error;
