//! Dithertone
//!
//! Two-color ordered dithering with bloom, served over HTTP and as a CLI.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
