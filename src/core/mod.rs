//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Site configuration and error types
//! - Path normalization and file utilities

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
