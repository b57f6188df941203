//! Backends module - File system operations
//!
//! Provides:
//! - scan: Tutorial page discovery with walkdir

pub mod scan;
