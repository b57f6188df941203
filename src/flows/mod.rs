//! Flows module - Read-modify-write passes over site pages
//!
//! Provides:
//! - links: Rewrite cross-language navigation links on tutorial pages
//! - translate: Apply a phrase table to a single page

pub mod links;
pub mod translate;
