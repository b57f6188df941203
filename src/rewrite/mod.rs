//! Rewrite module - Literal rewrite rules and rule tables
//!
//! Provides:
//! - rule: Rewrite rules and ordered rule sets
//! - table: Built-in phrase table and JSON table loading
//! - lint: Fixed-point checks over a rule table

pub mod lint;
pub mod rule;
pub mod table;
