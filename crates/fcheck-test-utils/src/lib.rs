//! Shared test utilities for the fcheck workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for directory fixtures

pub mod tree;

pub use tree::TestTree;
