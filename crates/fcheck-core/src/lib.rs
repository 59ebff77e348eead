//! Directory integrity auditing engine
//!
//! This crate implements the three operations of fcheck:
//!
//! - **Manifest building**: snapshot every regular file under a directory as
//!   a (path, SHA-1, size) record
//! - **Reconciliation**: compare a manifest to the live directory and classify
//!   each path as pass, mismatching, missing or redundant
//! - **Packaging**: copy mismatching and missing files into a repair package
//!   and script the removal of redundant ones
//!
//! # Architecture
//!
//! ```text
//!        fcheck-cli
//!            |
//!       fcheck-core   (manifest, reconcile, pack, ops)
//!            |
//!        fcheck-fs    (path codec, checksum, artifact I/O)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fcheck_core::{Result, manifest, reconcile};
//!
//! fn audit(dir: &std::path::Path) -> Result<bool> {
//!     let snapshot = manifest::build(dir)?;
//!     let result = reconcile::reconcile(dir, &snapshot)?;
//!     Ok(result.is_clean())
//! }
//! ```

pub mod diff;
pub mod error;
pub mod manifest;
pub mod ops;
pub mod options;
pub mod pack;
pub mod reconcile;
pub mod script;
pub mod timestamp;

mod nullable;
mod walk;

pub use diff::{Category, Diff};
pub use error::{Error, ErrorKind, Result};
pub use manifest::{Manifest, ManifestBuilder, ManifestEntry};
pub use options::{CheckOptions, GenerateOptions, Mode, PackOptions, RunOptions};
pub use pack::{PackReport, Packager, ensure_not_nesting};
pub use reconcile::{FileStatus, MAX_LABEL_LEN, Reconciler, Reconciliation};
pub use script::ScriptFlavor;
