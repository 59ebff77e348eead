//! Filesystem primitives for fcheck
//!
//! Provides the serializable path codec, SHA-1 content hashing, file
//! identity, and safe artifact I/O used by the auditing core.

pub mod artifact;
pub mod checksum;
pub mod error;
pub mod identity;
pub mod io;
pub mod path;

pub use checksum::Comparison;
pub use error::{Error, Result};
pub use identity::FileIdentity;
pub use path::{SerializablePath, from_serializable, to_serializable};
