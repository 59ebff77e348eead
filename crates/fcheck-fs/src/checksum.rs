//! SHA-1 content digests
//!
//! Digests are lowercase hex strings, the form stored in the `sha1` field of
//! manifest entries. Files are streamed through the hasher in fixed-size
//! chunks and never loaded whole.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha1::{Digest, Sha1};

use crate::{Error, Result};

/// Length of a hex-encoded SHA-1 digest.
pub const DIGEST_HEX_LEN: usize = 40;

const CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of comparing a file against a recorded digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// The file was still present when compared
    pub exists: bool,
    /// The live digest equals the recorded one
    pub matches: bool,
}

impl Comparison {
    /// The file disappeared before it could be compared.
    pub const GONE: Self = Self {
        exists: false,
        matches: false,
    };
}

/// Compute the SHA-1 digest of in-memory content.
pub fn digest_bytes(content: &[u8]) -> String {
    hex::encode(Sha1::digest(content))
}

/// Compute the SHA-1 digest of a file's contents.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be opened or read.
pub fn digest(path: &Path) -> Result<String> {
    let raw = hash_file(path).map_err(|e| Error::io(path, e))?;
    Ok(hex::encode(raw))
}

/// Compare a file against an expected hex digest.
///
/// A file that no longer exists yields [`Comparison::GONE`] instead of an
/// error, so callers can tell "missing" apart from "changed".
///
/// # Errors
///
/// Returns [`Error::InvalidDigest`] if `expected` is not valid hex, or an
/// I/O error if the file exists but cannot be read.
pub fn compare(path: &Path, expected: &str) -> Result<Comparison> {
    match std::fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Comparison::GONE),
        Err(e) => return Err(Error::io(path, e)),
    }

    let expected = hex::decode(expected).map_err(|_| Error::InvalidDigest {
        digest: expected.to_string(),
        path: path.to_path_buf(),
    })?;

    match hash_file(path) {
        Ok(live) => Ok(Comparison {
            exists: true,
            matches: live.as_slice() == expected.as_slice(),
        }),
        // Deleted between the stat and the open
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Comparison::GONE),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// True if `digest` looks like a lowercase hex SHA-1 digest.
pub fn is_valid_digest(digest: &str) -> bool {
    digest.len() == DIGEST_HEX_LEN
        && digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn hash_file(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha1::new();

    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hasher.finalize().to_vec())
}
