//! Removal scripts for redundant files
//!
//! The script deletes, relative to the directory it is run from, every path
//! the diff lists as redundant. Its name embeds the diff timestamp.

use fcheck_fs::SerializablePath;

/// Script dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFlavor {
    /// POSIX `sh`, forward-slash paths
    Shell,
    /// Windows batch, backslash paths, CRLF line endings
    Batch,
}

impl ScriptFlavor {
    /// The dialect the current host executes.
    pub const fn native() -> Self {
        if cfg!(windows) { Self::Batch } else { Self::Shell }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Shell => "sh",
            Self::Batch => "bat",
        }
    }

    /// Deterministic script name for a diff produced at `produced_at`.
    pub fn file_name(&self, produced_at: i64) -> String {
        format!("remove_{}.{}", produced_at, self.extension())
    }

    /// Render the script body.
    pub fn render<'a>(&self, paths: impl IntoIterator<Item = &'a SerializablePath>) -> String {
        let mut script = String::new();
        match self {
            Self::Shell => {
                script.push_str("#!/bin/sh\n");
                for path in paths {
                    script.push_str(&format!("rm -f -- {}\n", shell_quote(path.as_str())));
                }
            }
            Self::Batch => {
                script.push_str("@echo off\r\n");
                for path in paths {
                    let native = path.as_str().replace('/', "\\").replace('%', "%%");
                    script.push_str(&format!("del /f \"{native}\"\r\n"));
                }
            }
        }
        script
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
