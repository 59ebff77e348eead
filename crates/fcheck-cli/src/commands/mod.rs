//! Command implementations for fcheck-cli

pub mod check;
pub mod generate;
pub mod pack;

pub use check::run_check;
pub use generate::run_generate;
pub use pack::run_pack;

use std::path::Path;

fn warn_overwrite(kind: &str, path: &Path, action: &str) {
    println!(
        "Warning: Output {kind} path '{}' exists, will be {action}.",
        path.display()
    );
}
