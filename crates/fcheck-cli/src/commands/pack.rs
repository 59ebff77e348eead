//! Pack command implementation

use fcheck_core::options::PackOptions;
use fcheck_core::{ops, timestamp};

use crate::error::Result;

/// Run the pack command
pub fn run_pack(opts: &PackOptions) -> Result<()> {
    let plan = ops::prepare_pack(opts)?;

    if plan.replaces() {
        super::warn_overwrite("directory", plan.output_dir(), "deleted and repacked");
    }
    println!(
        "File diff json was generated at: {}.",
        timestamp::format_local(plan.diff_time())
    );
    let outcome = plan.run()?;
    if let Some(script) = &outcome.report.script {
        tracing::debug!(path = %script.display(), "removal script saved");
    }
    println!(
        "Pack successfully, package has been saved to '{}'.",
        outcome.output_dir.display()
    );
    Ok(())
}
