//! Check command implementation

use fcheck_core::options::CheckOptions;
use fcheck_core::{ops, timestamp};

use crate::error::Result;
use crate::output;

/// Run the check command
pub fn run_check(opts: &CheckOptions) -> Result<()> {
    let plan = ops::prepare_check(opts)?;

    if plan.replaces() {
        super::warn_overwrite("file", plan.output(), "overwritten");
    }
    println!(
        "File list json was generated at: {}.",
        timestamp::format_local(plan.manifest_time())
    );
    let outcome = plan.run()?;
    for (path, status) in &outcome.reconciliation.statuses {
        println!("{}", output::status_line(path.as_str(), *status));
    }
    println!("{}", output::summary(&outcome.reconciliation));

    if let Some(path) = &outcome.diff_path {
        tracing::debug!(path = %path.display(), "diff saved");
    }
    Ok(())
}
