//! Generate command implementation

use fcheck_core::ops;
use fcheck_core::options::GenerateOptions;

use crate::error::Result;

/// Run the generate command
pub fn run_generate(opts: &GenerateOptions) -> Result<()> {
    let plan = ops::prepare_generate(opts)?;

    if plan.replaces() {
        super::warn_overwrite("file", plan.output(), "overwritten");
    }
    let outcome = plan.run()?;
    tracing::debug!(files = outcome.manifest.len(), "generate finished");
    println!(
        "Generate successfully, result has been saved to '{}'.",
        outcome.output.display()
    );
    Ok(())
}
