use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};

/// Execute the health action.
/// # Errors
/// Returns an error if the API is unreachable or unhealthy.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let submitter = globals.submitter()?;

    submitter
        .health()
        .await
        .with_context(|| format!("API at {} is not healthy", globals.api_base_url))?;

    println!("API at {} is healthy", globals.api_base_url);

    Ok(())
}
