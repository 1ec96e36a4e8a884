//! Health command implementation.

use std::io::Write;

use mdm_client::MdmApi;

use crate::error::CliError;
use crate::output::OutputFormat;

/// Health command executor.
pub struct HealthCommand<'a, A> {
    api: &'a A,
}

impl<'a, A: MdmApi> HealthCommand<'a, A> {
    /// Create a new health command.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Probe the backend and print its report.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe fails or the backend is not healthy.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let report = self.api.health().await?;
        format.write(writer, &report)?;
        if report.is_healthy() {
            Ok(())
        } else {
            Err(CliError::Unhealthy(
                report.status.unwrap_or_else(|| "no status".into()),
            ))
        }
    }
}
