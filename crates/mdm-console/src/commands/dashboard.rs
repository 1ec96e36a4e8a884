//! Dashboard command implementation.

use std::io::Write;

use mdm_client::MdmApi;

use crate::dashboard::DashboardStats;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Dashboard command executor.
pub struct DashboardCommand<'a, A> {
    api: &'a A,
}

impl<'a, A: MdmApi> DashboardCommand<'a, A> {
    /// Create a new dashboard command.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Load and print the dashboard. Unreachable reads show as zero or
    /// unhealthy rather than failing the command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the output fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let stats = DashboardStats::load(self.api).await;
        format.write(writer, &stats)
    }
}
