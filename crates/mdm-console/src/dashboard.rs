//! Read-only summary of the backend.

use mdm_client::{EntityQuery, HealthReport, MdmApi};
use serde::Serialize;
use tracing::warn;

/// Counts and health shown on the landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Number of entities.
    pub entities: u64,
    /// Number of catalogs.
    pub catalogs: u64,
    /// Whether the health probe reported the healthy token.
    pub healthy: bool,
    /// Backend version from the health probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DashboardStats {
    /// Issue the three reads concurrently.
    ///
    /// A failing read defaults its own figure (zero, or unhealthy) and
    /// never blocks the other two.
    pub async fn load<A: MdmApi>(api: &A) -> Self {
        let query = EntityQuery::default();
        let (entities, catalogs, health) =
            futures::join!(api.list_entities(&query), api.list_catalogs(), api.health());

        let entities = entities.map_or_else(
            |e| {
                warn!(error = %e, "dashboard: entity count unavailable");
                0
            },
            |page| page.count(),
        );
        let catalogs = catalogs.map_or_else(
            |e| {
                warn!(error = %e, "dashboard: catalog count unavailable");
                0
            },
            |list| list.len() as u64,
        );
        let health = health.unwrap_or_else(|e| {
            warn!(error = %e, "dashboard: health probe failed");
            HealthReport::default()
        });

        Self {
            entities,
            catalogs,
            healthy: health.is_healthy(),
            version: health.version,
        }
    }

    /// Health label for display.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.healthy { "Healthy" } else { "Unhealthy" }
    }
}
