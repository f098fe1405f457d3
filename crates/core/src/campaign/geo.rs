//! Geo targeting updater
//!
//! For each line item: resolve its profile, then replace the profile's city
//! whitelist through the retrying mutator. Items are independent; a failure on
//! one never stops the batch.

use std::sync::Arc;

use adops_domain::{
    AdOpsError, BatchReport, CityTargetList, ItemOutcome, LineItemId, Result, Session,
};
use tracing::{error, info, instrument};

use super::ports::CampaignApi;
use super::resolvers::TargetingResolver;
use crate::mutation::RetryingMutator;

pub struct GeoUpdater {
    api: Arc<dyn CampaignApi>,
    resolver: TargetingResolver,
    mutator: RetryingMutator,
}

impl GeoUpdater {
    pub fn new(api: Arc<dyn CampaignApi>, mutator: RetryingMutator) -> Self {
        Self { resolver: TargetingResolver::new(Arc::clone(&api)), api, mutator }
    }

    /// Apply `cities` to every line item in order.
    #[instrument(skip(self, session, cities), fields(line_items = line_items.len(), cities = cities.len()))]
    pub async fn apply(
        &self,
        session: &Session,
        line_items: &[LineItemId],
        cities: &CityTargetList,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for &line_item_id in line_items {
            match self.update_line_item(session, line_item_id, cities).await {
                Ok(()) => {
                    info!(line_item_id, "Geo targeting updated");
                    report.push(ItemOutcome::success(line_item_id));
                }
                Err(err) => {
                    error!(line_item_id, error_kind = err.label(), error = %err, "Geo targeting update failed");
                    report.push(ItemOutcome::failure(line_item_id, err));
                }
            }
        }

        report
    }

    async fn update_line_item(
        &self,
        session: &Session,
        line_item_id: LineItemId,
        cities: &CityTargetList,
    ) -> Result<()> {
        let profile_id = self
            .resolver
            .profile_id_for_line_item(session, line_item_id)
            .await?
            .ok_or_else(|| {
                AdOpsError::NotFound(format!("line item {line_item_id} has no profile"))
            })?;

        let api = self.api.as_ref();
        self.mutator
            .run("put_profile_cities", || api.put_profile_cities(session, profile_id, cities))
            .await
    }
}
