//! Read-only lookups against the remote platform
//!
//! A response with the wrong shape surfaces as `MalformedResponse` from the
//! port and is never retried. A well-formed response with nothing in it is a
//! distinct empty outcome (`None`), not an error.

use std::sync::Arc;

use adops_domain::{
    filter_cities_by_country, AdOpsError, CityTargetList, InsertionOrderId, LineItemId, ProfileId,
    Result, Session,
};
use tracing::{debug, info, instrument};

use super::ports::CampaignApi;

/// Resolves identifiers and targeting units needed by the updaters
pub struct TargetingResolver {
    api: Arc<dyn CampaignApi>,
}

impl TargetingResolver {
    pub fn new(api: Arc<dyn CampaignApi>) -> Self {
        Self { api }
    }

    /// Active cities whose country matches `country` (trimmed,
    /// case-insensitive); `None` when nothing matches.
    #[instrument(skip(self, session))]
    pub async fn cities_for_country(
        &self,
        session: &Session,
        country: &str,
    ) -> Result<Option<CityTargetList>> {
        if country.trim().is_empty() {
            return Err(AdOpsError::Validation("country name must not be empty".to_string()));
        }

        let cities = self.api.active_cities(session).await?;
        let matches = filter_cities_by_country(&cities, country);
        info!(total = cities.len(), matched = matches.len(), "Resolved cities for country");

        Ok(CityTargetList::try_from(matches).ok())
    }

    #[instrument(skip(self, session))]
    pub async fn line_item_ids_for_insertion_order(
        &self,
        session: &Session,
        order_id: InsertionOrderId,
    ) -> Result<Vec<LineItemId>> {
        let ids = self.api.insertion_order_line_items(session, order_id).await?;
        debug!(count = ids.len(), "Resolved line items for insertion order");
        Ok(ids)
    }

    #[instrument(skip(self, session))]
    pub async fn profile_id_for_line_item(
        &self,
        session: &Session,
        line_item_id: LineItemId,
    ) -> Result<Option<ProfileId>> {
        self.api.line_item_profile(session, line_item_id).await
    }
}
