//! Port interfaces for campaign entities on the remote platform
//!
//! Implementations perform exactly one remote call per method and map the
//! response onto domain types. Retries are layered on top by callers.

use adops_domain::{
    AdvertiserId, City, CityTargetList, InsertionOrderId, LineItemId, Pixel, ProfileId, Result,
    Session,
};
use async_trait::async_trait;

#[async_trait]
pub trait CampaignApi: Send + Sync {
    /// Full list of active cities.
    async fn active_cities(&self, session: &Session) -> Result<Vec<City>>;

    /// Line item ids belonging to an insertion order.
    async fn insertion_order_line_items(
        &self,
        session: &Session,
        order_id: InsertionOrderId,
    ) -> Result<Vec<LineItemId>>;

    /// Targeting profile of a line item, `None` when the line item has none.
    async fn line_item_profile(
        &self,
        session: &Session,
        line_item_id: LineItemId,
    ) -> Result<Option<ProfileId>>;

    /// Current pixel attachments of a line item.
    async fn line_item_pixels(
        &self,
        session: &Session,
        line_item_id: LineItemId,
        advertiser_id: AdvertiserId,
    ) -> Result<Vec<Pixel>>;

    /// Replace the city whitelist of a profile.
    async fn put_profile_cities(
        &self,
        session: &Session,
        profile_id: ProfileId,
        cities: &CityTargetList,
    ) -> Result<()>;

    /// Replace the whole pixel array of a line item.
    async fn put_line_item_pixels(
        &self,
        session: &Session,
        line_item_id: LineItemId,
        advertiser_id: AdvertiserId,
        pixels: &[Pixel],
    ) -> Result<()>;
}
