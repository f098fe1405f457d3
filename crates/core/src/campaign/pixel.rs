//! Conversion pixel updater
//!
//! Read the line item's pixel array once, upsert the requested pixel as
//! active, then write the whole array back through the retrying mutator.

use std::sync::Arc;

use adops_domain::{
    activate_pixel, AdvertiserId, BatchReport, ItemOutcome, LineItemId, PixelChange, PixelId,
    Result, Session,
};
use tracing::{debug, error, info, instrument};

use super::ports::CampaignApi;
use crate::mutation::RetryingMutator;

pub struct PixelUpdater {
    api: Arc<dyn CampaignApi>,
    mutator: RetryingMutator,
}

impl PixelUpdater {
    pub fn new(api: Arc<dyn CampaignApi>, mutator: RetryingMutator) -> Self {
        Self { api, mutator }
    }

    #[instrument(skip(self, session), fields(line_items = line_items.len()))]
    pub async fn apply(
        &self,
        session: &Session,
        advertiser_id: AdvertiserId,
        pixel_id: PixelId,
        line_items: &[LineItemId],
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for &line_item_id in line_items {
            match self.update_line_item(session, advertiser_id, pixel_id, line_item_id).await {
                Ok(()) => {
                    info!(line_item_id, pixel_id, "Conversion pixel activated");
                    report.push(ItemOutcome::success(line_item_id));
                }
                Err(err) => {
                    error!(line_item_id, pixel_id, error_kind = err.label(), error = %err, "Pixel update failed");
                    report.push(ItemOutcome::failure(line_item_id, err));
                }
            }
        }

        report
    }

    async fn update_line_item(
        &self,
        session: &Session,
        advertiser_id: AdvertiserId,
        pixel_id: PixelId,
        line_item_id: LineItemId,
    ) -> Result<()> {
        let mut pixels = self.api.line_item_pixels(session, line_item_id, advertiser_id).await?;

        match activate_pixel(&mut pixels, pixel_id) {
            PixelChange::Activated => debug!(line_item_id, pixel_id, "Existing pixel set active"),
            PixelChange::Appended => debug!(line_item_id, pixel_id, "Pixel appended"),
        }

        let api = self.api.as_ref();
        let pixels = pixels.as_slice();
        self.mutator
            .run("put_line_item_pixels", || {
                api.put_line_item_pixels(session, line_item_id, advertiser_id, pixels)
            })
            .await
    }
}
