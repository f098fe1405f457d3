//! `adops pixel`

use adops_domain::{Result, Session};
use tracing::instrument;

use super::{resolve_line_items, CommandReport};
use crate::cli::PixelArgs;
use crate::input::parse_id;
use crate::AppContext;

#[instrument(skip_all)]
pub async fn run(ctx: &AppContext, session: &Session, args: &PixelArgs) -> Result<CommandReport> {
    let advertiser_id = parse_id("advertiser id", &args.advertiser)?;
    let pixel_id = parse_id("pixel id", &args.pixel)?;

    let mut report = CommandReport::new();
    let line_items = resolve_line_items(ctx, session, &args.target, &mut report).await?;

    let batch = ctx.pixels.apply(session, advertiser_id, pixel_id, &line_items).await;
    report.record_batch(&format!("pixel {pixel_id} active"), &batch);

    Ok(report)
}
