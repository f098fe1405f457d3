//! `adops geo`

use adops_domain::{AdOpsError, Result, Session};
use tracing::{info, instrument, warn};

use super::{resolve_line_items, CommandReport};
use crate::cli::GeoArgs;
use crate::input::parse_name_list;
use crate::AppContext;

#[instrument(skip_all, fields(country = %args.country))]
pub async fn run(ctx: &AppContext, session: &Session, args: &GeoArgs) -> Result<CommandReport> {
    let mut report = CommandReport::new();

    let cities = ctx
        .resolver
        .cities_for_country(session, &args.country)
        .await?
        .ok_or_else(|| {
            AdOpsError::NotFound(format!("no cities found for country {:?}", args.country.trim()))
        })?;

    // Requested names are only checked against the country's cities; the
    // whole country list is what gets written.
    if let Some(raw) = &args.cities {
        let names = parse_name_list(raw);
        if !names.is_empty() {
            let (found, missing) = cities.retain_names(&names);
            if let Some(found) = &found {
                let found: Vec<&str> = found.as_slice().iter().map(|c| c.name.as_str()).collect();
                report.line(format!("found cities: {}", found.join(", ")));
            }
            if !missing.is_empty() {
                warn!(missing = missing.len(), "Requested cities not in country");
                report.line(format!("cities not found: {}", missing.join(", ")));
            }
        }
    }
    info!(cities = cities.len(), "Target cities resolved");
    report.line(format!("targeting {} cities", cities.len()));

    let line_items = resolve_line_items(ctx, session, &args.target, &mut report).await?;
    let batch = ctx.geo.apply(session, &line_items, &cities).await;
    report.record_batch("geo targeting updated", &batch);

    Ok(report)
}
