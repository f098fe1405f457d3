//! `adops report`

use adops_domain::{AdOpsError, ReportRequest, ReportWindow, Result, Session};
use tracing::instrument;

use super::CommandReport;
use crate::cli::ReportArgs;
use crate::input::parse_id;
use crate::AppContext;

/// Window from the arguments; clap already enforces dates xor interval.
fn window(args: &ReportArgs) -> Result<ReportWindow> {
    match (args.start, args.end, &args.interval) {
        (Some(start), Some(end), None) => ReportWindow::custom(start, end),
        (None, None, Some(interval)) => ReportWindow::interval(interval.clone()),
        _ => Err(AdOpsError::Validation(
            "give either --start and --end, or --interval".to_string(),
        )),
    }
}

#[instrument(skip_all)]
pub async fn run(ctx: &AppContext, session: &Session, args: &ReportArgs) -> Result<CommandReport> {
    let advertiser_id = parse_id("advertiser id", &args.advertiser)?;
    let format = args.format.unwrap_or(ctx.config.report.format);
    let request =
        ReportRequest::site_domain_performance(advertiser_id, window(args)?).with_format(format);

    let artifact = ctx.report_orchestrator(args.output_dir.clone()).run(session, &request).await?;

    let mut report = CommandReport::new();
    report.line(format!("report {} downloaded", artifact.report_id));
    report.line(format!("saved to {}", artifact.path.display()));
    Ok(report)
}
