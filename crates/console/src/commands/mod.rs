//! Console commands
//!
//! Each command returns a [`CommandReport`]: operator-facing lines plus
//! whether everything succeeded. Whole-operation failures are returned as
//! errors instead.

pub mod geo;
pub mod pixel;
pub mod report;

use adops_domain::{BatchReport, LineItemId, Result, Session};
use tracing::warn;

use crate::cli::LineItemSelector;
use crate::input::{parse_id, parse_id_list};
use crate::AppContext;

/// Operator-facing result of a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandReport {
    pub lines: Vec<String>,
    pub success: bool,
}

impl CommandReport {
    fn new() -> Self {
        Self { lines: Vec::new(), success: true }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append one line per batch item and fold failures into `success`.
    fn record_batch(&mut self, action: &str, batch: &BatchReport) {
        for outcome in &batch.outcomes {
            match &outcome.result {
                Ok(()) => self.line(format!("line item {}: {action}", outcome.line_item_id)),
                Err(err) => {
                    self.line(format!("line item {}: FAILED ({err})", outcome.line_item_id))
                }
            }
        }
        let failed = batch.failed().count();
        self.line(format!(
            "{} of {} line items updated, {} failed",
            batch.len() - failed,
            batch.len(),
            failed
        ));
        self.success &= batch.is_complete_success();
    }
}

/// Line items named on the command line, or those of the insertion order.
pub(crate) async fn resolve_line_items(
    ctx: &AppContext,
    session: &Session,
    selector: &LineItemSelector,
    report: &mut CommandReport,
) -> Result<Vec<LineItemId>> {
    if let Some(raw) = &selector.line_items {
        let parsed = parse_id_list(raw);
        for token in &parsed.rejected {
            warn!(token = %token, "Skipping non-numeric line item id");
            report.line(format!("skipping invalid line item id {token:?}"));
        }
        return parsed.require_non_empty("line item");
    }

    let raw = selector.insertion_order.as_deref().unwrap_or_default();
    let order_id = parse_id("insertion order", raw)?;
    let ids = ctx.resolver.line_item_ids_for_insertion_order(session, order_id).await?;
    if ids.is_empty() {
        return Err(adops_domain::AdOpsError::NotFound(format!(
            "insertion order {order_id} has no line items"
        )));
    }
    report.line(format!("insertion order {order_id}: {} line items", ids.len()));
    Ok(ids)
}
