//! Per-item outcomes of a batch update

use super::LineItemId;
use crate::errors::AdOpsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub line_item_id: LineItemId,
    pub result: Result<(), AdOpsError>,
}

impl ItemOutcome {
    pub fn success(line_item_id: LineItemId) -> Self {
        Self { line_item_id, result: Ok(()) }
    }

    pub fn failure(line_item_id: LineItemId, error: AdOpsError) -> Self {
        Self { line_item_id, result: Err(error) }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes in the order the line items were processed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: ItemOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn succeeded(&self) -> impl Iterator<Item = LineItemId> + '_ {
        self.outcomes.iter().filter(|o| o.is_success()).map(|o| o.line_item_id)
    }

    pub fn failed(&self) -> impl Iterator<Item = (LineItemId, &AdOpsError)> + '_ {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|e| (o.line_item_id, e)))
    }

    pub fn is_complete_success(&self) -> bool {
        self.outcomes.iter().all(ItemOutcome::is_success)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
