// =============================================================================
// EVENTS MODULE
// =============================================================================
// Descriptions of what a state mutation did.
//
// The cart and comparison containers return these instead of talking to a
// notifier. Whoever owns the containers decides what to do with them (see
// `storefront::Storefront`, which forwards them to notification sinks and
// metrics).
// =============================================================================

use serde::Serialize;

use crate::models::LineId;

// -----------------------------------------------------------------------------
// CART EVENTS
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    /// New line appended with quantity 1
    LineAdded {
        line_id: LineId,
        product_name: String,
        color: String,
        unit_price: u64,
    },

    /// Existing line bumped by one
    QuantityIncremented {
        line_id: LineId,
        product_name: String,
        color: String,
        quantity: u64,
    },

    /// Quantity set directly to a positive value
    QuantityUpdated { line_id: LineId, quantity: u64 },

    /// Line removed, directly or through a non-positive quantity update
    LineRemoved {
        line_id: LineId,
        product_name: String,
        color: String,
    },

    Cleared { removed_lines: usize },

    PanelToggled { open: bool },
}

impl CartEvent {
    /// Short label used for metrics and logs
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::LineAdded { .. } => "line_added",
            CartEvent::QuantityIncremented { .. } => "quantity_incremented",
            CartEvent::QuantityUpdated { .. } => "quantity_updated",
            CartEvent::LineRemoved { .. } => "line_removed",
            CartEvent::Cleared { .. } => "cleared",
            CartEvent::PanelToggled { .. } => "panel_toggled",
        }
    }
}

// -----------------------------------------------------------------------------
// COMPARISON OUTCOMES
// -----------------------------------------------------------------------------
/// Result of asking the comparison selector to take another product.
///
/// Only `Added` changes state; the other two are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Added { count: usize },
    AlreadySelected,
    Full,
}

impl ComparisonOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, ComparisonOutcome::Added { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComparisonOutcome::Added { .. } => "added",
            ComparisonOutcome::AlreadySelected => "already_selected",
            ComparisonOutcome::Full => "full",
        }
    }
}
