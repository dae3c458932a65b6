// =============================================================================
// CART MODULE
// =============================================================================
// The cart store: ordered cart lines plus the open/closed flag of the panel.
//
// INVARIANTS:
// - At most one line per LineId; re-adding the same product/color bumps the
//   quantity instead of appending
// - Every line has quantity >= 1; setting a quantity <= 0 removes the line
// - Totals are recomputed from the lines on every read, never cached
// - Quantities have no upper bound; totals saturate instead of overflowing
// - Only `toggle_panel` touches the panel flag
//
// Mutations return a `CartEvent` describing what happened. The store itself
// never notifies anyone.
// =============================================================================

use std::sync::Arc;

use crate::events::CartEvent;
use crate::models::{CartLine, CheckoutSummary, LineId, Product};

/// Tax rate applied when no configuration overrides it
pub const DEFAULT_TAX_RATE: f64 = 0.08;

#[derive(Debug, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    open: bool,
}

impl CartStore {
    /// Empty cart with the panel closed
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // MUTATIONS
    // -------------------------------------------------------------------------

    /// Add one unit of `product` in `color`.
    ///
    /// Any color string is accepted as-is, including one the product doesn't
    /// list; it simply becomes part of the line's identity.
    pub fn add_item(&mut self, product: &Arc<Product>, color: &str) -> CartEvent {
        let line_id = LineId::new(&product.id, color);

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == line_id) {
            line.quantity = line.quantity.saturating_add(1);
            tracing::debug!(line_id = %line_id, quantity = line.quantity, "Cart line incremented");
            return CartEvent::QuantityIncremented {
                line_id,
                product_name: product.name.clone(),
                color: color.to_string(),
                quantity: line.quantity,
            };
        }

        self.lines.push(CartLine {
            id: line_id.clone(),
            product: Arc::clone(product),
            color: color.to_string(),
            quantity: 1,
        });
        tracing::debug!(line_id = %line_id, "Cart line added");

        CartEvent::LineAdded {
            line_id,
            product_name: product.name.clone(),
            color: color.to_string(),
            unit_price: product.price,
        }
    }

    /// Remove a line. Unknown ids are ignored and yield `None`.
    pub fn remove_item(&mut self, line_id: &LineId) -> Option<CartEvent> {
        let index = self.lines.iter().position(|line| line.id == *line_id)?;
        let line = self.lines.remove(index);
        tracing::debug!(line_id = %line_id, "Cart line removed");

        Some(CartEvent::LineRemoved {
            line_id: line.id,
            product_name: line.product.name.clone(),
            color: line.color,
        })
    }

    /// Set a line's quantity outright.
    ///
    /// `quantity <= 0` is exactly `remove_item`. A positive value on an
    /// unknown line does nothing.
    pub fn update_quantity(&mut self, line_id: &LineId, quantity: i64) -> Option<CartEvent> {
        if quantity <= 0 {
            return self.remove_item(line_id);
        }

        let quantity = quantity as u64;
        let line = self.lines.iter_mut().find(|line| line.id == *line_id)?;
        line.quantity = quantity;

        Some(CartEvent::QuantityUpdated {
            line_id: line_id.clone(),
            quantity,
        })
    }

    pub fn clear_cart(&mut self) -> CartEvent {
        let removed_lines = self.lines.len();
        self.lines.clear();
        CartEvent::Cleared { removed_lines }
    }

    pub fn toggle_panel(&mut self) -> CartEvent {
        self.open = !self.open;
        CartEvent::PanelToggled { open: self.open }
    }

    // -------------------------------------------------------------------------
    // READS
    // -------------------------------------------------------------------------

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == *line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Σ price × quantity
    pub fn total_price(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(0, u64::saturating_add)
    }

    /// Σ quantity
    pub fn total_item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| line.quantity)
            .fold(0, u64::saturating_add)
    }

    /// Σ (original − price) × quantity over discounted lines
    pub fn total_savings(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_savings)
            .fold(0, u64::saturating_add)
    }

    /// Subtotal, tax, grand total and savings for the checkout footer.
    ///
    /// Tax is `round(subtotal × tax_rate)`.
    pub fn checkout_summary(&self, tax_rate: f64) -> CheckoutSummary {
        let subtotal = self.total_price();
        let tax = (subtotal as f64 * tax_rate).round() as u64;

        CheckoutSummary {
            item_count: self.total_item_count(),
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
            savings: self.total_savings(),
        }
    }
}
