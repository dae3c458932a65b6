// =============================================================================
// METRICS MODULE
// =============================================================================
// Counters and gauges describing what shoppers do with the cart and the
// comparison tool.
//
// NOTES:
// - The `metrics` macros are no-ops until a recorder is installed, so the
//   library records unconditionally and the host decides whether to export
// - The host installs a Prometheus recorder when STOREFRONT_METRICS=true and
//   logs the rendered exposition when the session ends
// =============================================================================

use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

// =============================================================================
// METRIC NAMES
// =============================================================================

/// Cart mutations by event
/// Labels: event (line_added, line_removed, ...)
pub const CART_EVENTS_TOTAL: &str = "storefront_cart_events_total";

/// Current Σ quantity in the cart
pub const CART_ITEMS: &str = "storefront_cart_items";

/// Current Σ price × quantity in the cart
pub const CART_VALUE: &str = "storefront_cart_value";

/// Products currently selected for comparison
pub const COMPARISON_SELECTED: &str = "storefront_comparison_selected";

/// Comparison adds that had no effect
/// Labels: reason (full, already_selected)
pub const COMPARISON_REJECTIONS_TOTAL: &str = "storefront_comparison_rejections_total";

// =============================================================================
// SETUP
// =============================================================================
/// Install the Prometheus recorder globally and describe every metric.
///
/// Fails if a recorder was already installed in this process.
pub fn setup_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(CART_EVENTS_TOTAL, "Cart mutations by event type");
    describe_gauge!(CART_ITEMS, "Total quantity of items in the cart");
    describe_gauge!(CART_VALUE, "Total price of the cart in whole currency units");
    describe_gauge!(COMPARISON_SELECTED, "Products selected for comparison");
    describe_counter!(
        COMPARISON_REJECTIONS_TOTAL,
        "Comparison additions ignored because the product was present or the set was full"
    );

    Ok(handle)
}

// =============================================================================
// HELPERS
// =============================================================================

pub fn record_cart_event(event: &str) {
    counter!(CART_EVENTS_TOTAL, "event" => event.to_string()).increment(1);
}

/// Update both cart gauges from freshly computed totals
pub fn set_cart_totals(items: u64, value: u64) {
    gauge!(CART_ITEMS).set(items as f64);
    gauge!(CART_VALUE).set(value as f64);
}

pub fn set_comparison_selected(count: usize) {
    gauge!(COMPARISON_SELECTED).set(count as f64);
}

pub fn record_comparison_rejection(reason: &str) {
    counter!(COMPARISON_REJECTIONS_TOTAL, "reason" => reason.to_string()).increment(1);
}
