// =============================================================================
// STOREFRONT MODULE
// =============================================================================
// The application context handed to whatever hosts the UI.
//
// One Storefront owns one cart and one comparison selector, and shares a
// read-only catalog. There are no globals: the host builds a Storefront,
// passes it by reference to its event handlers and drops it on shutdown.
//
// Every mutation goes through here so its event can be fanned out to the
// registered notification sinks and to metrics. The containers underneath
// stay free of both.
// =============================================================================

use std::sync::Arc;

use crate::cart::{CartStore, DEFAULT_TAX_RATE};
use crate::catalog::Catalog;
use crate::comparison::ComparisonSelector;
use crate::config::Config;
use crate::events::{CartEvent, ComparisonOutcome};
use crate::metrics;
use crate::models::{CheckoutSummary, LineId, Notification, Product};
use crate::notify::NotificationSink;

pub struct Storefront {
    catalog: Arc<Catalog>,
    cart: CartStore,
    comparison: ComparisonSelector,
    sinks: Vec<Arc<dyn NotificationSink>>,
    tax_rate: f64,
}

impl Storefront {
    /// Storefront with default settings (8% tax, auto-closing selector)
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cart: CartStore::new(),
            comparison: ComparisonSelector::default(),
            sinks: Vec::new(),
            tax_rate: DEFAULT_TAX_RATE,
        }
    }

    pub fn with_config(catalog: Arc<Catalog>, config: &Config) -> Self {
        Self {
            catalog,
            cart: CartStore::new(),
            comparison: ComparisonSelector::new(config.comparison_auto_close),
            sinks: Vec::new(),
            tax_rate: config.tax_rate,
        }
    }

    pub fn add_sink(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    // -------------------------------------------------------------------------
    // ACCESSORS
    // -------------------------------------------------------------------------
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn comparison(&self) -> &ComparisonSelector {
        &self.comparison
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn checkout_summary(&self) -> CheckoutSummary {
        self.cart.checkout_summary(self.tax_rate)
    }

    // -------------------------------------------------------------------------
    // CART
    // -------------------------------------------------------------------------
    pub fn add_to_cart(&mut self, product: &Arc<Product>, color: &str) -> CartEvent {
        let event = self.cart.add_item(product, color);
        self.publish(&event);
        event
    }

    pub fn remove_from_cart(&mut self, line_id: &LineId) -> Option<CartEvent> {
        let event = self.cart.remove_item(line_id);
        if let Some(event) = &event {
            self.publish(event);
        }
        event
    }

    pub fn update_quantity(&mut self, line_id: &LineId, quantity: i64) -> Option<CartEvent> {
        let event = self.cart.update_quantity(line_id, quantity);
        if let Some(event) = &event {
            self.publish(event);
        }
        event
    }

    pub fn clear_cart(&mut self) -> CartEvent {
        let event = self.cart.clear_cart();
        self.publish(&event);
        event
    }

    pub fn toggle_cart_panel(&mut self) -> CartEvent {
        let event = self.cart.toggle_panel();
        self.publish(&event);
        event
    }

    // -------------------------------------------------------------------------
    // COMPARISON
    // -------------------------------------------------------------------------
    pub fn add_to_comparison(&mut self, product: &Arc<Product>) -> ComparisonOutcome {
        let outcome = self.comparison.add(product);
        match outcome {
            ComparisonOutcome::Added { count } => {
                tracing::debug!(product_id = %product.id, count, "Added to comparison");
                metrics::set_comparison_selected(count);
            }
            rejected => {
                tracing::debug!(product_id = %product.id, reason = rejected.name(), "Comparison add ignored");
                metrics::record_comparison_rejection(rejected.name());
            }
        }
        outcome
    }

    pub fn remove_from_comparison(&mut self, product_id: &str) -> bool {
        let removed = self.comparison.remove(product_id);
        if removed {
            metrics::set_comparison_selected(self.comparison.selected().len());
        }
        removed
    }

    pub fn set_comparison_selector_visible(&mut self, visible: bool) {
        self.comparison.set_selector_visible(visible);
    }

    // -------------------------------------------------------------------------
    // EVENT FAN-OUT
    // -------------------------------------------------------------------------
    fn publish(&self, event: &CartEvent) {
        metrics::record_cart_event(event.name());
        metrics::set_cart_totals(self.cart.total_item_count(), self.cart.total_price());

        if let Some(notification) = Notification::from_cart_event(event) {
            for sink in &self.sinks {
                sink.notify(&notification);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;
    use crate::notify::RecordingSink;

    fn storefront_with_sink() -> (Storefront, Arc<RecordingSink>) {
        let mut storefront = Storefront::new(Arc::new(Catalog::builtin()));
        let sink = Arc::new(RecordingSink::new());
        storefront.add_sink(sink.clone());
        (storefront, sink)
    }

    fn product(storefront: &Storefront, id: &str) -> Arc<Product> {
        Arc::clone(storefront.catalog().product(id).unwrap())
    }

    #[test]
    fn test_add_scenario_notifies_each_step() {
        let (mut storefront, sink) = storefront_with_sink();
        let macbook = product(&storefront, "1");

        storefront.add_to_cart(&macbook, "Silver");
        storefront.add_to_cart(&macbook, "Silver");
        storefront.add_to_cart(&macbook, "Space Gray");

        assert_eq!(storefront.cart().total_item_count(), 3);
        assert_eq!(storefront.cart().total_price(), 7497);

        let toasts = sink.drain();
        let titles: Vec<&str> = toasts.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "MacBook Pro 16\" added to cart!",
                "Added another MacBook Pro 16\" to cart",
                "MacBook Pro 16\" added to cart!",
            ]
        );
        assert_eq!(toasts[1].description, "Silver • Quantity: 2");
    }

    #[test]
    fn test_zero_quantity_update_still_notifies_removal() {
        let (mut storefront, sink) = storefront_with_sink();
        let xps = product(&storefront, "3");
        storefront.add_to_cart(&xps, "Graphite");
        sink.drain();

        storefront.update_quantity(&LineId::new("3", "Graphite"), 0);
        let toasts = sink.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn test_silent_paths_do_not_notify() {
        let (mut storefront, sink) = storefront_with_sink();
        let xps = product(&storefront, "3");
        storefront.add_to_cart(&xps, "Graphite");
        sink.drain();

        storefront.remove_from_cart(&LineId::from("missing"));
        storefront.update_quantity(&LineId::new("3", "Graphite"), 4);
        storefront.toggle_cart_panel();
        storefront.clear_cart();

        assert!(sink.is_empty());
        assert!(storefront.cart().is_open());
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn test_comparison_scenario() {
        let (mut storefront, _sink) = storefront_with_sink();
        let [a, b, c, d] = ["1", "2", "3", "4"].map(|id| product(&storefront, id));

        for p in [&a, &b, &c] {
            assert!(storefront.add_to_comparison(p).is_added());
        }
        assert_eq!(storefront.add_to_comparison(&d), ComparisonOutcome::Full);
        assert_eq!(storefront.comparison().selected().len(), 3);

        assert!(storefront.remove_from_comparison(&b.id));
        assert_eq!(storefront.comparison().selected().len(), 2);

        assert!(storefront.add_to_comparison(&d).is_added());
        let ids: Vec<&str> = storefront
            .comparison()
            .selected()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_with_config_applies_tax_rate_and_auto_close() {
        let config = Config {
            catalog_path: None,
            tax_rate: 0.1,
            comparison_auto_close: false,
            metrics_enabled: false,
        };
        let mut storefront = Storefront::with_config(Arc::new(Catalog::builtin()), &config);
        let air = product(&storefront, "2");
        storefront.add_to_cart(&air, "Midnight");
        assert_eq!(storefront.checkout_summary().tax, 130);

        storefront.set_comparison_selector_visible(true);
        for id in ["1", "2", "3"] {
            let p = product(&storefront, id);
            storefront.add_to_comparison(&p);
        }
        assert!(storefront.comparison().selector_visible());
    }
}
