// =============================================================================
// HANDLERS MODULE
// =============================================================================
// Turns UI actions into Storefront calls and builds the response snapshot.
//
// Actions arrive as JSON tagged by "action", e.g.
//   {"action": "add_item", "product_id": "1", "color": "Silver"}
//   {"action": "update_quantity", "line_id": "1-Silver", "quantity": 0}
//   {"action": "showcase", "brand": "Apple", "sort": "price-low"}
//
// Product ids are resolved against the catalog here, at the boundary. The
// containers below never see an id they have to look up.
// =============================================================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::events::{CartEvent, ComparisonOutcome};
use crate::models::{
    BrandFilter, CartLine, CheckoutSummary, ComparisonRow, LineId, Product, SortOrder,
};
use crate::storefront::Storefront;

// =============================================================================
// ACTIONS
// =============================================================================
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // ----- Cart -----
    /// `color` defaults to the product's first color
    AddItem {
        product_id: String,
        #[serde(default)]
        color: Option<String>,
    },
    RemoveItem { line_id: LineId },
    UpdateQuantity { line_id: LineId, quantity: i64 },
    ClearCart,
    ToggleCart,
    CheckoutSummary,

    // ----- Comparison -----
    AddToComparison { product_id: String },
    RemoveFromComparison { product_id: String },
    SetSelectorVisible { visible: bool },
    ComparisonTable,

    // ----- Catalog -----
    Showcase {
        #[serde(default)]
        brand: BrandFilter,
        #[serde(default)]
        sort: SortOrder,
    },
    BrandFilters,

    Snapshot,
}

impl Action {
    pub fn parse(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| AppError::InvalidAction(e.to_string()))
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// One cart panel row: the line plus its derived figures
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineSnapshot {
    #[serde(flatten)]
    pub line: CartLine,
    pub line_total: u64,
    /// "% OFF" badge, absent when the product isn't on sale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u64>,
}

impl From<&CartLine> for CartLineSnapshot {
    fn from(line: &CartLine) -> Self {
        Self {
            line: line.clone(),
            line_total: line.line_total(),
            discount_percent: line.product.discount_percent(),
        }
    }
}

/// Cart state as the panel and navbar badge see it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub open: bool,
    pub lines: Vec<CartLineSnapshot>,
    pub summary: CheckoutSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSnapshot {
    pub selector_visible: bool,
    /// No free slot left for another product
    pub full: bool,
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionResponse {
    Cart {
        #[serde(skip_serializing_if = "Option::is_none")]
        event: Option<CartEvent>,
        cart: CartSnapshot,
    },
    Comparison {
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<ComparisonOutcome>,
        comparison: ComparisonSnapshot,
    },
    ComparisonTable { rows: Vec<ComparisonRow> },
    Checkout { summary: CheckoutSummary },
    Products { products: Vec<Arc<Product>> },
    BrandFilters { filters: Vec<String> },
    Snapshot {
        cart: CartSnapshot,
        comparison: ComparisonSnapshot,
    },
}

// =============================================================================
// DISPATCH
// =============================================================================
/// Apply one action to the storefront.
///
/// Only unknown product ids can fail; every cart and comparison operation
/// itself is total.
pub fn handle(storefront: &mut Storefront, action: Action) -> AppResult<ActionResponse> {
    tracing::debug!(?action, "Handling action");

    let response = match action {
        Action::AddItem { product_id, color } => {
            let product = resolve(storefront, &product_id)?;
            let color = match color {
                Some(color) => color,
                None => product.default_color().unwrap_or_default().to_string(),
            };
            let event = storefront.add_to_cart(&product, &color);
            cart_response(storefront, Some(event))
        }
        Action::RemoveItem { line_id } => {
            let event = storefront.remove_from_cart(&line_id);
            cart_response(storefront, event)
        }
        Action::UpdateQuantity { line_id, quantity } => {
            let event = storefront.update_quantity(&line_id, quantity);
            cart_response(storefront, event)
        }
        Action::ClearCart => {
            let event = storefront.clear_cart();
            cart_response(storefront, Some(event))
        }
        Action::ToggleCart => {
            let event = storefront.toggle_cart_panel();
            cart_response(storefront, Some(event))
        }
        Action::CheckoutSummary => ActionResponse::Checkout {
            summary: storefront.checkout_summary(),
        },

        Action::AddToComparison { product_id } => {
            let product = resolve(storefront, &product_id)?;
            let outcome = storefront.add_to_comparison(&product);
            comparison_response(storefront, Some(outcome))
        }
        Action::RemoveFromComparison { product_id } => {
            storefront.remove_from_comparison(&product_id);
            comparison_response(storefront, None)
        }
        Action::SetSelectorVisible { visible } => {
            storefront.set_comparison_selector_visible(visible);
            comparison_response(storefront, None)
        }
        Action::ComparisonTable => ActionResponse::ComparisonTable {
            rows: storefront.comparison().rows(),
        },

        Action::Showcase { brand, sort } => ActionResponse::Products {
            products: storefront.catalog().showcase(&brand, sort),
        },
        Action::BrandFilters => ActionResponse::BrandFilters {
            filters: storefront.catalog().brand_filters(),
        },

        Action::Snapshot => ActionResponse::Snapshot {
            cart: cart_snapshot(storefront),
            comparison: comparison_snapshot(storefront),
        },
    };

    Ok(response)
}

fn resolve(storefront: &Storefront, product_id: &str) -> AppResult<Arc<Product>> {
    storefront
        .catalog()
        .product(product_id)
        .cloned()
        .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))
}

fn cart_snapshot(storefront: &Storefront) -> CartSnapshot {
    CartSnapshot {
        open: storefront.cart().is_open(),
        lines: storefront
            .cart()
            .lines()
            .iter()
            .map(CartLineSnapshot::from)
            .collect(),
        summary: storefront.checkout_summary(),
    }
}

fn comparison_snapshot(storefront: &Storefront) -> ComparisonSnapshot {
    ComparisonSnapshot {
        selector_visible: storefront.comparison().selector_visible(),
        full: storefront.comparison().is_full(),
        product_ids: storefront
            .comparison()
            .selected()
            .iter()
            .map(|product| product.id.clone())
            .collect(),
    }
}

fn cart_response(storefront: &Storefront, event: Option<CartEvent>) -> ActionResponse {
    ActionResponse::Cart {
        event,
        cart: cart_snapshot(storefront),
    }
}

fn comparison_response(
    storefront: &Storefront,
    outcome: Option<ComparisonOutcome>,
) -> ActionResponse {
    ActionResponse::Comparison {
        outcome,
        comparison: comparison_snapshot(storefront),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn storefront() -> Storefront {
        Storefront::new(Arc::new(Catalog::builtin()))
    }

    fn run(storefront: &mut Storefront, raw: &str) -> ActionResponse {
        let action = Action::parse(raw).expect("valid action");
        handle(storefront, action).expect("action succeeds")
    }

    #[test]
    fn test_add_item_defaults_to_first_color() {
        let mut sf = storefront();
        let response = run(&mut sf, r#"{"action":"add_item","product_id":"2"}"#);

        match response {
            ActionResponse::Cart { event, cart } => {
                assert!(matches!(event, Some(CartEvent::LineAdded { .. })));
                assert_eq!(cart.lines[0].line.id.as_str(), "2-Midnight");
                assert_eq!(cart.lines[0].discount_percent, None);
                assert_eq!(cart.summary.subtotal, 1299);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut sf = storefront();
        run(&mut sf, r#"{"action":"add_item","product_id":"1","color":"Silver"}"#);
        let response = run(
            &mut sf,
            r#"{"action":"update_quantity","line_id":"1-Silver","quantity":-5}"#,
        );

        match response {
            ActionResponse::Cart { event, cart } => {
                assert!(matches!(event, Some(CartEvent::LineRemoved { .. })));
                assert!(cart.lines.is_empty());
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_unknown_product_is_an_error() {
        let mut sf = storefront();
        let action = Action::parse(r#"{"action":"add_to_comparison","product_id":"99"}"#).unwrap();
        let err = handle(&mut sf, action).unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound(id) if id == "99"));
    }

    #[test]
    fn test_malformed_action_is_rejected() {
        assert!(matches!(
            Action::parse(r#"{"action":"checkout"}"#),
            Err(AppError::InvalidAction(_))
        ));
        assert!(Action::parse("not json").is_err());
    }

    #[test]
    fn test_showcase_query() {
        let mut sf = storefront();
        let response = run(
            &mut sf,
            r#"{"action":"showcase","brand":"Apple","sort":"price-low"}"#,
        );
        match response {
            ActionResponse::Products { products } => {
                let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
                assert_eq!(ids, vec!["2", "1"]);
            }
            other => panic!("unexpected response {:?}", other),
        }

        match run(&mut sf, r#"{"action":"showcase"}"#) {
            ActionResponse::Products { products } => assert_eq!(products.len(), 8),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_comparison_actions() {
        let mut sf = storefront();
        for id in ["1", "3", "6"] {
            run(
                &mut sf,
                &format!(r#"{{"action":"add_to_comparison","product_id":"{}"}}"#, id),
            );
        }
        let response = run(&mut sf, r#"{"action":"add_to_comparison","product_id":"8"}"#);
        match response {
            ActionResponse::Comparison { outcome, comparison } => {
                assert_eq!(outcome, Some(ComparisonOutcome::Full));
                assert!(comparison.full);
                assert_eq!(comparison.product_ids, vec!["1", "3", "6"]);
            }
            other => panic!("unexpected response {:?}", other),
        }

        match run(&mut sf, r#"{"action":"comparison_table"}"#) {
            ActionResponse::ComparisonTable { rows } => {
                assert_eq!(rows[4].label, "Graphics");
                assert_eq!(rows[4].values.len(), 3);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut sf = storefront();
        run(&mut sf, r#"{"action":"add_item","product_id":"3","color":"Graphite"}"#);
        run(&mut sf, r#"{"action":"toggle_cart"}"#);

        let snapshot = run(&mut sf, r#"{"action":"snapshot"}"#);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["type"], "snapshot");
        assert_eq!(json["cart"]["open"], true);
        assert_eq!(json["cart"]["lines"][0]["id"], "3-Graphite");
        assert_eq!(json["cart"]["lines"][0]["product"]["originalPrice"], 2199);
        assert_eq!(json["cart"]["lines"][0]["lineTotal"], 1899);
        // (2199 - 1899) / 2199 = 13.6%
        assert_eq!(json["cart"]["lines"][0]["discountPercent"], 14);
        assert_eq!(json["cart"]["summary"]["savings"], 300);
        assert_eq!(json["comparison"]["productIds"], serde_json::json!([]));
        assert_eq!(json["comparison"]["full"], false);
    }

    #[test]
    fn test_huge_quantity_update_keeps_host_alive() {
        let mut sf = storefront();
        run(&mut sf, r#"{"action":"add_item","product_id":"1","color":"Silver"}"#);
        let response = run(
            &mut sf,
            r#"{"action":"update_quantity","line_id":"1-Silver","quantity":9223372036854775807}"#,
        );

        match response {
            ActionResponse::Cart { cart, .. } => {
                assert_eq!(cart.lines[0].line.quantity, i64::MAX as u64);
                assert_eq!(cart.lines[0].line_total, u64::MAX);
                assert_eq!(cart.summary.subtotal, u64::MAX);
                assert_eq!(cart.summary.total, u64::MAX);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }
}
