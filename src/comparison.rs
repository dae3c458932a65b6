// =============================================================================
// COMPARISON MODULE
// =============================================================================
// Bounded selection of products shown side by side.
//
// INVARIANTS:
// - 0 <= selected <= MAX_COMPARED
// - No two entries share a product id
// =============================================================================

use std::sync::Arc;

use crate::events::ComparisonOutcome;
use crate::models::{ComparisonRow, Product, SpecCategory};

/// Maximum number of products compared at once
pub const MAX_COMPARED: usize = 3;

#[derive(Debug)]
pub struct ComparisonSelector {
    selected: Vec<Arc<Product>>,
    selector_visible: bool,
    /// Hide the product picker once the last slot fills
    auto_close: bool,
}

impl Default for ComparisonSelector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ComparisonSelector {
    pub fn new(auto_close: bool) -> Self {
        Self {
            selected: Vec::with_capacity(MAX_COMPARED),
            selector_visible: false,
            auto_close,
        }
    }

    /// Append `product` unless the selection is full or already holds it.
    ///
    /// The product is not checked against any catalog.
    pub fn add(&mut self, product: &Arc<Product>) -> ComparisonOutcome {
        if self.selected.len() >= MAX_COMPARED {
            return ComparisonOutcome::Full;
        }
        if self.contains(&product.id) {
            return ComparisonOutcome::AlreadySelected;
        }

        self.selected.push(Arc::clone(product));
        if self.auto_close && self.selected.len() == MAX_COMPARED {
            self.selector_visible = false;
        }

        ComparisonOutcome::Added {
            count: self.selected.len(),
        }
    }

    /// Returns whether an entry was removed
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|product| product.id != product_id);
        self.selected.len() != before
    }

    pub fn set_selector_visible(&mut self, visible: bool) {
        self.selector_visible = visible;
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &[Arc<Product>] {
        &self.selected
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.selected.iter().any(|product| product.id == product_id)
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_COMPARED
    }

    pub fn selector_visible(&self) -> bool {
        self.selector_visible
    }

    /// Spec table: one row per category, one value per selected product
    pub fn rows(&self) -> Vec<ComparisonRow> {
        SpecCategory::ALL
            .iter()
            .map(|category| ComparisonRow {
                label: category.label(),
                values: self
                    .selected
                    .iter()
                    .map(|product| category.value(&product.specs).to_string())
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ids(selector: &ComparisonSelector) -> Vec<&str> {
        selector.selected().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_fourth_product_is_rejected_until_a_slot_frees() {
        let catalog = Catalog::builtin();
        let [a, b, c, d] = ["1", "3", "6", "8"].map(|id| Arc::clone(catalog.product(id).unwrap()));
        let mut selector = ComparisonSelector::default();

        assert_eq!(selector.add(&a), ComparisonOutcome::Added { count: 1 });
        selector.add(&b);
        selector.add(&c);
        assert_eq!(selector.add(&d), ComparisonOutcome::Full);
        assert_eq!(selector.selected().len(), 3);
        assert!(selector.is_full());

        assert!(selector.remove(&b.id));
        assert_eq!(selector.selected().len(), 2);
        assert!(!selector.is_full());

        assert_eq!(selector.add(&d), ComparisonOutcome::Added { count: 3 });
        assert_eq!(ids(&selector), vec!["1", "6", "8"]);
    }

    #[test]
    fn test_duplicates_are_ignored_at_any_size() {
        let catalog = Catalog::builtin();
        let a = Arc::clone(catalog.product("2").unwrap());
        let b = Arc::clone(catalog.product("4").unwrap());
        let mut selector = ComparisonSelector::default();

        selector.add(&a);
        assert_eq!(selector.add(&a), ComparisonOutcome::AlreadySelected);
        assert_eq!(selector.selected().len(), 1);

        selector.add(&b);
        assert_eq!(selector.add(&b), ComparisonOutcome::AlreadySelected);
        assert_eq!(ids(&selector), vec!["2", "4"]);
    }

    #[test]
    fn test_full_selection_reports_full_even_for_duplicates() {
        let catalog = Catalog::builtin();
        let mut selector = ComparisonSelector::default();
        for id in ["1", "2", "3"] {
            selector.add(catalog.product(id).unwrap());
        }

        let again = Arc::clone(catalog.product("1").unwrap());
        assert!(!selector.add(&again).is_added());
        assert_eq!(selector.selected().len(), 3);
    }

    #[test]
    fn test_products_outside_catalog_are_accepted() {
        let catalog = Catalog::builtin();
        let mut stranger = (**catalog.product("5").unwrap()).clone();
        stranger.id = "not-in-catalog".to_string();

        let mut selector = ComparisonSelector::default();
        assert!(selector.add(&Arc::new(stranger)).is_added());
        assert!(selector.contains("not-in-catalog"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut selector = ComparisonSelector::default();
        assert!(!selector.remove("1"));
        assert!(selector.selected().is_empty());
    }

    #[test]
    fn test_third_pick_closes_selector_when_enabled() {
        let catalog = Catalog::builtin();

        let mut closing = ComparisonSelector::new(true);
        closing.set_selector_visible(true);
        closing.add(catalog.product("1").unwrap());
        closing.add(catalog.product("2").unwrap());
        assert!(closing.selector_visible());
        closing.add(catalog.product("3").unwrap());
        assert!(!closing.selector_visible());

        let mut sticky = ComparisonSelector::new(false);
        sticky.set_selector_visible(true);
        for id in ["1", "2", "3"] {
            sticky.add(catalog.product(id).unwrap());
        }
        assert!(sticky.selector_visible());
    }

    #[test]
    fn test_rows_follow_selection_order() {
        let catalog = Catalog::builtin();
        let mut selector = ComparisonSelector::default();
        selector.add(catalog.product("8").unwrap());
        selector.add(catalog.product("2").unwrap());

        let rows = selector.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].label, "Processor");
        assert_eq!(rows[0].values, vec!["Intel Core i9-13950HX", "Apple M2"]);
        assert_eq!(rows[1].label, "RAM");
        assert_eq!(rows[1].values, vec!["32GB", "8GB"]);

        selector.clear();
        assert!(selector.rows().iter().all(|row| row.values.is_empty()));
    }
}
