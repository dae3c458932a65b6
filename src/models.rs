// =============================================================================
// MODELS MODULE
// =============================================================================
// Data structures shared by the catalog, the cart and the comparison selector.
//
// NOTES:
// - Catalog records are read-only and shared as Arc<Product>
// - Cart lines and notifications are owned by the containers that make them
// - Serde handles JSON for catalog files and host responses
// =============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// PRODUCT
// =============================================================================
// A laptop offered by the store.
//
// Prices are whole currency units. `original_price` is only present when the
// product is on sale, and is then strictly greater than `price`.
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalog identifier
    pub id: String,

    /// Display name, e.g. `MacBook Pro 16"`
    pub name: String,

    /// Brand name, matched exactly by the showcase brand filter
    pub brand: String,

    /// Current selling price
    pub price: u64,

    /// Pre-sale price, present only when discounted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,

    /// Image URL
    pub image: String,

    pub specs: ProductSpecs,

    /// Available colors, first one is the default selection
    pub colors: Vec<String>,

    /// Average rating, 0.0 to 5.0
    pub rating: f32,

    /// Number of reviews behind the rating
    pub reviews: u32,

    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Amount saved on one unit compared to the original price.
    ///
    /// # Example
    /// ```
    /// # use storefront::catalog::Catalog;
    /// let catalog = Catalog::builtin();
    /// let xps = catalog.product("3").unwrap();
    /// assert_eq!(xps.savings_per_unit(), 300);
    /// ```
    pub fn savings_per_unit(&self) -> u64 {
        self.original_price
            .map(|original| original.saturating_sub(self.price))
            .unwrap_or(0)
    }

    /// Rounded discount percentage, `None` when not on sale
    pub fn discount_percent(&self) -> Option<u64> {
        let original = self.original_price?;
        if original == 0 {
            return None;
        }
        let saved = original.saturating_sub(self.price) as f64;
        Some((saved / original as f64 * 100.0).round() as u64)
    }

    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }
}

// -----------------------------------------------------------------------------
// PRODUCT SPECS
// -----------------------------------------------------------------------------
/// Fixed-shape spec sheet. Values are opaque display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecs {
    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub display: String,
    pub graphics: String,
}

/// Spec categories in the order the comparison table shows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecCategory {
    Processor,
    Ram,
    Storage,
    Display,
    Graphics,
}

impl SpecCategory {
    pub const ALL: [SpecCategory; 5] = [
        SpecCategory::Processor,
        SpecCategory::Ram,
        SpecCategory::Storage,
        SpecCategory::Display,
        SpecCategory::Graphics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpecCategory::Processor => "Processor",
            SpecCategory::Ram => "RAM",
            SpecCategory::Storage => "Storage",
            SpecCategory::Display => "Display",
            SpecCategory::Graphics => "Graphics",
        }
    }

    pub fn value(self, specs: &ProductSpecs) -> &str {
        match self {
            SpecCategory::Processor => &specs.processor,
            SpecCategory::Ram => &specs.ram,
            SpecCategory::Storage => &specs.storage,
            SpecCategory::Display => &specs.display,
            SpecCategory::Graphics => &specs.graphics,
        }
    }
}

// =============================================================================
// BRAND
// =============================================================================
/// Decorative brand record: a name plus a logo glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub logo: String,
}

// =============================================================================
// CART LINE
// =============================================================================

// -----------------------------------------------------------------------------
// LINE IDENTITY
// -----------------------------------------------------------------------------
/// Identity key of a cart line: `"{product_id}-{color}"`.
///
/// Two `add_item` calls with the same product and color land on the same
/// line because they build the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub fn new(product_id: &str, color: &str) -> Self {
        Self(format!("{}-{}", product_id, color))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for LineId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

// -----------------------------------------------------------------------------
// CART LINE
// -----------------------------------------------------------------------------
/// One entry in the cart. Quantity is always at least 1.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: LineId,
    pub product: Arc<Product>,
    pub color: String,
    pub quantity: u64,
}

impl CartLine {
    /// price × quantity, saturating at `u64::MAX`
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(self.quantity)
    }

    /// (original − price) × quantity, zero when not on sale
    pub fn line_savings(&self) -> u64 {
        self.product.savings_per_unit().saturating_mul(self.quantity)
    }
}

// -----------------------------------------------------------------------------
// CHECKOUT SUMMARY
// -----------------------------------------------------------------------------
/// Figures shown at the bottom of the cart panel.
///
/// Never stored: built from the current lines each time it is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub item_count: u64,
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
    pub savings: u64,
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast payload handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub emitted_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, description)
    }

    fn new(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            emitted_at: Utc::now(),
        }
    }
}

// =============================================================================
// SHOWCASE QUERIES
// =============================================================================

// -----------------------------------------------------------------------------
// SORT ORDER
// -----------------------------------------------------------------------------
/// Sort options offered by the product showcase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "featured")]
    Featured,
    #[serde(rename = "price-low")]
    PriceLowToHigh,
    #[serde(rename = "price-high")]
    PriceHighToLow,
    #[serde(rename = "rating")]
    Rating,
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to `Featured`, like the showcase's default branch
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw {
            "price-low" => SortOrder::PriceLowToHigh,
            "price-high" => SortOrder::PriceHighToLow,
            "rating" => SortOrder::Rating,
            _ => SortOrder::Featured,
        })
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortOrder::from_str(&raw).unwrap_or_default())
    }
}

// -----------------------------------------------------------------------------
// BRAND FILTER
// -----------------------------------------------------------------------------
/// Brand filter chip selection. `"all"` disables filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandFilter {
    #[default]
    All,
    Brand(String),
}

impl BrandFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Brand(name) => product.brand == *name,
        }
    }
}

impl From<&str> for BrandFilter {
    fn from(raw: &str) -> Self {
        if raw == "all" {
            BrandFilter::All
        } else {
            BrandFilter::Brand(raw.to_string())
        }
    }
}

impl Serialize for BrandFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BrandFilter::All => serializer.serialize_str("all"),
            BrandFilter::Brand(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for BrandFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(BrandFilter::from(raw.as_str()))
    }
}

// =============================================================================
// COMPARISON TABLE
// =============================================================================
/// One row of the side-by-side comparison, values in selection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

// =============================================================================
// PRICE FORMATTING
// =============================================================================
/// Format whole currency units with thousands separators: `2499` → `$2,499`
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${}", grouped)
}
