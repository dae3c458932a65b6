// =============================================================================
// STOREFRONT - Library Root
// =============================================================================
// In-memory state for the laptop storefront:
// - a read-only product catalog with showcase filtering and sorting
// - the shopping cart (lines, panel flag, derived totals)
// - the comparison selector (up to three products side by side)
//
// All state is owned by an explicit `Storefront` context that the host
// creates and passes around. Nothing here is global, persisted, or
// networked.
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod storefront;

pub use cart::CartStore;
pub use catalog::Catalog;
pub use comparison::ComparisonSelector;
pub use error::{AppError, AppResult};
pub use events::{CartEvent, ComparisonOutcome};
pub use storefront::Storefront;
