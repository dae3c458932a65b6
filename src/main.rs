// =============================================================================
// STOREFRONT HOST - Main Entry Point
// =============================================================================
// Headless host for the storefront state.
//
// WHAT THIS BINARY DOES:
// - Builds one Storefront (catalog + cart + comparison) for the session
// - Reads UI actions from stdin, one JSON object per line
// - Writes one JSON response per line to stdout
// - Logs structured JSON to stderr, notifications included
//
// Example:
//   echo '{"action":"add_item","product_id":"1","color":"Silver"}' | storefront
// =============================================================================

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use storefront::catalog::Catalog;
use storefront::config::Config;
use storefront::error::ErrorResponse;
use storefront::handlers::{self, Action};
use storefront::metrics::setup_metrics;
use storefront::notify::TracingSink;
use storefront::Storefront;

fn main() -> anyhow::Result<()> {
    // -------------------------------------------------------------------------
    // STEP 1: Load environment variables
    // -------------------------------------------------------------------------
    dotenvy::dotenv().ok();

    // -------------------------------------------------------------------------
    // STEP 2: Initialize logging/tracing
    // -------------------------------------------------------------------------
    // stdout carries responses, so logs go to stderr.
    // Example: RUST_LOG=info,storefront=debug
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
        .init();

    info!("Starting storefront host...");

    // -------------------------------------------------------------------------
    // STEP 3: Load configuration
    // -------------------------------------------------------------------------
    let config = Config::from_env()?;
    info!(
        tax_rate = config.tax_rate,
        comparison_auto_close = config.comparison_auto_close,
        "Configuration loaded"
    );

    // -------------------------------------------------------------------------
    // STEP 4: Metrics (optional)
    // -------------------------------------------------------------------------
    let metrics_handle = if config.metrics_enabled {
        let handle = setup_metrics()?;
        info!("Prometheus metrics initialized");
        Some(handle)
    } else {
        None
    };

    // -------------------------------------------------------------------------
    // STEP 5: Load the catalog
    // -------------------------------------------------------------------------
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };
    info!(
        products = catalog.products().len(),
        brands = catalog.brands().len(),
        "Catalog ready"
    );

    // -------------------------------------------------------------------------
    // STEP 6: Create the session state
    // -------------------------------------------------------------------------
    let mut storefront = Storefront::with_config(Arc::new(catalog), &config);
    storefront.add_sink(Arc::new(TracingSink));

    let session_id = Uuid::new_v4();
    let span = info_span!("session", %session_id);
    let _guard = span.enter();

    // -------------------------------------------------------------------------
    // STEP 7: Replay actions
    // -------------------------------------------------------------------------
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handled = 0usize;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read action from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let body = match Action::parse(&line) {
            Ok(action) => match handlers::handle(&mut storefront, action) {
                Ok(response) => serde_json::to_string(&response)?,
                Err(err) => serde_json::to_string(&err.into_response())?,
            },
            Err(err) => serde_json::to_string(&ErrorResponse::with_details(
                err.code(),
                err.to_string(),
                format!("line {}", index + 1),
            ))?,
        };

        writeln!(out, "{}", body).context("Failed to write response")?;
        handled += 1;
    }
    out.flush()?;

    let summary = storefront.checkout_summary();
    info!(
        actions = handled,
        cart_items = summary.item_count,
        cart_total = summary.total,
        "Session finished"
    );

    if let Some(handle) = metrics_handle {
        info!(exposition = %handle.render(), "Session metrics");
    }

    Ok(())
}
