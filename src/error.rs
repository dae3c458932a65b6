// =============================================================================
// ERROR MODULE
// =============================================================================
// Error types for the storefront crate.
//
// NOTES:
// - The cart and comparison containers are total: they never return errors
// - Errors only come from the edges: loading a catalog, parsing host actions,
//   resolving product ids the catalog doesn't know
// - thiserror derives Display; #[from] derives the conversions
// =============================================================================

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // -------------------------------------------------------------------------
    // CATALOG ERRORS
    // -------------------------------------------------------------------------
    /// Catalog data breaks one of the product invariants
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Action referenced a product id that is not in the catalog
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    // -------------------------------------------------------------------------
    // HOST ERRORS
    // -------------------------------------------------------------------------
    /// Action could not be understood
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // INTERNAL ERRORS
    // -------------------------------------------------------------------------
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code, used in host error responses
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCatalog(_) => "INVALID_CATALOG",
            AppError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            AppError::InvalidAction(_) => "INVALID_ACTION",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert into the JSON body the host writes back for a failed action.
    ///
    /// The error is logged here so callers don't have to.
    pub fn into_response(self) -> ErrorResponse {
        let code = self.code();
        let message = self.to_string();

        tracing::error!(error_code = code, message = %message, "Action failed");

        ErrorResponse::new(code, message)
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================
/// Error body written by the host for a failed action
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,

    /// Human-readable error message
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
