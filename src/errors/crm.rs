//! Errors raised by validators and mutation handlers
//!
//! ```rust
//! use crm::errors::CrmError;
//!
//! let err = CrmError::ProductsNotFound(vec!["a".to_string(), "b".to_string()]);
//! assert_eq!(err.to_string(), "One or more product IDs are invalid: a, b");
//! ```

use thiserror::Error;

use super::CoreErrorKind;

/// Failures of the customer, product and order use cases
#[derive(Error, Debug)]
pub enum CrmError {
    /// Another customer already uses this email
    #[error("Email '{0}' already exists.")]
    DuplicateEmail(String),

    /// Email is not syntactically valid
    #[error("Email '{0}' is not a valid email address.")]
    InvalidEmail(String),

    /// Phone does not match the accepted format
    #[error(
        "Phone validation failed for '{0}': Invalid phone format. Please use digits, hyphens, or include country code with '+'."
    )]
    InvalidPhone(String),

    /// Name is blank or too long
    #[error("{0}")]
    InvalidName(String),

    /// Price is not strictly positive or exceeds the stored precision
    #[error("{0}")]
    InvalidPrice(String),

    /// Stock was supplied as a negative number
    #[error("Stock cannot be a negative number.")]
    InvalidStock(i32),

    /// Order input carried no product ids
    #[error("Order must include at least one product ID.")]
    EmptyProductList,

    /// Customer reference does not resolve (or is malformed)
    #[error("Invalid customer ID: '{0}' was not found.")]
    CustomerNotFound(String),

    /// Some product references do not resolve
    #[error("One or more product IDs are invalid: {}", .0.join(", "))]
    ProductsNotFound(Vec<String>),

    /// Store operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl CrmError {
    pub fn non_positive_price() -> Self {
        CrmError::InvalidPrice("Price must be a positive number.".to_string())
    }

    pub fn price_precision() -> Self {
        CrmError::InvalidPrice(
            "Price must have at most 10 digits and 2 decimal places.".to_string(),
        )
    }

    pub fn empty_name(entity: &str) -> Self {
        CrmError::InvalidName(format!("{} name cannot be empty.", entity))
    }

    pub fn name_too_long(entity: &str, max: usize) -> Self {
        CrmError::InvalidName(format!(
            "{} name is too long (max {} characters).",
            entity, max
        ))
    }

    /// Check if the input was rejected before touching the store
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CrmError::DuplicateEmail(_)
                | CrmError::InvalidEmail(_)
                | CrmError::InvalidPhone(_)
                | CrmError::InvalidName(_)
                | CrmError::InvalidPrice(_)
                | CrmError::InvalidStock(_)
                | CrmError::EmptyProductList
        )
    }

    /// Check if a referenced record is missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CrmError::CustomerNotFound(_) | CrmError::ProductsNotFound(_)
        )
    }

    pub fn kind(&self) -> CoreErrorKind {
        if self.is_validation_error() {
            CoreErrorKind::Validation
        } else if self.is_not_found() {
            CoreErrorKind::NotFound
        } else {
            CoreErrorKind::Internal
        }
    }

    /// Get error code for GraphQL/API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CrmError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            CrmError::InvalidEmail(_) => "INVALID_EMAIL",
            CrmError::InvalidPhone(_) => "INVALID_PHONE",
            CrmError::InvalidName(_) => "INVALID_NAME",
            CrmError::InvalidPrice(_) => "INVALID_PRICE",
            CrmError::InvalidStock(_) => "INVALID_STOCK",
            CrmError::EmptyProductList => "EMPTY_PRODUCT_LIST",
            CrmError::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            CrmError::ProductsNotFound(_) => "PRODUCTS_NOT_FOUND",
            CrmError::Database(_) => "DATABASE_ERROR",
        }
    }
}
