//! Domain error types for the CRM service
//!
//! Handlers return [`CrmError`] so callers can tell validation failures,
//! missing records and store failures apart. The API surface converts them
//! into the transport-neutral [`CoreError`] before shaping GraphQL errors.
//!
//! # Error Categories
//!
//! - **Validation**: duplicate or malformed email, bad phone, bad name,
//!   non-positive price, negative stock, empty product list
//! - **NotFound**: unknown customer or product references
//! - **Internal**: unexpected store failures
//!
//! # Examples
//!
//! ```rust
//! use crm::errors::{CoreErrorKind, CrmError};
//!
//! let err = CrmError::DuplicateEmail("ada@example.com".to_string());
//! assert_eq!(err.to_string(), "Email 'ada@example.com' already exists.");
//! assert_eq!(err.kind(), CoreErrorKind::Validation);
//! ```

pub mod core_error;
pub mod crm;

pub use core_error::{CoreError, CoreErrorKind};
pub use crm::CrmError;

/// Result type alias for CRM operations
pub type CrmResult<T> = Result<T, CrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crm_result_alias() {
        let result: CrmResult<()> = Err(CrmError::EmptyProductList);
        assert!(result.is_err());
    }
}
