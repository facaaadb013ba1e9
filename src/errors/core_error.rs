use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use super::CrmError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreErrorKind {
    NotFound,
    Validation,
    Internal,
}

impl CoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreErrorKind::NotFound => "NOT_FOUND",
            CoreErrorKind::Validation => "VALIDATION_FAILED",
            CoreErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Transport-neutral error handed to the API surface
#[derive(Debug)]
pub struct CoreError {
    kind: CoreErrorKind,
    code: &'static str,
    message: String,
    fields: Option<BTreeMap<String, String>>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl CoreError {
    pub fn new(kind: CoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.as_str(),
            message: message.into(),
            fields: None,
            source: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> CoreErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> Option<&BTreeMap<String, String>> {
        self.fields.as_ref()
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl StdError for CoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<CrmError> for CoreError {
    fn from(err: CrmError) -> Self {
        let mut fields = BTreeMap::new();
        match &err {
            CrmError::DuplicateEmail(email) | CrmError::InvalidEmail(email) => {
                fields.insert("email".to_string(), email.clone());
            }
            CrmError::InvalidPhone(phone) => {
                fields.insert("phone".to_string(), phone.clone());
            }
            CrmError::InvalidStock(stock) => {
                fields.insert("stock".to_string(), stock.to_string());
            }
            CrmError::CustomerNotFound(id) => {
                fields.insert("customerId".to_string(), id.clone());
            }
            CrmError::ProductsNotFound(ids) => {
                fields.insert("missingIds".to_string(), ids.join(","));
            }
            _ => {}
        }

        let core = CoreError::new(err.kind(), err.to_string()).with_code(err.error_code());
        let core = if fields.is_empty() {
            core
        } else {
            core.with_fields(fields)
        };

        match err {
            CrmError::Database(db_err) => core.with_source(db_err),
            _ => core,
        }
    }
}
