use async_graphql::{Error, ErrorExtensions};

use crate::errors::{CoreError, CoreErrorKind, CrmError};

/// Shape a core error as a GraphQL error with `code` and `category` extensions
pub fn core_error_to_graphql_error(err: CoreError) -> Error {
    if err.kind() == CoreErrorKind::Internal {
        tracing::error!("Internal error while resolving request: {}", err);
    }

    let code = err.code();
    let category = err.kind().as_str();
    let fields = err.fields().cloned();

    Error::new(err.message()).extend_with(|_, e| {
        e.set("code", code);
        e.set("category", category);
        if let Some(fields) = &fields {
            for (key, value) in fields {
                e.set(key.as_str(), value.as_str());
            }
        }
    })
}

pub fn crm_error_to_graphql_error(err: CrmError) -> Error {
    core_error_to_graphql_error(CoreError::from(err))
}

/// Extension trait for converting service results into GraphQL results
pub trait ResultExt<T> {
    fn to_graphql_result(self) -> async_graphql::Result<T>;
}

impl<T> ResultExt<T> for Result<T, CrmError> {
    fn to_graphql_result(self) -> async_graphql::Result<T> {
        self.map_err(crm_error_to_graphql_error)
    }
}
