use std::sync::Arc;

use crate::app_context::AppContext;

#[derive(Clone)]
pub struct GraphQLContext {
    pub app: Arc<AppContext>,
}

impl GraphQLContext {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }
}
