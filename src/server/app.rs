use std::sync::Arc;

use anyhow::{Context, Result};
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{HeaderValue, Method},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::handlers::health;
use crate::app_context::AppContext;
use crate::graphql::{build_schema, GraphQLSchema};

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<AppContext>,
    pub schema: GraphQLSchema,
}

pub fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let app = Arc::new(AppContext::new(db));
    let state = AppState {
        schema: build_schema(app.clone()),
        app,
    };

    let allow_origin = match cors_origin {
        None | Some("*") => AllowOrigin::any(),
        Some(origin) => AllowOrigin::exact(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{}'", origin))?,
        ),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(router)
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    tracing::debug!("GraphQL request received");
    let response = state.schema.execute(req.into_inner()).await;
    tracing::debug!("GraphQL request completed");
    response.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
