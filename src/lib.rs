pub mod app_context;
pub mod database;
pub mod errors;
pub mod graphql;
pub mod server;
pub mod services;
