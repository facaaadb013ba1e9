use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::{CustomerService, OrderService, ProductService};

/// Shared application context exposing the CRM services to the API layer.
#[derive(Clone)]
pub struct AppContext {
    db: DatabaseConnection,
    customer_service: Arc<CustomerService>,
    product_service: Arc<ProductService>,
    order_service: Arc<OrderService>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection) -> Self {
        let customer_service = Arc::new(CustomerService::new(db.clone()));
        let product_service = Arc::new(ProductService::new(db.clone()));
        let order_service = Arc::new(OrderService::new(db.clone()));

        Self {
            db,
            customer_service,
            product_service,
            order_service,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn customer_service(&self) -> &Arc<CustomerService> {
        &self.customer_service
    }

    pub fn product_service(&self) -> &Arc<ProductService> {
        &self.product_service
    }

    pub fn order_service(&self) -> &Arc<OrderService> {
        &self.order_service
    }
}
