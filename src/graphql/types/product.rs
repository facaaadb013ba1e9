use async_graphql::*;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::database::entities::products;
use crate::services::ProductCreateRequest;

#[derive(SimpleObject, Clone, Debug)]
pub struct Product {
    pub id: ID,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: ID::from(model.id),
            name: model.name,
            price: model.price,
            stock: model.stock,
            created_at: model.created_at,
        }
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    /// Defaults to 0
    pub stock: Option<i32>,
}

impl From<ProductInput> for ProductCreateRequest {
    fn from(input: ProductInput) -> Self {
        Self {
            name: input.name,
            price: input.price,
            stock: input.stock,
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateProductPayload {
    pub product: Product,
}
