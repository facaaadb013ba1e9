use async_graphql::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::services::{CustomerFilter, OrderFilter, ProductFilter};

/// Customer list filter; every supplied field narrows the result
#[derive(InputObject, Clone, Debug, Default)]
pub struct CustomerFilterInput {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the email
    pub email: Option<String>,
    pub created_at_gte: Option<NaiveDate>,
    pub created_at_lte: Option<NaiveDate>,
    /// Phone prefix, e.g. "+1"
    pub phone_pattern: Option<String>,
}

impl From<CustomerFilterInput> for CustomerFilter {
    fn from(input: CustomerFilterInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            created_at_gte: input.created_at_gte,
            created_at_lte: input.created_at_lte,
            phone_pattern: input.phone_pattern,
        }
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct ProductFilterInput {
    pub name: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,
    /// Only products with fewer than 10 items in stock
    pub low_stock: Option<bool>,
}

impl From<ProductFilterInput> for ProductFilter {
    fn from(input: ProductFilterInput) -> Self {
        Self {
            name: input.name,
            price_gte: input.price_gte,
            price_lte: input.price_lte,
            stock_gte: input.stock_gte,
            stock_lte: input.stock_lte,
            low_stock: input.low_stock,
        }
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct OrderFilterInput {
    pub total_amount_gte: Option<Decimal>,
    pub total_amount_lte: Option<Decimal>,
    pub order_date_gte: Option<NaiveDate>,
    pub order_date_lte: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub product_id: Option<ID>,
}

impl From<OrderFilterInput> for OrderFilter {
    fn from(input: OrderFilterInput) -> Self {
        Self {
            total_amount_gte: input.total_amount_gte,
            total_amount_lte: input.total_amount_lte,
            order_date_gte: input.order_date_gte,
            order_date_lte: input.order_date_lte,
            customer_name: input.customer_name,
            product_name: input.product_name,
            product_id: input.product_id.map(|id| id.to_string()),
        }
    }
}
