use async_graphql::*;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::database::entities::orders;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ResultExt;
use crate::graphql::types::{Customer, Product};
use crate::services::{OrderCreateRequest, OrderDetails};

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Order {
    pub id: ID,
    #[graphql(name = "totalAmount")]
    pub total_amount: Decimal,
    #[graphql(name = "orderDate")]
    pub order_date: DateTime<Utc>,
    #[graphql(skip)]
    pub model: orders::Model,
    /// Related rows already loaded by the order workflow
    #[graphql(skip)]
    pub loaded: Option<(Customer, Vec<Product>)>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: ID::from(model.id.clone()),
            total_amount: model.total_amount,
            order_date: model.order_date,
            model,
            loaded: None,
        }
    }
}

impl From<OrderDetails> for Order {
    fn from(details: OrderDetails) -> Self {
        let customer = Customer::from(details.customer);
        let products = details.products.into_iter().map(Product::from).collect();
        Self {
            loaded: Some((customer, products)),
            ..Order::from(details.order)
        }
    }
}

#[ComplexObject]
impl Order {
    async fn customer(&self, ctx: &Context<'_>) -> Result<Customer> {
        if let Some((customer, _)) = &self.loaded {
            return Ok(customer.clone());
        }

        let context = ctx.data::<GraphQLContext>()?;
        let customer = context
            .app
            .order_service()
            .customer_for_order(&self.model)
            .await
            .to_graphql_result()?
            .ok_or_else(|| Error::new(format!("Customer for order '{}' not found", self.model.id)))?;

        Ok(Customer::from(customer))
    }

    /// Linked products, each listed once
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        if let Some((_, products)) = &self.loaded {
            return Ok(products.clone());
        }

        let context = ctx.data::<GraphQLContext>()?;
        let products = context
            .app
            .order_service()
            .products_for_order(&self.model)
            .await
            .to_graphql_result()?;

        Ok(products.into_iter().map(Product::from).collect())
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct OrderInput {
    #[graphql(name = "customerId")]
    pub customer_id: ID,
    #[graphql(name = "productIds")]
    pub product_ids: Vec<ID>,
}

impl From<OrderInput> for OrderCreateRequest {
    fn from(input: OrderInput) -> Self {
        Self {
            customer_id: input.customer_id.to_string(),
            product_ids: input.product_ids.into_iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateOrderPayload {
    pub order: Order,
}
