use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::database::entities::customers;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ResultExt;
use crate::graphql::types::Order;
use crate::services::CustomerCreateRequest;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Customer {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: ID::from(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            created_at: model.created_at,
        }
    }
}

#[ComplexObject]
impl Customer {
    /// Orders placed by this customer, newest first
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let orders = context
            .app
            .customer_service()
            .orders_for_customer(self.id.as_str())
            .await
            .to_graphql_result()?;

        Ok(orders.into_iter().map(Order::from).collect())
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<CustomerInput> for CustomerCreateRequest {
    fn from(input: CustomerInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateCustomerPayload {
    pub customer: Customer,
    pub message: String,
}

#[derive(SimpleObject)]
pub struct BulkCreateCustomersPayload {
    pub customers: Vec<Customer>,
    /// JSON objects of the form `{"index", "email", "error"}`
    pub errors: Vec<String>,
}
