use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::ResultExt;
use crate::graphql::types::{CreateOrderPayload, Order, OrderInput};

#[derive(Default)]
pub struct OrderMutation;

#[Object]
impl OrderMutation {
    /// Place an order; the total is the sum of the distinct products' prices
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        input: OrderInput,
    ) -> Result<CreateOrderPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let details = context
            .app
            .order_service()
            .create_order(input.into())
            .await
            .to_graphql_result()?;

        Ok(CreateOrderPayload {
            order: Order::from(details),
        })
    }
}
